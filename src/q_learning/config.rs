//! Q-learning hyperparameters

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Hyperparameters of a [`crate::q_learning::QLearningAgent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Step size α.
    pub learning_rate: f64,
    /// Discount γ applied per step back from the end of an episode.
    pub discount_factor: f64,
    /// Initial exploration rate.
    pub epsilon: f64,
    /// Multiplicative epsilon decay per learned episode.
    pub epsilon_decay: f64,
    /// Exploration floor.
    pub min_epsilon: f64,
    /// Value of pairs never updated.
    pub q_init: f64,
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        QLearningConfig {
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon: 0.1,
            epsilon_decay: 0.995,
            min_epsilon: 0.01,
            q_init: 0.0,
            seed: None,
        }
    }
}

impl QLearningConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_min_epsilon(mut self, min_epsilon: f64) -> Self {
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every rate lies in `[0, 1]` and the floor does not exceed epsilon.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("learning_rate", self.learning_rate),
            ("discount_factor", self.discount_factor),
            ("epsilon", self.epsilon),
            ("epsilon_decay", self.epsilon_decay),
            ("min_epsilon", self.min_epsilon),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!("{name} must be in [0, 1], got {value}")));
            }
        }
        if self.min_epsilon > self.epsilon {
            return Err(Error::config(format!(
                "min_epsilon {} exceeds epsilon {}",
                self.min_epsilon, self.epsilon
            )));
        }
        if !self.q_init.is_finite() {
            return Err(Error::config("q_init must be finite"));
        }
        Ok(())
    }
}
