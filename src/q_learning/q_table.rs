//! Q-table keyed by position and move

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{rules::Move, types::StateKey};

/// Values for (position, move) pairs. Entries are created on first update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    q_values: HashMap<StateKey, HashMap<Move, f64>>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    /// Value reported for pairs never updated
    q_init: f64,
}

impl QTable {
    pub fn new(learning_rate: f64, discount_factor: f64, q_init: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
            q_init,
        }
    }

    pub fn get(&self, state: &StateKey, action: Move) -> f64 {
        self.q_values
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or(self.q_init)
    }

    pub fn set(&mut self, state: StateKey, action: Move, value: f64) {
        self.q_values.entry(state).or_default().insert(action, value);
    }

    /// Highest value over `legal_actions`, or `None` when there are none.
    pub fn max_q(&self, state: &StateKey, legal_actions: &[Move]) -> Option<f64> {
        legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .reduce(f64::max)
    }

    /// Every legal action sharing the highest value, in input order.
    pub fn best_actions(&self, state: &StateKey, legal_actions: &[Move]) -> Vec<Move> {
        let Some(best) = self.max_q(state, legal_actions) else {
            return Vec::new();
        };
        legal_actions
            .iter()
            .copied()
            .filter(|&action| self.get(state, action) == best)
            .collect()
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)], with the max taken
    /// as 0 when `next_legal_actions` is empty.
    pub fn q_learning_update(
        &mut self,
        state: &StateKey,
        action: Move,
        reward: f64,
        next_state: &StateKey,
        next_legal_actions: &[Move],
    ) {
        let current_q = self.get(state, action);
        let max_next_q = self.max_q(next_state, next_legal_actions).unwrap_or(0.0);
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state.clone(), action, new_q);
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Number of distinct positions with at least one stored value.
    pub fn state_count(&self) -> usize {
        self.q_values.len()
    }

    /// Total number of stored (position, move) values.
    pub fn size(&self) -> usize {
        self.q_values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}
