//! Agent specifications accepted on the command line

use std::{fmt, path::PathBuf, str::FromStr};

use anyhow::{Context, Result, anyhow};

use crate::{
    app::{AgentConfig, AgentKind},
    rules::Player,
};

/// An agent written as `kind[:arg]`.
///
/// Search kinds take a depth (`alphabeta:3`, `hybrid:2`, `minimax`), the
/// Q-learning kind takes a model path (`q:models/agent.msgpack`), and
/// `random` takes nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSpec {
    raw: String,
    config: AgentConfig,
}

impl AgentSpec {
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Configuration with `seed` applied unless the spec already fixed one.
    pub fn config_with_seed(&self, seed: Option<u64>) -> AgentConfig {
        match (self.config.seed, seed) {
            (None, Some(seed)) => self.config.clone().with_seed(seed),
            _ => self.config.clone(),
        }
    }
}

impl FromStr for AgentSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, arg) = match s.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (s, None),
        };
        let kind: AgentKind = kind.trim().parse()?;
        let mut config = AgentConfig::new(kind);
        match (kind, arg) {
            (_, None) => {}
            (AgentKind::QLearning, Some(path)) => {
                config = config.with_model_path(PathBuf::from(path))
            }
            (kind, Some(depth)) if kind.is_search() => {
                let depth = depth
                    .parse::<usize>()
                    .with_context(|| {
                        format!("invalid search depth '{depth}' in agent spec '{s}'")
                    })?;
                config = config.with_depth(depth);
            }
            (kind, Some(arg)) => {
                return Err(anyhow!("agent '{kind}' takes no argument, got '{arg}'"));
            }
        }
        Ok(AgentSpec {
            raw: s.to_string(),
            config,
        })
    }
}

impl fmt::Display for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "one" | "first" | "player1" | "p1" => Ok(Player::One),
        "2" | "-1" | "two" | "second" | "player2" | "p2" => Ok(Player::Two),
        other => Err(anyhow!("Invalid value '{other}' for {flag} (expected 'p1' or 'p2')")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_search_depths() {
        let spec: AgentSpec = "alphabeta:3".parse().unwrap();
        assert_eq!(spec.config().kind, AgentKind::AlphaBeta);
        assert_eq!(spec.config().depth, 3);

        let spec: AgentSpec = "hybrid".parse().unwrap();
        assert_eq!(spec.config().depth, crate::app::DEFAULT_DEPTH);
    }

    #[test]
    fn test_parses_model_path() {
        let spec: AgentSpec = "q:models/a.msgpack".parse().unwrap();
        assert_eq!(spec.config().model_path, Some(PathBuf::from("models/a.msgpack")));
    }

    #[test]
    fn test_rejects_bad_specs() {
        assert!("alphabeta:deep".parse::<AgentSpec>().is_err());
        assert!("random:3".parse::<AgentSpec>().is_err());
        assert!("oracle".parse::<AgentSpec>().is_err());
    }

    #[test]
    fn test_player_tokens() {
        assert_eq!(parse_player_token("P2", "--player").unwrap(), Player::Two);
        assert!(parse_player_token("x", "--player").is_err());
    }
}
