use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random legal move.
    Easy,
    #[default]
    Medium,
    Hard,
}

impl TryFrom<u8> for Difficulty {
    type Error = ConfigError;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        match tier {
            1 => Ok(Self::Easy),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Hard),
            other => Err(ConfigError::UnknownTier(other)),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be at least 1")]
    ZeroDepth { field: &'static str },
    #[error("blunder_rate {0} is outside 0.0..=1.0")]
    BlunderRate(f64),
    #[error("difficulty tier {0} is not 1, 2 or 3")]
    UnknownTier(u8),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,

    // Search depth per tier
    pub medium_depth: u8,
    pub hard_depth: u8,

    /// Chance that the medium tic-tac-toe player ignores the search result.
    pub blunder_rate: f64,
    /// Fixed seed for reproducible games; entropy when absent.
    pub seed: Option<u64>,
    /// Order candidates by captured value before searching.
    pub order_moves: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            medium_depth: 2,
            hard_depth: 3,
            blunder_rate: 0.3,
            seed: None,
            order_moves: true,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses a JSON object; missing fields keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.medium_depth == 0 {
            return Err(ConfigError::ZeroDepth {
                field: "medium_depth",
            });
        }
        if self.hard_depth == 0 {
            return Err(ConfigError::ZeroDepth { field: "hard_depth" });
        }
        if !(0.0..=1.0).contains(&self.blunder_rate) {
            return Err(ConfigError::BlunderRate(self.blunder_rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.medium_depth, 2);
        assert_eq!(config.hard_depth, 3);
    }

    #[test]
    fn test_load_config_partial() {
        let json = r#"{
            "difficulty": "hard",
            "seed": 42
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, Some(42));
        assert!(config.order_moves);
        assert!((config.blunder_rate - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_config_invalid_json() {
        let result = EngineConfig::load_from_json("{ invalid json }");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_config_rejects_out_of_range() {
        let result = EngineConfig::load_from_json(r#"{ "hard_depth": 0 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::ZeroDepth { field: "hard_depth" })
        ));

        let result = EngineConfig::load_from_json(r#"{ "blunder_rate": 1.5 }"#);
        assert!(matches!(result, Err(ConfigError::BlunderRate(_))));
    }

    #[test]
    fn test_difficulty_tiers() {
        assert_eq!(Difficulty::try_from(1).unwrap(), Difficulty::Easy);
        assert_eq!(Difficulty::try_from(3).unwrap(), Difficulty::Hard);
        assert!(matches!(
            Difficulty::try_from(4),
            Err(ConfigError::UnknownTier(4))
        ));
    }
}
