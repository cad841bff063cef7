//! Search settings, loadable from TOML.
//!
//! ```toml
//! max_depth = 4
//! alpha_beta_pruning = false
//! ```
//!
//! Missing keys take their defaults.

use serde::{Deserialize, Serialize};

use crate::errors::{ChessError, ChessResult};

/// Deepest search accepted from configuration.
pub const MAX_SEARCH_DEPTH: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Plies below the root. Zero evaluates the root statically.
    pub max_depth: u8,
    pub alpha_beta_pruning: bool,
    /// Search moves onto occupied squares before quiet ones.
    pub captures_first: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            alpha_beta_pruning: true,
            captures_first: true,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// No pruning, so per-ply node counts equal perft counts.
    pub fn exhaustive(max_depth: u8) -> Self {
        Self {
            max_depth,
            alpha_beta_pruning: false,
            captures_first: true,
        }
    }

    pub fn from_toml_str(text: &str) -> ChessResult<Self> {
        let config: SearchConfig =
            toml::from_str(text).map_err(|err| ChessError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChessResult<()> {
        if self.max_depth > MAX_SEARCH_DEPTH {
            return Err(ChessError::InvalidConfig(format!(
                "max_depth {} exceeds {MAX_SEARCH_DEPTH}",
                self.max_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = SearchConfig::from_toml_str("max_depth = 5").expect("valid config");
        assert_eq!(config.max_depth, 5);
        assert!(config.alpha_beta_pruning);
        assert!(config.captures_first);

        let empty = SearchConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(empty, SearchConfig::default());
    }

    #[test]
    fn rejects_excessive_depth_and_unknown_keys() {
        assert!(matches!(
            SearchConfig::from_toml_str("max_depth = 40"),
            Err(ChessError::InvalidConfig(_))
        ));
        assert!(matches!(
            SearchConfig::from_toml_str("depth = 2"),
            Err(ChessError::InvalidConfig(_))
        ));
        assert!(matches!(
            SearchConfig::from_toml_str("max_depth = -1"),
            Err(ChessError::InvalidConfig(_))
        ));
    }

    #[test]
    fn exhaustive_disables_pruning() {
        let config = SearchConfig::exhaustive(4);
        assert_eq!(config.max_depth, 4);
        assert!(!config.alpha_beta_pruning);
    }
}
