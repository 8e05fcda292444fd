//! Chain exchange configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the [`ChainExchangeEngine`](super::ChainExchangeEngine).
///
/// # Examples
///
/// ```
/// use u_slotmatch::chain::ChainConfig;
///
/// let config = ChainConfig::default()
///     .with_max_chain_length(4)
///     .with_max_expansions(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Maximum number of students in one exchange, the unwanted student
    /// included. 2 = a plain swap.
    pub max_chain_length: usize,

    /// Node expansion budget for one search from one unwanted student.
    pub max_expansions: usize,

    /// Sweeps over the unwanted students. Stops early after a sweep that
    /// applies no exchange.
    pub max_passes: usize,

    /// Treat all preferred slots as equally acceptable for chain members.
    ///
    /// By default a member only moves to a slot ranked no worse than its
    /// current one. With this set, a member already on a preferred slot may
    /// move to any of its preferred slots.
    pub equal_preference: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            max_chain_length: 5,
            max_expansions: 1000,
            max_passes: 5,
            equal_preference: false,
        }
    }
}

impl ChainConfig {
    pub fn with_max_chain_length(mut self, n: usize) -> Self {
        self.max_chain_length = n;
        self
    }

    pub fn with_max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = n;
        self
    }

    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    pub fn with_equal_preference(mut self, enabled: bool) -> Self {
        self.equal_preference = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chain_length < 2 {
            return Err(ConfigError::Invalid(format!(
                "max_chain_length must be at least 2, got {}",
                self.max_chain_length
            )));
        }
        if self.max_expansions == 0 {
            return Err(ConfigError::Invalid("max_expansions must be at least 1".into()));
        }
        if self.max_passes == 0 {
            return Err(ConfigError::Invalid("chain max_passes must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChainConfig::default();
        assert_eq!(config.max_chain_length, 5);
        assert_eq!(config.max_expansions, 1000);
        assert!(!config.equal_preference);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_short_chain() {
        assert!(ChainConfig::default().with_max_chain_length(1).validate().is_err());
    }
}
