//! Swap descent configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for [`SwapDescent`](super::SwapDescent).
///
/// # Examples
///
/// ```
/// use u_slotmatch::swap::SwapConfig;
///
/// let config = SwapConfig::default().with_max_passes(3);
/// assert_eq!(config.max_passes, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Full sweeps over the unwanted students. Stops early after a sweep
    /// without an accepted move.
    pub max_passes: usize,

    /// Also try moving an unwanted student into a vacant slot.
    pub use_vacant_slots: bool,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            max_passes: 10,
            use_vacant_slots: true,
        }
    }
}

impl SwapConfig {
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    pub fn with_vacant_slots(mut self, enabled: bool) -> Self {
        self.use_vacant_slots = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_passes == 0 {
            return Err(ConfigError::Invalid("swap max_passes must be at least 1".into()));
        }
        Ok(())
    }
}

/// Configuration for [`BlockSwap`](super::BlockSwap).
///
/// # Examples
///
/// ```
/// use u_slotmatch::swap::BlockSwapConfig;
///
/// let config = BlockSwapConfig::default().with_block_size(2);
/// assert_eq!(config.block_size, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockSwapConfig {
    /// Students per block. Two disjoint blocks are drawn per attempt.
    pub block_size: usize,

    /// Random block pairs tried before giving up.
    pub max_attempts: usize,
}

impl Default for BlockSwapConfig {
    fn default() -> Self {
        Self {
            block_size: 3,
            max_attempts: 30,
        }
    }
}

impl BlockSwapConfig {
    pub fn with_block_size(mut self, n: usize) -> Self {
        self.block_size = n;
        self
    }

    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::Invalid("block_size must be at least 1".into()));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("block max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SwapConfig::default();
        assert_eq!(config.max_passes, 10);
        assert!(config.use_vacant_slots);
    }

    #[test]
    fn test_validate_zero_passes() {
        assert!(SwapConfig::default().with_max_passes(0).validate().is_err());
    }

    #[test]
    fn test_block_defaults_and_validation() {
        let config = BlockSwapConfig::default();
        assert_eq!(config.block_size, 3);
        assert_eq!(config.max_attempts, 30);
        assert!(config.validate().is_ok());
        assert!(config.clone().with_block_size(0).validate().is_err());
        assert!(config.with_max_attempts(0).validate().is_err());
    }
}
