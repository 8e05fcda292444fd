//! Tabu Search configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_slotmatch::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(100)
///     .with_tenure(7)
///     .with_aspiration(true);
/// assert_eq!(config.max_iterations, 100);
/// assert_eq!(config.tenure, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// How many iterations a swapped pair stays tabu.
    pub tenure: usize,
    /// Admit a tabu move when it beats the best solution so far.
    pub aspiration: bool,
    /// Consecutive non-improving iterations before diversifying.
    pub diversification_threshold: usize,
    /// Random swaps applied per diversification, ignoring tabu status.
    pub diversification_moves: usize,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tenure: 10,
            aspiration: true,
            diversification_threshold: 15,
            diversification_moves: 10,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn with_diversification(mut self, threshold: usize, moves: usize) -> Self {
        self.diversification_threshold = threshold;
        self.diversification_moves = moves;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid("tabu max_iterations must be at least 1".into()));
        }
        if self.tenure == 0 {
            return Err(ConfigError::Invalid("tabu tenure must be at least 1".into()));
        }
        if self.diversification_threshold == 0 {
            return Err(ConfigError::Invalid(
                "diversification_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TabuConfig::default();
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.tenure, 10);
        assert_eq!(config.diversification_threshold, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_tenure() {
        assert!(TabuConfig::default().with_tenure(0).validate().is_err());
    }
}
