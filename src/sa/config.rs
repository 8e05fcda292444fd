//! Annealing configuration, cooling schedules and reheating.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Temperature update rule applied after every move.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Adaptive: acceptance-rate feedback in the spirit of Lam & Delosme (1988)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoolingSchedule {
    /// `T_{k+1} = alpha * T_k`. Typical `alpha`: 0.90–0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Steers the acceptance rate toward a target.
    ///
    /// After every `window` moves, T is divided by `adjust_factor` when the
    /// window's acceptance rate exceeds `target_acceptance` and multiplied
    /// by it when the rate falls below.
    Adaptive {
        target_acceptance: f64,
        adjust_factor: f64,
        window: usize,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

impl CoolingSchedule {
    pub fn adaptive() -> Self {
        CoolingSchedule::Adaptive {
            target_acceptance: 0.3,
            adjust_factor: 1.1,
            window: 20,
        }
    }
}

/// Resets the temperature after a run of non-improving moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reheat {
    /// Consecutive moves without a new best before reheating.
    pub after_non_improving: usize,
    /// Upper bound on reheats per run.
    pub max_reheats: usize,
}

impl Default for Reheat {
    fn default() -> Self {
        Self {
            after_non_improving: 100,
            max_reheats: 3,
        }
    }
}

/// Configuration for the [`AnnealingRunner`](super::AnnealingRunner).
///
/// # Examples
///
/// ```
/// use u_slotmatch::sa::{AnnealingConfig, CoolingSchedule};
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(50.0)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 })
///     .with_max_iterations(2000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Initial temperature, also the reheat target.
    pub initial_temperature: f64,

    /// Temperature floor. Cooling never goes below it.
    pub min_temperature: f64,

    pub cooling: CoolingSchedule,

    /// Move budget.
    pub max_iterations: usize,

    /// `None` disables reheating.
    pub reheat: Option<Reheat>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1e-3,
            cooling: CoolingSchedule::default(),
            max_iterations: 1000,
            reheat: Some(Reheat::default()),
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_reheat(mut self, reheat: Option<Reheat>) -> Self {
        self.reheat = reheat;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return invalid("initial_temperature must be positive".into());
        }
        if !(self.min_temperature > 0.0 && self.min_temperature.is_finite()) {
            return invalid(format!("min_temperature must be positive, got {}", self.min_temperature));
        }
        if self.min_temperature >= self.initial_temperature {
            return invalid("min_temperature must be less than initial_temperature".into());
        }
        if self.max_iterations == 0 {
            return invalid("annealing max_iterations must be at least 1".into());
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return invalid(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::Adaptive {
                target_acceptance,
                adjust_factor,
                window,
            } => {
                if !(0.0..=1.0).contains(&target_acceptance) {
                    return invalid(format!(
                        "target_acceptance must be in [0, 1], got {target_acceptance}"
                    ));
                }
                if !(adjust_factor > 1.0 && adjust_factor.is_finite()) {
                    return invalid(format!("adjust_factor must exceed 1, got {adjust_factor}"));
                }
                if window == 0 {
                    return invalid("adaptive window must be at least 1".into());
                }
            }
        }
        if let Some(reheat) = self.reheat {
            if reheat.after_non_improving == 0 {
                return invalid("reheat after_non_improving must be at least 1".into());
            }
        }
        Ok(())
    }
}
