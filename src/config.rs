//! Optimizer configuration.
//!
//! Load from TOML to tune weights, engine budgets and the strategy order
//! without code changes. Every section is optional and falls back to its
//! defaults.
//!
//! # Examples
//!
//! ```
//! use u_slotmatch::config::OptimizerConfig;
//! use u_slotmatch::pipeline::Strategy;
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     seed = 42
//!     strategies = ["chain", "annealing"]
//!
//!     [costs]
//!     unwanted = 8000.0
//!
//!     [annealing]
//!     max_iterations = 500
//! "#).unwrap();
//!
//! assert_eq!(config.seed, Some(42));
//! assert_eq!(config.strategies, vec![Strategy::Chain, Strategy::Annealing]);
//! assert_eq!(config.annealing.max_iterations, 500);
//! assert_eq!(config.costs.first, -300.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chain::ChainConfig;
use crate::cost::CostTable;
use crate::error::ConfigError;
use crate::ga::GeneticConfig;
use crate::model::{Day, TeacherRoster};
use crate::pipeline::Strategy;
use crate::sa::AnnealingConfig;
use crate::swap::{BlockSwapConfig, SwapConfig};
use crate::tabu::TabuConfig;

/// Top-level configuration for [`Optimizer`](crate::pipeline::Optimizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Rank weights for the baseline matcher.
    pub costs: CostTable,
    pub swap: SwapConfig,
    pub block: BlockSwapConfig,
    pub chain: ChainConfig,
    pub annealing: AnnealingConfig,
    pub tabu: TabuConfig,
    pub genetic: GeneticConfig,

    /// Refiners to run after the baseline, in order.
    pub strategies: Vec<Strategy>,

    /// Eligible days. `None` uses every day of the timetable.
    pub days: Option<Vec<Day>>,

    /// Seed for reproducible runs.
    pub seed: Option<u64>,

    /// Per-day teacher capacity.
    pub roster: Option<TeacherRoster>,

    /// Extra matcher rounds with a scaled unwanted weight. 0 disables.
    pub penalty_escalation_rounds: usize,

    /// Multiplier applied to the unwanted weight per escalation round.
    pub escalation_factor: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            costs: CostTable::default(),
            swap: SwapConfig::default(),
            block: BlockSwapConfig::default(),
            chain: ChainConfig::default(),
            annealing: AnnealingConfig::default(),
            tabu: TabuConfig::default(),
            genetic: GeneticConfig::default(),
            strategies: Strategy::DEFAULT_ORDER.to_vec(),
            days: None,
            seed: None,
            roster: None,
            penalty_escalation_rounds: 0,
            escalation_factor: 2.0,
        }
    }
}

impl OptimizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_costs(mut self, costs: CostTable) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_swap(mut self, swap: SwapConfig) -> Self {
        self.swap = swap;
        self
    }

    pub fn with_block(mut self, block: BlockSwapConfig) -> Self {
        self.block = block;
        self
    }

    pub fn with_chain(mut self, chain: ChainConfig) -> Self {
        self.chain = chain;
        self
    }

    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Self {
        self.annealing = annealing;
        self
    }

    pub fn with_tabu(mut self, tabu: TabuConfig) -> Self {
        self.tabu = tabu;
        self
    }

    pub fn with_genetic(mut self, genetic: GeneticConfig) -> Self {
        self.genetic = genetic;
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = Some(days);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_roster(mut self, roster: TeacherRoster) -> Self {
        self.roster = Some(roster);
        self
    }

    pub fn with_penalty_escalation(mut self, rounds: usize, factor: f64) -> Self {
        self.penalty_escalation_rounds = rounds;
        self.escalation_factor = factor;
        self
    }

    /// Checks engine parameters. Cost weights and the roster are checked
    /// against the model when the instance is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.swap.validate()?;
        self.block.validate()?;
        self.chain.validate()?;
        self.annealing.validate()?;
        self.tabu.validate()?;
        self.genetic.validate()?;

        if self.days.as_ref().is_some_and(|days| days.is_empty()) {
            return Err(ConfigError::Invalid("days must not be empty when given".into()));
        }
        if self.penalty_escalation_rounds > 0
            && !(self.escalation_factor.is_finite() && self.escalation_factor > 1.0)
        {
            return Err(ConfigError::Invalid(format!(
                "escalation_factor must be finite and > 1, got {}",
                self.escalation_factor
            )));
        }
        Ok(())
    }
}
