//! GA configuration.
//!
//! [`GeneticConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_slotmatch::ga::GeneticConfig;
///
/// let config = GeneticConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.max_generations, 30);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_slotmatch::ga::GeneticConfig;
///
/// let config = GeneticConfig::default()
///     .with_population_size(40)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, a clone of the first parent is used.
    pub crossover_rate: f64,

    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Individuals sampled per tournament.
    pub tournament_size: usize,

    /// Random swaps applied to each seeded variant of the baseline.
    pub seed_swaps: usize,

    /// Fitness penalty per unwanted placement.
    pub unwanted_penalty: f64,

    /// Evaluate offspring on rayon. Has no effect without the `parallel`
    /// feature.
    pub parallel: bool,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_generations: 30,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            tournament_size: 3,
            seed_swaps: 10,
            unwanted_penalty: 10.0,
            parallel: true,
        }
    }
}

impl GeneticConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_seed_swaps(mut self, n: usize) -> Self {
        self.seed_swaps = n;
        self
    }

    pub fn with_unwanted_penalty(mut self, penalty: f64) -> Self {
        self.unwanted_penalty = penalty;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.into()));
        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return invalid("crossover_rate must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid("mutation_rate must be in [0, 1]");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if !(self.unwanted_penalty.is_finite() && self.unwanted_penalty >= 0.0) {
            return invalid("unwanted_penalty must be finite and non-negative");
        }
        Ok(())
    }
}
