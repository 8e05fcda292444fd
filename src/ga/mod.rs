//! Genetic Algorithm over slot assignments.
//!
//! A population of solutions seeded from the baseline, evolved with
//! tournament selection, uniform crossover with repair, and swap mutation.
//! The single fittest individual survives each generation unchanged.
//!
//! # Key Types
//!
//! - [`GeneticConfig`]: population size, rates, tournament size, penalty
//! - [`GeneticRunner`]: executes the evolutionary loop
//! - [`Individual`]: a solution with its cached fitness
//!
//! # Submodules
//!
//! - [`operators`]: uniform crossover with repair and swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GeneticConfig;
pub use runner::{GeneticResult, GeneticRunner};
pub use selection::tournament;
pub use types::Individual;
