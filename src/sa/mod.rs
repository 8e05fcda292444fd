//! Simulated Annealing (SA).
//!
//! A single-solution trajectory search over pairwise slot swaps. Worsening
//! swaps are accepted with a probability that shrinks with the temperature,
//! letting the search leave local optima the chain exchange cannot escape.
//! Swaps keep the occupied slot set, so capacity and injectivity hold
//! throughout.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::{AnnealingConfig, CoolingSchedule, Reheat};
pub use runner::{AnnealingResult, AnnealingRunner};
