//! Tabu Search (TS).
//!
//! A single-solution trajectory search over pairwise slot swaps that keeps
//! recently swapped student pairs in a short-term memory so the search does
//! not immediately undo its own moves. A run of non-improving iterations
//! triggers random diversification swaps.
//!
//! # References
//!
//! - Glover (1986), "Future Paths for Integer Programming and Links to AI"
//! - Glover & Laguna (1997), *Tabu Search*

mod config;
mod runner;
mod types;

pub use config::TabuConfig;
pub use runner::{TabuResult, TabuRunner};
pub use types::{TabuEntry, TabuList};
