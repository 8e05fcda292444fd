//! Candidate solutions and their evaluation.
//!
//! - [`Solution`]: immutable student → slot mapping
//! - [`Assignment`]: `(student, slot, rank)` view, rank always recomputed
//! - [`RankMismatch`]: a reloaded record whose stated rank is stale
//! - [`SolutionEvaluator`] / [`Evaluation`]: per-rank counts, weighted score
//!   and the comparison every engine uses

mod evaluator;
mod types;

pub use evaluator::{Evaluation, SolutionEvaluator};
pub use types::{Assignment, RankMismatch, Solution};
