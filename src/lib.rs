//! Preference-ranked student-to-slot assignment.
//!
//! Each student ranks up to three weekly `(day, hour)` slots. The crate
//! assigns at most one student per slot so that as many students as
//! possible get a preferred slot and as few as possible land on an
//! unwanted one:
//!
//! - **Exact matching**: a Hungarian-algorithm baseline over a rank cost
//!   matrix, with dummy columns for unassignable students and blocker rows
//!   for teacher-capacity-bound days.
//! - **Swap descent**: first-improvement pairwise swaps and vacant-slot moves,
//!   plus a randomized block exchange between disjoint student groups.
//! - **Chain exchange**: breadth-first search for cycles and open chains of
//!   simultaneous moves that repair unwanted placements.
//! - **Simulated Annealing (SA)**: swap trajectory search with geometric or
//!   adaptive cooling and bounded reheating.
//! - **Tabu Search (TS)**: best-admissible swaps with pair tabu memory,
//!   aspiration and diversification.
//! - **Genetic Algorithm (GA)**: a baseline-seeded population with
//!   tournament selection, repaired uniform crossover and swap mutation.
//!
//! # Architecture
//!
//! [`model`] holds validated input, [`problem::Instance`] the derived
//! engine-facing data, and [`solution`] the value type every engine
//! consumes and returns. Engines never share mutable state; randomness is
//! injected per call. [`pipeline::Optimizer`] wires them together from an
//! [`config::OptimizerConfig`] and produces a [`report::OptimizationReport`].
//!
//! # Examples
//!
//! ```
//! use u_slotmatch::{Optimizer, OptimizerConfig};
//! use u_slotmatch::model::{Day, PreferenceModel, SlotId, StudentRecord, Timetable};
//!
//! let tue = |h| SlotId::new(Day::Tue, h);
//! let wed = |h| SlotId::new(Day::Wed, h);
//! let model = PreferenceModel::from_records(
//!     vec![
//!         StudentRecord::new("ana", tue(10), wed(10), tue(11)),
//!         StudentRecord::new("ben", tue(10), tue(11), wed(12)),
//!         StudentRecord::new("cho", tue(10), wed(10), wed(11)),
//!     ],
//!     Timetable::default(),
//! ).unwrap();
//!
//! let report = Optimizer::new(OptimizerConfig::default().with_seed(7))
//!     .optimize(&model)
//!     .unwrap();
//! assert_eq!(report.assignments.len(), 3);
//! assert_eq!(report.unwanted(), 0);
//! ```

pub mod chain;
pub mod config;
pub mod cost;
pub mod error;
pub mod ga;
pub mod matching;
pub mod model;
pub mod neighborhood;
pub mod pipeline;
pub mod problem;
pub mod random;
pub mod report;
pub mod sa;
pub mod solution;
pub mod swap;
pub mod tabu;

#[cfg(test)]
mod testing;

pub use config::OptimizerConfig;
pub use error::{ConfigError, Error, InfeasibilityWarning, ValidationError};
pub use pipeline::{Optimizer, Strategy};
pub use report::OptimizationReport;
