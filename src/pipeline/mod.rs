//! End-to-end optimization pipeline.
//!
//! [`Optimizer`] builds the instance, computes the exact baseline and runs
//! the configured [`Strategy`] sequence, each refiner starting from the best
//! solution so far. A refiner's result replaces the running best only when
//! the evaluator ranks it strictly better.
//!
//! [`Optimizer::optimize_day_combinations`] repeats this for every
//! `k`-subset of the timetable's days and keeps the best subset.

mod runner;
mod types;

pub use runner::Optimizer;
pub use types::Strategy;
