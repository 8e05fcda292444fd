//! Exact baseline matching.
//!
//! [`ExactMatcher`] pads the instance's Student×Slot cost matrix to a square
//! problem and solves it with the Hungarian algorithm. The result is
//! cost-optimal for that matrix; it does not guarantee the fewest unwanted
//! placements when capacity conflicts force trade-offs, which is what the
//! refiners are for.
//!
//! # References
//!
//! - Kuhn (1955), "The Hungarian Method for the Assignment Problem"
//! - Jonker & Volgenant (1987), "A Shortest Augmenting Path Algorithm for
//!   Dense and Sparse Linear Assignment Problems"

pub mod hungarian;
mod matcher;

pub use matcher::{ExactMatcher, MatchOutcome};
