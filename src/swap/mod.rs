//! Pairwise swap descent.
//!
//! For each unwanted student, tries swapping slots with every other student
//! and moving into every vacant slot, accepting the first candidate the
//! evaluator ranks strictly better. Cheap and deterministic; runs first in
//! the default strategy order.
//!
//! [`BlockSwap`] is the randomized companion: it trades slots between two
//! disjoint blocks of students at once, escaping states where no single
//! swap helps.

mod block;
mod config;
mod runner;

pub use block::{BlockSwap, BlockSwapResult};
pub use config::{BlockSwapConfig, SwapConfig};
pub use runner::{SwapDescent, SwapResult};
