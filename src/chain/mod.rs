//! Chain exchange search.
//!
//! Repairs unwanted placements with chains of 2..K simultaneous moves: a
//! student on an unwanted slot takes a preferred slot from its occupant,
//! who in turn takes another slot, until the chain closes on the freed slot
//! or a vacancy. Reaches improvements a single swap cannot.
//!
//! - [`ChainConfig`]: chain length, expansion and pass budgets
//! - [`ChainExchangeEngine`]: breadth-first search and application
//! - [`ExchangeCycle`]: one applied chain

mod config;
mod runner;
mod types;

pub use config::ChainConfig;
pub use runner::ChainExchangeEngine;
pub use types::{ChainKind, ChainResult, ExchangeCycle};
