//! Refinement strategies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A refiner the pipeline can run after the baseline match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Pairwise swap descent.
    Swap,
    /// Random block exchange.
    Block,
    /// Chain exchange search.
    Chain,
    /// Simulated annealing.
    Annealing,
    /// Tabu search.
    Tabu,
    /// Genetic population search.
    Genetic,
}

impl Strategy {
    /// Cheapest first.
    pub const DEFAULT_ORDER: [Strategy; 6] = [
        Strategy::Swap,
        Strategy::Block,
        Strategy::Chain,
        Strategy::Annealing,
        Strategy::Tabu,
        Strategy::Genetic,
    ];

    /// Whether the strategy draws random numbers.
    pub fn is_stochastic(self) -> bool {
        matches!(
            self,
            Strategy::Block | Strategy::Annealing | Strategy::Tabu | Strategy::Genetic
        )
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Swap => "swap",
            Strategy::Block => "block",
            Strategy::Chain => "chain",
            Strategy::Annealing => "annealing",
            Strategy::Tabu => "tabu",
            Strategy::Genetic => "genetic",
        };
        f.write_str(name)
    }
}
