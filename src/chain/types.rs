//! Exchange chains found by the search.

use serde::Serialize;

use crate::solution::Solution;

/// How a chain frees the slot its last member needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainKind {
    /// The last member takes the unwanted student's old slot.
    Cycle,
    /// The last member moves to a vacant slot; the unwanted student's old
    /// slot becomes vacant.
    Open,
}

/// A set of simultaneous reassignments rooted at one unwanted student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeCycle {
    /// Members in chain order; `students[0]` is the unwanted student.
    pub students: Vec<usize>,
    /// `(student, new slot)` for every member.
    pub moves: Vec<(usize, usize)>,
    pub kind: ChainKind,
    /// Members whose rank strictly improves.
    pub improved: usize,
}

impl ExchangeCycle {
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// New solution with every move applied at once.
    pub fn apply(&self, solution: &Solution) -> Solution {
        let moves: Vec<(usize, Option<usize>)> =
            self.moves.iter().map(|&(s, t)| (s, Some(t))).collect();
        solution.reassigned(&moves)
    }
}

/// Result of a chain exchange run.
#[derive(Debug, Clone)]
pub struct ChainResult {
    pub best: Solution,
    /// Exchanges applied, in order.
    pub applied: Vec<ExchangeCycle>,
    /// Students still unwanted at the end.
    pub unresolved: Vec<usize>,
    pub passes: usize,
    /// Node expansions over all searches.
    pub expansions: usize,
    pub reached_ideal: bool,
}
