//! Pairwise swap neighborhood shared by the local-search engines.
//!
//! A [`SwapMove`] exchanges the slots of two students. It never changes the
//! set of occupied slots, so injectivity and day capacities hold after any
//! sequence of swaps.

use rand::Rng;

use crate::model::Rank;
use crate::problem::Instance;
use crate::solution::Solution;

/// Probability that a random swap starts from a priority student.
pub const PRIORITY_BIAS: f64 = 0.8;

const MAX_DRAWS: usize = 16;

/// Exchange of the slots held by students `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapMove {
    pub a: usize,
    pub b: usize,
}

impl SwapMove {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    pub fn apply(&self, solution: &Solution) -> Solution {
        solution.swapped(self.a, self.b)
    }

    /// A swap between two unassigned students changes nothing.
    pub fn is_effective(&self, solution: &Solution) -> bool {
        self.a != self.b && (solution.slot_of(self.a).is_some() || solution.slot_of(self.b).is_some())
    }
}

/// Students in unwanted placements, ascending.
pub fn unwanted_students(instance: &Instance, solution: &Solution) -> Vec<usize> {
    students_with(instance, solution, |rank| rank == Rank::Unwanted)
}

/// Search focus: unwanted students, else second/third-choice students, else
/// everyone.
pub fn priority_students(instance: &Instance, solution: &Solution) -> Vec<usize> {
    let unwanted = unwanted_students(instance, solution);
    if !unwanted.is_empty() {
        return unwanted;
    }
    let compromised = students_with(instance, solution, |rank| {
        matches!(rank, Rank::Second | Rank::Third)
    });
    if !compromised.is_empty() {
        return compromised;
    }
    (0..solution.len()).collect()
}

fn students_with(
    instance: &Instance,
    solution: &Solution,
    keep: impl Fn(Rank) -> bool,
) -> Vec<usize> {
    (0..solution.len())
        .filter(|&s| solution.slot_of(s).is_some_and(|t| keep(instance.rank(s, t))))
        .collect()
}

/// Draws an effective swap, biased toward `priority` students.
///
/// Returns `None` when fewer than two students exist or no effective pair
/// turned up within a bounded number of draws.
pub fn random_swap<R: Rng>(
    solution: &Solution,
    priority: &[usize],
    rng: &mut R,
) -> Option<SwapMove> {
    let n = solution.len();
    if n < 2 {
        return None;
    }
    for _ in 0..MAX_DRAWS {
        let a = if !priority.is_empty() && rng.random_bool(PRIORITY_BIAS) {
            priority[rng.random_range(0..priority.len())]
        } else {
            rng.random_range(0..n)
        };
        let mut b = rng.random_range(0..n - 1);
        if b >= a {
            b += 1;
        }
        let mv = SwapMove::new(a, b);
        if mv.is_effective(solution) {
            return Some(mv);
        }
    }
    None
}
