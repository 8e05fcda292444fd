//! Scoring and comparison of candidate solutions.
//!
//! Every engine ranks candidates with [`Evaluation::is_better_than`]:
//! fewer unassigned students first, then fewer unwanted placements, then a
//! higher weighted score (3 / 2 / 1 / 0 points per rank).

use std::cmp::Ordering;

use serde::Serialize;

use super::types::Solution;
use crate::model::Rank;
use crate::problem::Instance;

/// Per-rank counts and weighted score of one solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    counts: [usize; 4],
    unassigned: usize,
    weighted_score: i64,
}

impl Evaluation {
    pub fn count(&self, rank: Rank) -> usize {
        self.counts[rank.index()]
    }

    pub fn unwanted(&self) -> usize {
        self.count(Rank::Unwanted)
    }

    pub fn unassigned(&self) -> usize {
        self.unassigned
    }

    pub fn assigned(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Sum of [`Rank::points`] over all assignments.
    pub fn weighted_score(&self) -> i64 {
        self.weighted_score
    }

    /// Share of all students (assigned or not) in a rank bucket, in percent.
    pub fn percentage(&self, rank: Rank) -> f64 {
        let total = self.assigned() + self.unassigned;
        if total == 0 {
            0.0
        } else {
            self.count(rank) as f64 / total as f64 * 100.0
        }
    }

    /// No unwanted placements remain.
    pub fn is_ideal(&self) -> bool {
        self.unwanted() == 0
    }

    /// Quality ordering: `Less` means `self` is better.
    pub fn quality_cmp(&self, other: &Self) -> Ordering {
        self.unassigned
            .cmp(&other.unassigned)
            .then(self.unwanted().cmp(&other.unwanted()))
            .then(other.weighted_score.cmp(&self.weighted_score))
    }

    pub fn is_better_than(&self, other: &Self) -> bool {
        self.quality_cmp(other) == Ordering::Less
    }
}

/// Computes [`Evaluation`]s for solutions of one instance.
#[derive(Debug, Clone, Copy)]
pub struct SolutionEvaluator<'a> {
    instance: &'a Instance,
}

impl<'a> SolutionEvaluator<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    pub fn evaluate(&self, solution: &Solution) -> Evaluation {
        let mut counts = [0usize; 4];
        let mut unassigned = 0;
        let mut weighted_score = 0i64;
        for (student, slot) in solution.as_slice().iter().enumerate() {
            match slot {
                Some(t) => {
                    let rank = self.instance.rank(student, *t);
                    counts[rank.index()] += 1;
                    weighted_score += rank.points();
                }
                None => unassigned += 1,
            }
        }
        Evaluation {
            counts,
            unassigned,
            weighted_score,
        }
    }

    /// Number of assigned students whose slot is not a preference.
    pub fn unwanted(&self, solution: &Solution) -> usize {
        solution
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(s, slot)| slot.is_some_and(|t| self.instance.rank(*s, t) == Rank::Unwanted))
            .count()
    }

    /// Sum of the cost-table weights of all assignments.
    pub fn total_cost(&self, solution: &Solution) -> f64 {
        solution
            .assignments(self.instance)
            .map(|a| self.instance.costs().weight(a.rank))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostTable;
    use crate::model::{Day, PreferenceModel, SlotId, StudentRecord, Timetable};

    fn instance() -> Instance {
        let tue = |h| SlotId::new(Day::Tue, h);
        let model = PreferenceModel::from_records(
            vec![
                StudentRecord::new("a", tue(10), tue(11), tue(12)),
                StudentRecord::new("b", tue(10), tue(11), tue(12)),
                StudentRecord::new("c", tue(10), tue(11), tue(12)),
            ],
            Timetable::new(vec![Day::Tue], vec![10, 11, 12, 14]),
        )
        .unwrap();
        Instance::new(&model, CostTable::default(), None).unwrap()
    }

    #[test]
    fn test_counts_and_score() {
        let inst = instance();
        let eval = SolutionEvaluator::new(&inst);
        let e = eval.evaluate(&Solution::new(vec![Some(0), Some(2), Some(3)]));
        assert_eq!(e.count(Rank::First), 1);
        assert_eq!(e.count(Rank::Third), 1);
        assert_eq!(e.unwanted(), 1);
        assert_eq!(e.weighted_score(), 4);
        assert!((e.percentage(Rank::Unwanted) - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(eval.unwanted(&Solution::new(vec![Some(0), Some(2), Some(3)])), 1);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let inst = instance();
        let eval = SolutionEvaluator::new(&inst);
        let s = Solution::new(vec![Some(1), None, Some(3)]);
        assert_eq!(eval.evaluate(&s), eval.evaluate(&s));
    }

    #[test]
    fn test_ordering_prefers_fewer_unwanted_then_score() {
        let inst = instance();
        let eval = SolutionEvaluator::new(&inst);
        let good = eval.evaluate(&Solution::new(vec![Some(0), Some(1), Some(2)]));
        let worse = eval.evaluate(&Solution::new(vec![Some(0), Some(1), Some(3)]));
        let lower_score = eval.evaluate(&Solution::new(vec![Some(2), Some(1), Some(0)]));
        assert!(good.is_better_than(&worse));
        assert!(!worse.is_better_than(&good));
        assert_eq!(good.unwanted(), lower_score.unwanted());
        assert_eq!(good.weighted_score(), lower_score.weighted_score());
        assert!(!good.is_better_than(&lower_score));
    }

    #[test]
    fn test_unassigned_dominates() {
        let inst = instance();
        let eval = SolutionEvaluator::new(&inst);
        let full = eval.evaluate(&Solution::new(vec![Some(3), Some(1), Some(2)]));
        let partial = eval.evaluate(&Solution::new(vec![Some(0), Some(1), None]));
        assert!(full.is_better_than(&partial));
    }
}
