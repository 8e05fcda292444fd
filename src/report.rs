//! Serializable optimization output.
//!
//! An [`OptimizationReport`] is the single value handed to whatever renders
//! or persists results: the final assignments with their ranks and teachers,
//! the per-rank statistics, warnings and a trace of every strategy run.

use serde::{Deserialize, Serialize};

use crate::error::InfeasibilityWarning;
use crate::model::{Day, Rank, SlotId};
use crate::pipeline::Strategy;
use crate::problem::Instance;
use crate::solution::{Evaluation, Solution};

/// One student's final placement.
///
/// Records can be read back with
/// [`Solution::from_records`](crate::solution::Solution::from_records).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub student: String,
    pub day: Day,
    pub hour: u8,
    pub rank: Rank,
    /// Staffing teacher, present only when a roster is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
}

impl AssignmentRecord {
    pub fn slot(&self) -> SlotId {
        SlotId::new(self.day, self.hour)
    }
}

/// Count and share of students in one rank bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankShare {
    pub rank: Rank,
    pub count: usize,
    /// Percent of all students, assigned or not.
    pub percentage: f64,
}

/// Summary statistics of a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionStatistics {
    pub students: usize,
    /// First, second, third, unwanted, in that order.
    pub ranks: Vec<RankShare>,
    pub unassigned: usize,
    pub weighted_score: i64,
}

impl SolutionStatistics {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        let ranks = [Rank::First, Rank::Second, Rank::Third, Rank::Unwanted]
            .into_iter()
            .map(|rank| RankShare {
                rank,
                count: evaluation.count(rank),
                percentage: evaluation.percentage(rank),
            })
            .collect();
        Self {
            students: evaluation.assigned() + evaluation.unassigned(),
            ranks,
            unassigned: evaluation.unassigned(),
            weighted_score: evaluation.weighted_score(),
        }
    }

    pub fn share(&self, rank: Rank) -> Option<&RankShare> {
        self.ranks.iter().find(|share| share.rank == rank)
    }

    pub fn unwanted(&self) -> usize {
        self.share(Rank::Unwanted).map_or(0, |share| share.count)
    }
}

/// What one refinement strategy achieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub unwanted_before: usize,
    pub unwanted_after: usize,
    /// The strategy's result replaced the running best.
    pub accepted: bool,
    pub reached_ideal: bool,
    /// Passes, iterations or generations, depending on the engine.
    pub iterations: usize,
}

/// Final result of [`Optimizer::optimize`](crate::pipeline::Optimizer::optimize).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    /// Eligible days the solution was built over.
    pub days: Vec<Day>,
    /// Ordered by day, then hour.
    pub assignments: Vec<AssignmentRecord>,
    /// Names of students left without a slot.
    pub unassigned: Vec<String>,
    pub statistics: SolutionStatistics,
    pub reached_ideal: bool,
    pub warnings: Vec<InfeasibilityWarning>,
    pub strategies: Vec<StrategyOutcome>,
}

impl OptimizationReport {
    /// Builds the report for `solution`, staffing occupied slots from the
    /// instance's roster when one is active.
    pub fn build(
        instance: &Instance,
        solution: &Solution,
        evaluation: &Evaluation,
        warnings: Vec<InfeasibilityWarning>,
        strategies: Vec<StrategyOutcome>,
    ) -> Self {
        let occupied: Vec<SlotId> = solution
            .as_slice()
            .iter()
            .flatten()
            .map(|&t| instance.slot(t))
            .collect();
        let staffing = instance.roster().map(|roster| roster.staff(&occupied));

        let mut assignments: Vec<AssignmentRecord> = solution
            .assignments(instance)
            .map(|a| AssignmentRecord {
                student: instance.student(a.student).name().to_string(),
                day: a.slot.day,
                hour: a.slot.hour,
                rank: a.rank,
                teacher: staffing.as_ref().and_then(|s| s.get(&a.slot).cloned()),
            })
            .collect();
        assignments.sort_by_key(|record| record.slot());

        let unassigned = solution
            .unassigned()
            .map(|s| instance.student(s).name().to_string())
            .collect();

        Self {
            days: instance.days().to_vec(),
            assignments,
            unassigned,
            statistics: SolutionStatistics::from_evaluation(evaluation),
            reached_ideal: evaluation.is_ideal(),
            warnings,
            strategies,
        }
    }

    pub fn unwanted(&self) -> usize {
        self.statistics.unwanted()
    }

    /// The record for a student, if they were assigned.
    pub fn assignment_of(&self, student: &str) -> Option<&AssignmentRecord> {
        self.assignments.iter().find(|a| a.student == student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostTable;
    use crate::model::{PreferenceModel, StudentRecord, Teacher, TeacherRoster, Timetable};
    use crate::solution::SolutionEvaluator;

    fn instance(roster: Option<&TeacherRoster>) -> Instance {
        let tue = |h| SlotId::new(Day::Tue, h);
        let model = PreferenceModel::from_records(
            vec![
                StudentRecord::new("ana", tue(10), tue(11), tue(12)),
                StudentRecord::new("ben", tue(10), tue(11), tue(12)),
                StudentRecord::new("cho", tue(14), tue(15), tue(16)),
            ],
            Timetable::new(vec![Day::Tue], vec![10, 11, 12, 14, 15, 16, 17]),
        )
        .unwrap();
        Instance::new(&model, CostTable::default(), roster).unwrap()
    }

    #[test]
    fn test_statistics_cover_all_buckets() {
        let inst = instance(None);
        // ana -> Tue 11 (second), ben -> Tue 17 (unwanted), cho unassigned
        let sol = Solution::new(vec![Some(1), Some(6), None]);
        let eval = SolutionEvaluator::new(&inst).evaluate(&sol);
        let stats = SolutionStatistics::from_evaluation(&eval);

        assert_eq!(stats.students, 3);
        assert_eq!(stats.ranks.len(), 4);
        assert_eq!(stats.share(Rank::Second).unwrap().count, 1);
        assert_eq!(stats.unwanted(), 1);
        assert_eq!(stats.unassigned, 1);
        let pct = stats.share(Rank::Unwanted).unwrap().percentage;
        assert!((pct - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_orders_assignments_and_names_unassigned() {
        let inst = instance(None);
        let sol = Solution::new(vec![Some(4), Some(0), None]);
        let eval = SolutionEvaluator::new(&inst).evaluate(&sol);
        let report = OptimizationReport::build(&inst, &sol, &eval, vec![], vec![]);

        let order: Vec<&str> = report.assignments.iter().map(|a| a.student.as_str()).collect();
        assert_eq!(order, vec!["ben", "ana"]);
        assert_eq!(report.unassigned, vec!["cho".to_string()]);
        assert_eq!(report.assignment_of("ben").unwrap().rank, Rank::First);
        assert!(report.assignments.iter().all(|a| a.teacher.is_none()));
    }

    #[test]
    fn test_report_staffs_from_roster() {
        let roster = TeacherRoster::new(vec![
            Teacher::new("kim", vec![Day::Tue], 1),
            Teacher::new("lee", vec![Day::Tue], 2),
        ]);
        let inst = instance(Some(&roster));
        let sol = Solution::new(vec![Some(0), Some(1), Some(3)]);
        let eval = SolutionEvaluator::new(&inst).evaluate(&sol);
        let report = OptimizationReport::build(&inst, &sol, &eval, vec![], vec![]);

        let teachers: Vec<&str> = report
            .assignments
            .iter()
            .map(|a| a.teacher.as_deref().unwrap())
            .collect();
        assert_eq!(teachers, vec!["kim", "lee", "lee"]);
        assert!(report.reached_ideal);
    }
}
