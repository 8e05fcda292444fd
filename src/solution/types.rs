//! Solution value object and its assignment view.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::ValidationError;
use crate::model::{Rank, SlotId};
use crate::problem::Instance;
use crate::report::AssignmentRecord;

/// One `(student, slot, rank)` triple derived from a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub student: usize,
    pub slot: SlotId,
    pub rank: Rank,
}

/// A loaded record whose stated rank disagrees with the student's
/// preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankMismatch {
    pub student: String,
    pub slot: SlotId,
    pub recorded: Rank,
    pub actual: Rank,
}

/// A partial injective mapping from students to eligible slots.
///
/// Indexed by student; `None` means unassigned. Refiners never mutate a
/// solution they received: moves return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    slots: Vec<Option<usize>>,
}

impl Solution {
    pub fn new(slots: Vec<Option<usize>>) -> Self {
        Self { slots }
    }

    /// Every student unassigned.
    pub fn empty(students: usize) -> Self {
        Self {
            slots: vec![None; students],
        }
    }

    /// Rebuilds a solution from previously exported assignment records.
    ///
    /// Students without a record are unassigned. Ranks are recomputed from
    /// the instance; records whose stated rank differs are returned as
    /// mismatches rather than rejected.
    ///
    /// # Errors
    ///
    /// Unknown students, students listed twice, slots that are not open
    /// eligible slots, and slots held by two students.
    pub fn from_records(
        instance: &Instance,
        records: &[AssignmentRecord],
    ) -> Result<(Self, Vec<RankMismatch>), ValidationError> {
        let students: HashMap<&str, usize> = instance
            .students()
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name(), i))
            .collect();
        let slots: HashMap<SlotId, usize> = instance
            .slots()
            .iter()
            .enumerate()
            .map(|(t, &slot)| (slot, t))
            .collect();

        let mut assigned = vec![None; instance.student_count()];
        let mut holders: Vec<Option<usize>> = vec![None; instance.slot_count()];
        let mut mismatches = Vec::new();

        for record in records {
            let student = *students
                .get(record.student.as_str())
                .ok_or_else(|| ValidationError::UnknownStudent(record.student.clone()))?;
            if assigned[student].is_some() {
                return Err(ValidationError::StudentAssignedTwice(record.student.clone()));
            }

            let slot = record.slot();
            let t = slots
                .get(&slot)
                .copied()
                .filter(|&t| instance.is_open(t))
                .ok_or_else(|| ValidationError::IneligibleSlot {
                    student: record.student.clone(),
                    slot,
                })?;
            if let Some(first) = holders[t] {
                return Err(ValidationError::SlotReused {
                    slot,
                    first: instance.student(first).name().to_string(),
                    second: record.student.clone(),
                });
            }
            holders[t] = Some(student);
            assigned[student] = Some(t);

            let actual = instance.rank(student, t);
            if actual != record.rank {
                mismatches.push(RankMismatch {
                    student: record.student.clone(),
                    slot,
                    recorded: record.rank,
                    actual,
                });
            }
        }

        Ok((Self { slots: assigned }, mismatches))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot_of(&self, student: usize) -> Option<usize> {
        self.slots[student]
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.slots
    }

    pub fn assigned_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Students without a slot.
    pub fn unassigned(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
    }

    /// Slot → occupant index.
    pub fn occupancy(&self, slot_count: usize) -> Vec<Option<usize>> {
        let mut occ = vec![None; slot_count];
        for (student, slot) in self.slots.iter().enumerate() {
            if let Some(t) = *slot {
                occ[t] = Some(student);
            }
        }
        occ
    }

    /// Occupied slot count per eligible day.
    pub fn day_loads(&self, instance: &Instance) -> Vec<usize> {
        let mut loads = vec![0; instance.days().len()];
        for &t in self.slots.iter().flatten() {
            loads[instance.day_of(t)] += 1;
        }
        loads
    }

    /// New solution with the slots of `a` and `b` exchanged.
    pub fn swapped(&self, a: usize, b: usize) -> Self {
        let mut slots = self.slots.clone();
        slots.swap(a, b);
        Self { slots }
    }

    /// New solution with every `(student, slot)` reassignment applied at once.
    pub fn reassigned(&self, moves: &[(usize, Option<usize>)]) -> Self {
        let mut slots = self.slots.clone();
        for &(student, slot) in moves {
            slots[student] = slot;
        }
        Self { slots }
    }

    /// Assignment view with ranks recomputed from the instance.
    pub fn assignments<'a>(&'a self, instance: &'a Instance) -> impl Iterator<Item = Assignment> + 'a {
        self.slots.iter().enumerate().filter_map(move |(student, slot)| {
            slot.map(|t| Assignment {
                student,
                slot: instance.slot(t),
                rank: instance.rank(student, t),
            })
        })
    }

    /// No slot used twice and every slot index in range.
    pub fn is_injective(&self, slot_count: usize) -> bool {
        let mut used = vec![false; slot_count];
        for &t in self.slots.iter().flatten() {
            if t >= slot_count || used[t] {
                return false;
            }
            used[t] = true;
        }
        true
    }

    /// Injective, sized to the instance, only open slots, and every day
    /// within its teacher capacity.
    pub fn is_valid(&self, instance: &Instance) -> bool {
        if self.slots.len() != instance.student_count() || !self.is_injective(instance.slot_count()) {
            return false;
        }
        if self.slots.iter().flatten().any(|&t| !instance.is_open(t)) {
            return false;
        }
        self.day_loads(instance)
            .iter()
            .enumerate()
            .all(|(day, &load)| instance.day_capacity(day).is_none_or(|cap| load <= cap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostTable;
    use crate::model::{Day, PreferenceModel, StudentRecord, Timetable};
    use crate::report::OptimizationReport;
    use crate::solution::SolutionEvaluator;

    fn tue_instance() -> Instance {
        let tue = |h| SlotId::new(Day::Tue, h);
        let model = PreferenceModel::from_records(
            vec![
                StudentRecord::new("ana", tue(10), tue(11), tue(12)),
                StudentRecord::new("ben", tue(11), tue(10), tue(12)),
                StudentRecord::new("cho", tue(14), tue(15), tue(16)),
            ],
            Timetable::new(vec![Day::Tue], vec![10, 11, 12, 14, 15, 16, 17]),
        )
        .unwrap();
        Instance::new(&model, CostTable::default(), None).unwrap()
    }

    fn exported(inst: &Instance, sol: &Solution) -> Vec<AssignmentRecord> {
        let eval = SolutionEvaluator::new(inst).evaluate(sol);
        OptimizationReport::build(inst, sol, &eval, vec![], vec![]).assignments
    }

    fn record(student: &str, hour: u8, rank: Rank) -> AssignmentRecord {
        AssignmentRecord {
            student: student.into(),
            day: Day::Tue,
            hour,
            rank,
            teacher: None,
        }
    }

    #[test]
    fn test_swapped_returns_new_value() {
        let s = Solution::new(vec![Some(0), Some(1), None]);
        let t = s.swapped(0, 2);
        assert_eq!(s.as_slice(), &[Some(0), Some(1), None]);
        assert_eq!(t.as_slice(), &[None, Some(1), Some(0)]);
    }

    #[test]
    fn test_injectivity() {
        assert!(Solution::new(vec![Some(0), Some(2), None]).is_injective(3));
        assert!(!Solution::new(vec![Some(1), Some(1)]).is_injective(3));
        assert!(!Solution::new(vec![Some(5)]).is_injective(3));
    }

    #[test]
    fn test_occupancy_and_unassigned() {
        let s = Solution::new(vec![Some(2), None, Some(0)]);
        assert_eq!(s.occupancy(3), vec![Some(2), None, Some(0)]);
        assert_eq!(s.unassigned().collect::<Vec<_>>(), vec![1]);
        assert_eq!(s.assigned_count(), 2);
    }

    #[test]
    fn test_reassigned_applies_simultaneously() {
        let s = Solution::new(vec![Some(0), Some(1), Some(2)]);
        let cycled = s.reassigned(&[(0, Some(1)), (1, Some(2)), (2, Some(0))]);
        assert_eq!(cycled.as_slice(), &[Some(1), Some(2), Some(0)]);
        assert!(cycled.is_injective(3));
    }

    #[test]
    fn test_from_records_restores_exported_solution() {
        let inst = tue_instance();
        let sol = Solution::new(vec![Some(0), Some(1), None]);
        let (loaded, mismatches) = Solution::from_records(&inst, &exported(&inst, &sol)).unwrap();
        assert_eq!(loaded, sol);
        assert!(mismatches.is_empty());
    }

    #[test]
    fn test_from_records_reports_tampered_rank() {
        let inst = tue_instance();
        let sol = Solution::new(vec![Some(0), Some(6), Some(3)]);
        let mut records = exported(&inst, &sol);
        let ben = records.iter_mut().find(|r| r.student == "ben").unwrap();
        assert_eq!(ben.rank, Rank::Unwanted);
        ben.rank = Rank::First;

        let (loaded, mismatches) = Solution::from_records(&inst, &records).unwrap();
        assert_eq!(loaded, sol);
        assert_eq!(
            mismatches,
            vec![RankMismatch {
                student: "ben".into(),
                slot: SlotId::new(Day::Tue, 17),
                recorded: Rank::First,
                actual: Rank::Unwanted,
            }]
        );
    }

    #[test]
    fn test_from_records_rejects_unknown_student() {
        let inst = tue_instance();
        let err = Solution::from_records(&inst, &[record("dan", 10, Rank::First)]).unwrap_err();
        assert_eq!(err, ValidationError::UnknownStudent("dan".into()));
    }

    #[test]
    fn test_from_records_rejects_reused_slot() {
        let inst = tue_instance();
        let records = [record("ana", 10, Rank::First), record("ben", 10, Rank::Second)];
        let err = Solution::from_records(&inst, &records).unwrap_err();
        assert!(matches!(err, ValidationError::SlotReused { ref first, ref second, .. }
            if first == "ana" && second == "ben"));
    }

    #[test]
    fn test_from_records_rejects_ineligible_slot() {
        let inst = tue_instance();
        let mut off_day = record("ana", 10, Rank::First);
        off_day.day = Day::Wed;
        assert!(matches!(
            Solution::from_records(&inst, &[off_day]),
            Err(ValidationError::IneligibleSlot { .. })
        ));
        assert!(matches!(
            Solution::from_records(&inst, &[record("ana", 13, Rank::Unwanted)]),
            Err(ValidationError::IneligibleSlot { .. })
        ));
    }

    #[test]
    fn test_from_records_rejects_duplicate_student() {
        let inst = tue_instance();
        let records = [record("ana", 10, Rank::First), record("ana", 11, Rank::Second)];
        assert_eq!(
            Solution::from_records(&inst, &records).unwrap_err(),
            ValidationError::StudentAssignedTwice("ana".into())
        );
    }
}
