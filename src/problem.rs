//! The derived, engine-facing problem instance.
//!
//! An [`Instance`] fixes the eligible slots (a day restriction of the
//! timetable), precomputes each student's reachable preferred slots and the
//! cost matrix, and carries the per-day capacity when a teacher roster is
//! active. Every engine reads it immutably.

use std::collections::BTreeMap;

use crate::cost::{CostMatrix, CostMatrixBuilder, CostTable};
use crate::error::ValidationError;
use crate::model::{Day, PreferenceModel, Rank, SlotId, Student, TeacherRoster, Timetable};

/// Immutable problem data shared by the matcher, evaluator and refiners.
#[derive(Debug, Clone)]
pub struct Instance {
    timetable: Timetable,
    students: Vec<Student>,
    slots: Vec<SlotId>,
    days: Vec<Day>,
    slot_day: Vec<usize>,
    preferred: Vec<Vec<(usize, Rank)>>,
    day_capacity: Option<Vec<usize>>,
    roster: Option<TeacherRoster>,
    costs: CostTable,
    matrix: CostMatrix,
}

impl Instance {
    /// Instance over every day of the model's timetable.
    pub fn new(
        model: &PreferenceModel,
        costs: CostTable,
        roster: Option<&TeacherRoster>,
    ) -> Result<Self, ValidationError> {
        Self::for_days(model, model.timetable().days(), costs, roster)
    }

    /// Instance restricted to `days`.
    pub fn for_days(
        model: &PreferenceModel,
        days: &[Day],
        costs: CostTable,
        roster: Option<&TeacherRoster>,
    ) -> Result<Self, ValidationError> {
        let timetable = model.timetable().clone();
        let slots = timetable.slots_on(days);
        if slots.is_empty() {
            return Err(ValidationError::NoEligibleSlots);
        }

        let mut eligible_days: Vec<Day> = slots.iter().map(|s| s.day).collect();
        eligible_days.dedup();
        let slot_day = slots
            .iter()
            .map(|s| eligible_days.iter().position(|&d| d == s.day).unwrap_or(0))
            .collect();

        let mut builder = CostMatrixBuilder::new(costs);
        let day_capacity = match roster {
            Some(roster) => {
                roster.validate(&timetable)?;
                let caps: BTreeMap<Day, usize> = eligible_days
                    .iter()
                    .map(|&d| (d, roster.day_capacity(d)))
                    .collect();
                builder = builder.with_day_capacity(caps.clone());
                Some(eligible_days.iter().map(|d| caps[d]).collect())
            }
            None => None,
        };

        let students = model.students().to_vec();
        let matrix = builder.build(&students, &timetable, &slots)?;

        let preferred = students
            .iter()
            .map(|student| {
                student
                    .preferences()
                    .iter()
                    .enumerate()
                    .filter_map(|(pos, pref)| {
                        slots
                            .iter()
                            .position(|s| s == pref)
                            .map(|idx| (idx, Rank::from_position(pos)))
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            timetable,
            students,
            slots,
            days: eligible_days,
            slot_day,
            preferred,
            day_capacity,
            roster: roster.cloned(),
            costs,
            matrix,
        })
    }

    /// Same students and slots under a different cost table.
    pub fn with_costs(&self, costs: CostTable) -> Result<Self, ValidationError> {
        let mut builder = CostMatrixBuilder::new(costs);
        if let Some(caps) = &self.day_capacity {
            builder = builder.with_day_capacity(
                self.days.iter().copied().zip(caps.iter().copied()).collect(),
            );
        }
        let matrix = builder.build(&self.students, &self.timetable, &self.slots)?;
        Ok(Self {
            costs,
            matrix,
            ..self.clone()
        })
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, idx: usize) -> &Student {
        &self.students[idx]
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn slots(&self) -> &[SlotId] {
        &self.slots
    }

    pub fn slot(&self, idx: usize) -> SlotId {
        self.slots[idx]
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Eligible days in calendar order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Index into [`days`](Self::days) of the slot's day.
    pub fn day_of(&self, slot: usize) -> usize {
        self.slot_day[slot]
    }

    /// Staffable slot count for an eligible day, `None` without a roster.
    pub fn day_capacity(&self, day: usize) -> Option<usize> {
        self.day_capacity.as_ref().map(|caps| caps[day])
    }

    pub fn has_capacity_limits(&self) -> bool {
        self.day_capacity.is_some()
    }

    /// Whether a student may ever occupy the slot.
    pub fn is_open(&self, slot: usize) -> bool {
        self.day_capacity(self.day_of(slot)).is_none_or(|cap| cap > 0)
    }

    pub fn roster(&self) -> Option<&TeacherRoster> {
        self.roster.as_ref()
    }

    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// Rank of an eligible slot for a student. Pure in both arguments.
    pub fn rank(&self, student: usize, slot: usize) -> Rank {
        self.students[student].rank_of(self.slots[slot])
    }

    /// Reachable preferred slots of a student, best rank first.
    pub fn preferred_slots(&self, student: usize) -> &[(usize, Rank)] {
        &self.preferred[student]
    }
}
