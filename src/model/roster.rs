//! Teacher availability and per-day capacity.
//!
//! When a roster is active every occupied slot must be covered by a
//! teacher available on that day, and a teacher covers at most
//! `daily_capacity` slots per day. The capacity of a day is therefore the
//! sum of its available teachers' daily capacities.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::slot::{Day, SlotId, Timetable};
use crate::error::ValidationError;

/// One teacher's weekly availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub name: String,
    pub days: Vec<Day>,
    pub daily_capacity: usize,
}

impl Teacher {
    pub fn new(name: impl Into<String>, days: Vec<Day>, daily_capacity: usize) -> Self {
        Self {
            name: name.into(),
            days,
            daily_capacity,
        }
    }

    pub fn is_available(&self, day: Day) -> bool {
        self.days.contains(&day)
    }
}

/// The set of teachers bounding day capacity.
///
/// # Examples
///
/// ```
/// use u_slotmatch::model::{Day, Teacher, TeacherRoster};
///
/// let roster = TeacherRoster::new(vec![
///     Teacher::new("t1", vec![Day::Tue, Day::Wed], 3),
///     Teacher::new("t2", vec![Day::Wed], 2),
/// ]);
/// assert_eq!(roster.day_capacity(Day::Tue), 3);
/// assert_eq!(roster.day_capacity(Day::Wed), 5);
/// assert_eq!(roster.day_capacity(Day::Fri), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRoster {
    pub teachers: Vec<Teacher>,
}

impl TeacherRoster {
    pub fn new(teachers: Vec<Teacher>) -> Self {
        Self { teachers }
    }

    /// Cycles availability patterns over `count` teachers named `t1..tN`.
    ///
    /// Mirrors the rotating "one day off" patterns commonly used to staff a
    /// four-day week.
    pub fn rotating(count: usize, patterns: &[Vec<Day>], daily_capacity: usize) -> Self {
        let teachers = (0..count)
            .filter_map(|i| {
                let days = patterns.get(i % patterns.len().max(1))?.clone();
                Some(Teacher::new(format!("t{}", i + 1), days, daily_capacity))
            })
            .collect();
        Self { teachers }
    }

    pub fn validate(&self, timetable: &Timetable) -> Result<(), ValidationError> {
        let mut names = HashSet::with_capacity(self.teachers.len());
        for teacher in &self.teachers {
            if !names.insert(teacher.name.as_str()) {
                return Err(ValidationError::DuplicateTeacher(teacher.name.clone()));
            }
            if let Some(&day) = teacher.days.iter().find(|d| !timetable.days().contains(d)) {
                return Err(ValidationError::UnknownTeacherDay {
                    teacher: teacher.name.clone(),
                    day,
                });
            }
        }
        Ok(())
    }

    /// Total number of slots that can be staffed on `day`.
    pub fn day_capacity(&self, day: Day) -> usize {
        self.teachers
            .iter()
            .filter(|t| t.is_available(day))
            .map(|t| t.daily_capacity)
            .sum()
    }

    /// Assigns a concrete teacher to each occupied slot.
    ///
    /// Slots are staffed day by day in order; each teacher takes slots until
    /// their daily capacity is used up. Slots that cannot be covered (only
    /// possible when the day capacity is exceeded) are omitted.
    pub fn staff(&self, occupied: &[SlotId]) -> BTreeMap<SlotId, String> {
        let mut by_day: BTreeMap<Day, Vec<SlotId>> = BTreeMap::new();
        for &slot in occupied {
            by_day.entry(slot.day).or_default().push(slot);
        }

        let mut staffing = BTreeMap::new();
        for (day, mut slots) in by_day {
            slots.sort();
            let mut remaining = slots.into_iter();
            'teachers: for teacher in self.teachers.iter().filter(|t| t.is_available(day)) {
                for _ in 0..teacher.daily_capacity {
                    match remaining.next() {
                        Some(slot) => {
                            staffing.insert(slot, teacher.name.clone());
                        }
                        None => break 'teachers,
                    }
                }
            }
        }
        staffing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotating_patterns() {
        let patterns = vec![vec![Day::Tue, Day::Wed], vec![Day::Thu]];
        let roster = TeacherRoster::rotating(3, &patterns, 2);
        assert_eq!(roster.teachers.len(), 3);
        assert_eq!(roster.teachers[2].days, vec![Day::Tue, Day::Wed]);
        assert_eq!(roster.day_capacity(Day::Tue), 4);
        assert_eq!(roster.day_capacity(Day::Thu), 2);
    }

    #[test]
    fn test_validate_rejects_unknown_day() {
        let roster = TeacherRoster::new(vec![Teacher::new("t1", vec![Day::Mon], 1)]);
        let err = roster.validate(&Timetable::default()).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownTeacherDay { .. }));
    }

    #[test]
    fn test_validate_rejects_duplicate_teacher() {
        let roster = TeacherRoster::new(vec![
            Teacher::new("t1", vec![Day::Tue], 1),
            Teacher::new("t1", vec![Day::Wed], 1),
        ]);
        assert!(matches!(
            roster.validate(&Timetable::default()),
            Err(ValidationError::DuplicateTeacher(_))
        ));
    }

    #[test]
    fn test_staff_respects_daily_capacity() {
        let roster = TeacherRoster::new(vec![
            Teacher::new("t1", vec![Day::Tue], 2),
            Teacher::new("t2", vec![Day::Tue], 1),
        ]);
        let slots: Vec<SlotId> = [10, 11, 12].iter().map(|&h| SlotId::new(Day::Tue, h)).collect();
        let staffing = roster.staff(&slots);
        assert_eq!(staffing.len(), 3);
        assert_eq!(staffing.values().filter(|t| *t == "t1").count(), 2);
        assert_eq!(staffing.values().filter(|t| *t == "t2").count(), 1);
    }

    #[test]
    fn test_staff_omits_uncovered_slots() {
        let roster = TeacherRoster::new(vec![Teacher::new("t1", vec![Day::Tue], 1)]);
        let slots = vec![SlotId::new(Day::Tue, 10), SlotId::new(Day::Tue, 11)];
        assert_eq!(roster.staff(&slots).len(), 1);
    }
}
