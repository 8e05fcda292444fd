//! Students, their ranked preferences, and the validated preference model.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::slot::{SlotId, Timetable};
use crate::error::ValidationError;

/// Maximum number of ranked preferences per student.
pub const MAX_PREFERENCES: usize = 3;

/// Position of a slot in a student's preference list.
///
/// Ordered from best to worst, so `Rank::First < Rank::Unwanted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    First,
    Second,
    Third,
    Unwanted,
}

impl Rank {
    /// All ranks, best first.
    pub const ALL: [Rank; 4] = [Rank::First, Rank::Second, Rank::Third, Rank::Unwanted];

    /// Rank for a zero-based preference position.
    pub fn from_position(position: usize) -> Self {
        match position {
            0 => Rank::First,
            1 => Rank::Second,
            2 => Rank::Third,
            _ => Rank::Unwanted,
        }
    }

    /// Points used by the weighted score: 3 / 2 / 1 / 0.
    pub fn points(self) -> i64 {
        match self {
            Rank::First => 3,
            Rank::Second => 2,
            Rank::Third => 1,
            Rank::Unwanted => 0,
        }
    }

    pub fn is_preferred(self) -> bool {
        self != Rank::Unwanted
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rank::First => "1st choice",
            Rank::Second => "2nd choice",
            Rank::Third => "3rd choice",
            Rank::Unwanted => "unwanted",
        };
        f.write_str(label)
    }
}

/// A student and their ranked slot preferences (index 0 = rank 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    name: String,
    preferences: Vec<SlotId>,
}

impl Student {
    /// Creates a student without validating the preference list.
    ///
    /// Validation happens in [`PreferenceModel`] and in the cost matrix
    /// builder, so hand-built students are still checked before matching.
    pub fn new(name: impl Into<String>, preferences: Vec<SlotId>) -> Self {
        Self {
            name: name.into(),
            preferences,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preferences(&self) -> &[SlotId] {
        &self.preferences
    }

    /// Rank of `slot` for this student.
    pub fn rank_of(&self, slot: SlotId) -> Rank {
        self.preferences
            .iter()
            .position(|&s| s == slot)
            .map_or(Rank::Unwanted, Rank::from_position)
    }

    /// Checks preference count, uniqueness and timetable membership.
    pub fn validate(&self, timetable: &Timetable) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyStudentName);
        }
        if self.preferences.is_empty() {
            return Err(ValidationError::NoPreferences(self.name.clone()));
        }
        if self.preferences.len() > MAX_PREFERENCES {
            return Err(ValidationError::TooManyPreferences {
                student: self.name.clone(),
                count: self.preferences.len(),
            });
        }
        let mut seen = HashSet::with_capacity(self.preferences.len());
        for &slot in &self.preferences {
            if !timetable.contains(slot) {
                return Err(ValidationError::UnknownSlot {
                    student: self.name.clone(),
                    slot,
                });
            }
            if !seen.insert(slot) {
                return Err(ValidationError::DuplicatePreference {
                    student: self.name.clone(),
                    slot,
                });
            }
        }
        Ok(())
    }
}

/// An input row: a name plus up to three ranked slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub rank1: SlotId,
    #[serde(default)]
    pub rank2: Option<SlotId>,
    #[serde(default)]
    pub rank3: Option<SlotId>,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, rank1: SlotId, rank2: SlotId, rank3: SlotId) -> Self {
        Self {
            name: name.into(),
            rank1,
            rank2: Some(rank2),
            rank3: Some(rank3),
        }
    }

    fn into_student(self) -> Student {
        let preferences = std::iter::once(self.rank1)
            .chain(self.rank2)
            .chain(self.rank3)
            .collect();
        Student::new(self.name, preferences)
    }
}

/// Validated, immutable student preference data.
///
/// # Examples
///
/// ```
/// use u_slotmatch::model::{Day, PreferenceModel, SlotId, StudentRecord, Timetable};
///
/// let t = |h| SlotId::new(Day::Tue, h);
/// let model = PreferenceModel::from_records(
///     vec![StudentRecord::new("alice", t(10), t(11), t(12))],
///     Timetable::default(),
/// )
/// .unwrap();
/// assert_eq!(model.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceModel {
    timetable: Timetable,
    students: Vec<Student>,
}

impl PreferenceModel {
    /// Validates records against the timetable.
    ///
    /// Rejects empty or duplicate names, a missing rank-1 preference
    /// (unrepresentable in [`StudentRecord`]), duplicate preferences and
    /// slots outside the timetable.
    pub fn from_records(
        records: Vec<StudentRecord>,
        timetable: Timetable,
    ) -> Result<Self, ValidationError> {
        let students = records.into_iter().map(StudentRecord::into_student).collect();
        Self::from_students(students, timetable)
    }

    /// Validates already-built students against the timetable.
    pub fn from_students(
        students: Vec<Student>,
        timetable: Timetable,
    ) -> Result<Self, ValidationError> {
        let mut names = HashSet::with_capacity(students.len());
        for student in &students {
            student.validate(&timetable)?;
            if !names.insert(student.name()) {
                return Err(ValidationError::DuplicateStudent(student.name().to_string()));
            }
        }
        Ok(Self {
            timetable,
            students,
        })
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
