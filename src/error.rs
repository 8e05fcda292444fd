//! Error and warning types.
//!
//! Malformed input is rejected with [`ValidationError`] before any
//! optimization runs. Conditions that only limit the achievable result
//! (too few slots, a capacity-bound day) are reported as
//! [`InfeasibilityWarning`]s alongside the best feasible answer.

use serde::Serialize;
use thiserror::Error;

use crate::model::{Day, SlotId};

/// Malformed or out-of-domain input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("student name must not be empty")]
    EmptyStudentName,

    #[error("duplicate student name: {0}")]
    DuplicateStudent(String),

    #[error("student {0} has no ranked preferences")]
    NoPreferences(String),

    #[error("student {student} lists {count} preferences, at most 3 are allowed")]
    TooManyPreferences { student: String, count: usize },

    #[error("student {student} lists {slot} more than once")]
    DuplicatePreference { student: String, slot: SlotId },

    #[error("student {student} prefers {slot}, which is not in the timetable")]
    UnknownSlot { student: String, slot: SlotId },

    #[error("cost weights must be finite, got {name} = {value}")]
    NonFiniteWeight { name: &'static str, value: f64 },

    #[error(
        "cost weights must be strictly increasing (first < second < third < unwanted), got {first} / {second} / {third} / {unwanted}"
    )]
    WeightsNotIncreasing {
        first: f64,
        second: f64,
        third: f64,
        unwanted: f64,
    },

    #[error("cost weight magnitude {0} exceeds the supported maximum")]
    WeightOutOfRange(f64),

    #[error("teacher {0} is listed more than once")]
    DuplicateTeacher(String),

    #[error("teacher {teacher} is available on {day}, which is not in the timetable")]
    UnknownTeacherDay { teacher: String, day: Day },

    #[error("no eligible slots: none of the requested days are in the timetable")]
    NoEligibleSlots,

    #[error("assignment names unknown student {0}")]
    UnknownStudent(String),

    #[error("student {0} appears in more than one assignment")]
    StudentAssignedTwice(String),

    #[error("student {student} is assigned {slot}, which is not an eligible slot")]
    IneligibleSlot { student: String, slot: SlotId },

    #[error("{slot} is assigned to both {first} and {second}")]
    SlotReused {
        slot: SlotId,
        first: String,
        second: String,
    },
}

/// Configuration loading and parameter errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A non-fatal condition that prevents a perfect matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfeasibilityWarning {
    /// More students than usable slots; some must stay unassigned.
    SupplyShortage { students: usize, usable_slots: usize },

    /// Teacher capacity on a day is below the number of slots on it.
    CapacityBound {
        day: Day,
        capacity: usize,
        slots: usize,
    },
}

impl std::fmt::Display for InfeasibilityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InfeasibilityWarning::SupplyShortage {
                students,
                usable_slots,
            } => write!(
                f,
                "{students} students but only {usable_slots} usable slots"
            ),
            InfeasibilityWarning::CapacityBound {
                day,
                capacity,
                slots,
            } => write!(
                f,
                "{day}: teacher capacity {capacity} covers fewer than its {slots} slots"
            ),
        }
    }
}
