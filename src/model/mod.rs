//! Input data model.
//!
//! - [`Timetable`], [`Day`], [`SlotId`]: the fixed universe of bookable slots
//! - [`Student`], [`StudentRecord`], [`PreferenceModel`]: validated ranked preferences
//! - [`Rank`]: first / second / third choice or unwanted
//! - [`TeacherRoster`]: optional per-day teacher capacity

mod roster;
mod slot;
mod student;

pub use roster::{Teacher, TeacherRoster};
pub use slot::{Day, SlotId, Timetable};
pub use student::{PreferenceModel, Rank, Student, StudentRecord, MAX_PREFERENCES};
