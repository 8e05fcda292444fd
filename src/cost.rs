//! Rank-dependent cost model and the Student×Slot cost matrix.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{Day, Rank, SlotId, Student, Timetable};

/// Largest accepted magnitude for a rank weight.
pub const MAX_WEIGHT: f64 = 1e6;

/// Cost of leaving a student unmatched (padding column). Above every rank
/// weight, below [`INFEASIBLE_COST`].
pub const UNASSIGNED_COST: f64 = 1e7;

/// Sentinel for structurally infeasible cells. Large but finite.
pub const INFEASIBLE_COST: f64 = 1e9;

/// Maps each [`Rank`] to a numeric cost. Lower is better.
///
/// # Examples
///
/// ```
/// use u_slotmatch::cost::CostTable;
///
/// assert!(CostTable::default().validate().is_ok());
/// assert!(CostTable::new(2.0, 1.0, 3.0, 4.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTable {
    pub first: f64,
    pub second: f64,
    pub third: f64,
    pub unwanted: f64,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            first: -300.0,
            second: -250.0,
            third: -200.0,
            unwanted: 5000.0,
        }
    }
}

impl CostTable {
    pub fn new(first: f64, second: f64, third: f64, unwanted: f64) -> Self {
        Self {
            first,
            second,
            third,
            unwanted,
        }
    }

    pub fn weight(&self, rank: Rank) -> f64 {
        match rank {
            Rank::First => self.first,
            Rank::Second => self.second,
            Rank::Third => self.third,
            Rank::Unwanted => self.unwanted,
        }
    }

    /// Returns a copy with the unwanted weight scaled by `factor`.
    ///
    /// The result is capped at [`MAX_WEIGHT`].
    pub fn with_unwanted_scaled(&self, factor: f64) -> Self {
        let spread = self.unwanted - self.third;
        Self {
            unwanted: (self.third + spread * factor).min(MAX_WEIGHT),
            ..*self
        }
    }

    /// Requires finite weights with `first < second < third < unwanted`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let named = [
            ("first", self.first),
            ("second", self.second),
            ("third", self.third),
            ("unwanted", self.unwanted),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteWeight { name, value });
            }
            if value.abs() > MAX_WEIGHT {
                return Err(ValidationError::WeightOutOfRange(value));
            }
        }
        if !(self.first < self.second && self.second < self.third && self.third < self.unwanted) {
            return Err(ValidationError::WeightsNotIncreasing {
                first: self.first,
                second: self.second,
                third: self.third,
                unwanted: self.unwanted,
            });
        }
        Ok(())
    }
}

/// Dense row-major cost matrix (students × slots).
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        debug_assert!(rows.iter().all(|r| r.len() == n_cols));
        Self {
            rows: n_rows,
            cols: n_cols,
            data: rows.into_iter().flatten().collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Whether the cell is at or above the infeasibility sentinel.
    pub fn is_infeasible(&self, row: usize, col: usize) -> bool {
        self.get(row, col) >= INFEASIBLE_COST
    }
}

/// Builds a [`CostMatrix`] from students and eligible slots.
///
/// # Examples
///
/// ```
/// use u_slotmatch::cost::{CostMatrixBuilder, CostTable};
/// use u_slotmatch::model::{Day, SlotId, Student, Timetable};
///
/// let slot = SlotId::new(Day::Tue, 10);
/// let students = vec![Student::new("a", vec![slot])];
/// let matrix = CostMatrixBuilder::new(CostTable::new(1.0, 2.0, 3.0, 10.0))
///     .build(&students, &Timetable::default(), &[slot, SlotId::new(Day::Tue, 11)])
///     .unwrap();
/// assert_eq!(matrix.row(0), &[1.0, 10.0]);
/// ```
#[derive(Debug, Clone)]
pub struct CostMatrixBuilder {
    costs: CostTable,
    day_capacity: Option<BTreeMap<Day, usize>>,
}

impl CostMatrixBuilder {
    pub fn new(costs: CostTable) -> Self {
        Self {
            costs,
            day_capacity: None,
        }
    }

    /// Marks slots on zero-capacity days as infeasible.
    pub fn with_day_capacity(mut self, capacity: BTreeMap<Day, usize>) -> Self {
        self.day_capacity = Some(capacity);
        self
    }

    /// Builds the matrix.
    ///
    /// Preferences are validated against `timetable`; a preferred slot that
    /// is in the timetable but not in `slots` (for example on an excluded
    /// day) is valid but unreachable.
    pub fn build(
        &self,
        students: &[Student],
        timetable: &Timetable,
        slots: &[SlotId],
    ) -> Result<CostMatrix, ValidationError> {
        self.costs.validate()?;
        for student in students {
            student.validate(timetable)?;
        }

        let rows = students
            .iter()
            .map(|student| {
                slots
                    .iter()
                    .map(|&slot| {
                        if self.is_closed(slot.day) {
                            INFEASIBLE_COST
                        } else {
                            self.costs.weight(student.rank_of(slot))
                        }
                    })
                    .collect()
            })
            .collect();
        Ok(CostMatrix::from_rows(rows))
    }

    fn is_closed(&self, day: Day) -> bool {
        self.day_capacity
            .as_ref()
            .is_some_and(|caps| caps.get(&day).copied().unwrap_or(0) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tue(h: u8) -> SlotId {
        SlotId::new(Day::Tue, h)
    }

    #[test]
    fn test_rejects_non_increasing_weights() {
        let builder = CostMatrixBuilder::new(CostTable::new(5.0, 2.0, 3.0, 10.0));
        let students = vec![Student::new("a", vec![tue(10)])];
        let err = builder
            .build(&students, &Timetable::default(), &[tue(10)])
            .unwrap_err();
        assert!(matches!(err, ValidationError::WeightsNotIncreasing { .. }));
    }

    #[test]
    fn test_rejects_equal_weights() {
        assert!(CostTable::new(1.0, 1.0, 2.0, 3.0).validate().is_err());
        assert!(CostTable::new(1.0, 2.0, 3.0, 3.0).validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_weight() {
        let err = CostTable::new(1.0, 2.0, 3.0, f64::INFINITY)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonFiniteWeight { name: "unwanted", .. }
        ));
    }

    #[test]
    fn test_rejects_student_with_too_many_preferences() {
        let builder = CostMatrixBuilder::new(CostTable::default());
        let students = vec![Student::new("a", vec![tue(10), tue(11), tue(12), tue(14)])];
        let err = builder
            .build(&students, &Timetable::default(), &[tue(10)])
            .unwrap_err();
        assert!(matches!(err, ValidationError::TooManyPreferences { .. }));
    }

    #[test]
    fn test_rank_weights_and_unwanted() {
        let builder = CostMatrixBuilder::new(CostTable::new(1.0, 2.0, 3.0, 50.0));
        let students = vec![Student::new("a", vec![tue(12), tue(10), tue(11)])];
        let m = builder
            .build(&students, &Timetable::default(), &[tue(10), tue(11), tue(12), tue(14)])
            .unwrap();
        assert_eq!(m.row(0), &[2.0, 3.0, 1.0, 50.0]);
    }

    #[test]
    fn test_closed_day_is_infeasible() {
        let caps = BTreeMap::from([(Day::Tue, 0), (Day::Wed, 2)]);
        let builder = CostMatrixBuilder::new(CostTable::default()).with_day_capacity(caps);
        let wed = SlotId::new(Day::Wed, 10);
        let students = vec![Student::new("a", vec![tue(10), wed])];
        let m = builder
            .build(&students, &Timetable::default(), &[tue(10), wed])
            .unwrap();
        assert!(m.is_infeasible(0, 0));
        assert!(!m.is_infeasible(0, 1));
    }

    #[test]
    fn test_unwanted_scaling_keeps_order() {
        let table = CostTable::new(1.0, 2.0, 3.0, 10.0).with_unwanted_scaled(4.0);
        assert_eq!(table.unwanted, 31.0);
        assert!(table.validate().is_ok());
    }
}
