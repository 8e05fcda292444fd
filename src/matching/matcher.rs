//! Baseline matching over an [`Instance`]'s cost matrix.

use tracing::{debug, info};

use super::hungarian;
use crate::cost::{INFEASIBLE_COST, UNASSIGNED_COST};
use crate::error::InfeasibilityWarning;
use crate::problem::Instance;
use crate::solution::Solution;

/// Result of a baseline match.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Cost-optimal solution for the instance's matrix.
    pub solution: Solution,
    /// Students left without a slot, ascending.
    pub unassigned: Vec<usize>,
    pub warnings: Vec<InfeasibilityWarning>,
    /// Sum of matrix costs over assigned students.
    pub total_cost: f64,
}

/// Min-cost bipartite matcher.
///
/// The square matrix handed to the solver is laid out as:
///
/// | rows \ cols      | eligible slots          | one dummy per student        |
/// |------------------|-------------------------|------------------------------|
/// | students         | rank weight / sentinel  | `UNASSIGNED_COST` on own col |
/// | capacity blockers| 0 on their day          | sentinel                     |
/// | filler           | 0                       | 0                            |
///
/// Blockers occupy the slots a day's teachers cannot staff, so at most
/// `capacity` students land on that day.
pub struct ExactMatcher;

impl ExactMatcher {
    pub fn solve(instance: &Instance) -> MatchOutcome {
        let students = instance.student_count();
        let slots = instance.slot_count();
        let warnings = Self::warnings(instance);

        let blockers = Self::blocker_days(instance);
        let size = slots + students;
        debug!(
            event = "match_start",
            students,
            slots,
            blockers = blockers.len(),
            size,
        );

        let mut costs = Vec::with_capacity(size);
        for s in 0..students {
            let mut row = vec![INFEASIBLE_COST; size];
            for (t, cell) in row.iter_mut().enumerate().take(slots) {
                *cell = clamp(instance.matrix().get(s, t));
            }
            row[slots + s] = UNASSIGNED_COST;
            costs.push(row);
        }
        for &day in &blockers {
            let row = (0..size)
                .map(|c| if c < slots && instance.day_of(c) == day { 0.0 } else { INFEASIBLE_COST })
                .collect();
            costs.push(row);
        }
        costs.resize(size, vec![0.0; size]);

        let columns = hungarian::solve(&costs);

        let mut assigned = vec![None; students];
        let mut total_cost = 0.0;
        for (s, slot) in assigned.iter_mut().enumerate() {
            let col = columns[s];
            if col < slots && costs[s][col] < INFEASIBLE_COST {
                *slot = Some(col);
                total_cost += costs[s][col];
            }
        }
        let solution = Solution::new(assigned);
        let unassigned: Vec<usize> = solution.unassigned().collect();

        info!(
            event = "match_end",
            assigned = solution.assigned_count(),
            unassigned = unassigned.len(),
            total_cost,
        );

        MatchOutcome {
            solution,
            unassigned,
            warnings,
            total_cost,
        }
    }

    /// One entry per surplus slot on each capacity-bound day.
    fn blocker_days(instance: &Instance) -> Vec<usize> {
        let mut per_day = vec![0usize; instance.days().len()];
        for t in 0..instance.slot_count() {
            per_day[instance.day_of(t)] += 1;
        }
        per_day
            .iter()
            .enumerate()
            .flat_map(|(day, &count)| {
                let cap = instance.day_capacity(day).unwrap_or(count).min(count);
                std::iter::repeat_n(day, count - cap)
            })
            .collect()
    }

    fn warnings(instance: &Instance) -> Vec<InfeasibilityWarning> {
        let mut warnings = Vec::new();
        let mut usable = 0;
        for (day_idx, &day) in instance.days().iter().enumerate() {
            let slots = (0..instance.slot_count())
                .filter(|&t| instance.day_of(t) == day_idx)
                .count();
            match instance.day_capacity(day_idx) {
                Some(capacity) if capacity < slots => {
                    usable += capacity;
                    warnings.push(InfeasibilityWarning::CapacityBound {
                        day,
                        capacity,
                        slots,
                    });
                }
                _ => usable += slots,
            }
        }
        if instance.student_count() > usable {
            warnings.push(InfeasibilityWarning::SupplyShortage {
                students: instance.student_count(),
                usable_slots: usable,
            });
        }
        warnings
    }
}

fn clamp(cost: f64) -> f64 {
    if cost.is_finite() {
        cost.min(INFEASIBLE_COST)
    } else {
        INFEASIBLE_COST
    }
}
