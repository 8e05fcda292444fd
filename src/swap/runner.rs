//! First-improvement pairwise swap descent.

use tracing::{debug, trace};

use super::config::SwapConfig;
use crate::error::ConfigError;
use crate::neighborhood::{unwanted_students, SwapMove};
use crate::problem::Instance;
use crate::solution::{Evaluation, Solution, SolutionEvaluator};

/// Result of a swap descent run.
#[derive(Debug, Clone)]
pub struct SwapResult {
    pub best: Solution,
    pub evaluation: Evaluation,
    /// Sweeps executed.
    pub passes: usize,
    /// Accepted swaps and vacant-slot moves.
    pub moves_applied: usize,
    pub reached_ideal: bool,
}

/// Greedy descent over swaps and vacant-slot moves of unwanted students.
pub struct SwapDescent;

impl SwapDescent {
    pub fn run(
        instance: &Instance,
        initial: &Solution,
        config: &SwapConfig,
    ) -> Result<SwapResult, ConfigError> {
        config.validate()?;
        let evaluator = SolutionEvaluator::new(instance);

        let mut current = initial.clone();
        let mut current_eval = evaluator.evaluate(&current);
        let mut passes = 0;
        let mut moves_applied = 0;

        debug!(event = "swap_start", unwanted = current_eval.unwanted());

        while passes < config.max_passes && !current_eval.is_ideal() {
            passes += 1;
            let mut improved = false;

            for a in unwanted_students(instance, &current) {
                let Some(slot) = current.slot_of(a) else {
                    continue;
                };
                if instance.rank(a, slot).is_preferred() {
                    continue;
                }
                if let Some((next, next_eval)) =
                    first_improvement(instance, &evaluator, &current, &current_eval, a, config)
                {
                    trace!(student = a, unwanted = next_eval.unwanted(), "swap accepted");
                    current = next;
                    current_eval = next_eval;
                    moves_applied += 1;
                    improved = true;
                }
            }

            if !improved {
                break;
            }
        }

        debug!(
            event = "swap_end",
            passes,
            moves_applied,
            unwanted = current_eval.unwanted(),
        );

        Ok(SwapResult {
            reached_ideal: current_eval.is_ideal(),
            best: current,
            evaluation: current_eval,
            passes,
            moves_applied,
        })
    }
}

fn first_improvement(
    instance: &Instance,
    evaluator: &SolutionEvaluator<'_>,
    current: &Solution,
    current_eval: &Evaluation,
    a: usize,
    config: &SwapConfig,
) -> Option<(Solution, Evaluation)> {
    for b in 0..current.len() {
        let mv = SwapMove::new(a, b);
        if !mv.is_effective(current) {
            continue;
        }
        let candidate = mv.apply(current);
        let eval = evaluator.evaluate(&candidate);
        if eval.is_better_than(current_eval) {
            return Some((candidate, eval));
        }
    }

    if !config.use_vacant_slots {
        return None;
    }
    let from = current.slot_of(a)?;
    let occupancy = current.occupancy(instance.slot_count());
    let loads = current.day_loads(instance);
    for (to, occupant) in occupancy.iter().enumerate() {
        if occupant.is_some() || !instance.is_open(to) {
            continue;
        }
        let day = instance.day_of(to);
        let fits = day == instance.day_of(from)
            || instance.day_capacity(day).is_none_or(|cap| loads[day] < cap);
        if !fits {
            continue;
        }
        let candidate = current.reassigned(&[(a, Some(to))]);
        let eval = evaluator.evaluate(&candidate);
        if eval.is_better_than(current_eval) {
            return Some((candidate, eval));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostTable;
    use crate::model::{Day, PreferenceModel, Rank, SlotId, StudentRecord, Teacher, TeacherRoster, Timetable};

    fn tue(h: u8) -> SlotId {
        SlotId::new(Day::Tue, h)
    }

    fn instance(roster: Option<&TeacherRoster>) -> Instance {
        let model = PreferenceModel::from_records(
            vec![
                StudentRecord::new("a", tue(10), tue(11), tue(12)),
                StudentRecord::new("b", tue(14), tue(15), tue(16)),
            ],
            Timetable::new(vec![Day::Tue, Day::Wed], vec![10, 11, 12, 14, 15, 16]),
        )
        .unwrap();
        Instance::new(&model, CostTable::default(), roster).unwrap()
    }

    #[test]
    fn test_swap_fixes_crossed_assignment() {
        let inst = instance(None);
        // a on b's first choice, b on a's first choice
        let start = Solution::new(vec![Some(3), Some(0)]);
        let result = SwapDescent::run(&inst, &start, &SwapConfig::default()).unwrap();
        let eval = SolutionEvaluator::new(&inst).evaluate(&result.best);
        assert_eq!(eval.count(Rank::First), 2);
        assert!(result.reached_ideal);
        assert!(result.moves_applied >= 1);
    }

    #[test]
    fn test_vacant_slot_move() {
        let inst = instance(None);
        // a on a Wed slot nobody wants, b happy
        let wed_slot = inst.slots().iter().position(|s| s.day == Day::Wed).unwrap();
        let start = Solution::new(vec![Some(wed_slot), Some(3)]);
        let result = SwapDescent::run(&inst, &start, &SwapConfig::default()).unwrap();
        assert!(result.reached_ideal);
        assert!(result.best.is_valid(&inst));

        let no_vacant = SwapConfig::default().with_vacant_slots(false);
        let stuck = SwapDescent::run(&inst, &start, &no_vacant).unwrap();
        assert!(!stuck.reached_ideal);
    }

    #[test]
    fn test_vacant_move_respects_day_capacity() {
        let roster = TeacherRoster::new(vec![
            Teacher::new("t1", vec![Day::Tue], 1),
            Teacher::new("t2", vec![Day::Wed], 6),
        ]);
        let inst = instance(Some(&roster));
        let wed_slot = inst.slots().iter().position(|s| s.day == Day::Wed).unwrap();
        // Tue is full with b; a cannot move onto Tue
        let start = Solution::new(vec![Some(wed_slot), Some(3)]);
        let result = SwapDescent::run(&inst, &start, &SwapConfig::default()).unwrap();
        assert!(result.best.is_valid(&inst));
        assert_eq!(result.best.day_loads(&inst)[0], 1);
    }

    #[test]
    fn test_never_worse_than_start() {
        let inst = instance(None);
        let start = Solution::new(vec![Some(0), Some(5)]);
        let before = SolutionEvaluator::new(&inst).evaluate(&start);
        let result = SwapDescent::run(&inst, &start, &SwapConfig::default()).unwrap();
        assert!(!before.is_better_than(&result.evaluation));
    }
}
