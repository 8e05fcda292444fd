//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the given solution
//! 2. At each iteration:
//!    a. Purge expired tabu pairs
//!    b. Evaluate every swap between a priority student and any other student
//!    c. Select the best non-tabu swap (or a tabu swap satisfying aspiration)
//!    d. Apply it and mark both orders of the pair tabu for `tenure` iterations
//!    e. Update the global best; after a run of non-improving iterations,
//!       apply random swaps ignoring tabu status
//! 3. Terminate after max iterations or at zero unwanted placements
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

use rand::Rng;
use tracing::{debug, trace};

use super::config::TabuConfig;
use super::types::TabuList;
use crate::error::ConfigError;
use crate::neighborhood::{priority_students, random_swap, SwapMove};
use crate::problem::Instance;
use crate::solution::{Evaluation, Solution, SolutionEvaluator};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best solution found.
    pub best: Solution,
    pub evaluation: Evaluation,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best solution was found.
    pub best_iteration: usize,
    pub diversifications: usize,
    /// Best unwanted count after each iteration.
    pub unwanted_history: Vec<usize>,
    pub reached_ideal: bool,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    pub fn run<R: Rng>(
        instance: &Instance,
        initial: &Solution,
        config: &TabuConfig,
        rng: &mut R,
    ) -> Result<TabuResult, ConfigError> {
        config.validate()?;
        let evaluator = SolutionEvaluator::new(instance);

        let mut current = initial.clone();
        let mut best = current.clone();
        let mut best_eval = evaluator.evaluate(&best);
        let mut best_iteration = 0;

        let mut tabu = TabuList::new();
        let mut unwanted_history = Vec::with_capacity(config.max_iterations);
        let mut no_improve_count = 0;
        let mut diversifications = 0;
        let mut iterations = 0;

        debug!(
            event = "tabu_start",
            unwanted = best_eval.unwanted(),
            tenure = config.tenure,
        );

        for iteration in 1..=config.max_iterations {
            if best_eval.is_ideal() {
                break;
            }
            iterations = iteration;
            tabu.purge(iteration);

            let chosen = best_admissible(
                instance,
                &evaluator,
                &current,
                &tabu,
                iteration,
                config.aspiration.then_some(&best_eval),
            );

            match chosen {
                Some((mv, next, next_eval)) => {
                    tabu.insert(mv.a, mv.b, iteration + config.tenure);
                    current = next;
                    if next_eval.is_better_than(&best_eval) {
                        best = current.clone();
                        best_eval = next_eval;
                        best_iteration = iteration;
                        no_improve_count = 0;
                        trace!(iteration, unwanted = best_eval.unwanted(), "new best");
                    } else {
                        no_improve_count += 1;
                    }
                }
                None => no_improve_count += 1,
            }

            if no_improve_count >= config.diversification_threshold {
                current = diversify(instance, &current, config.diversification_moves, rng);
                let eval = evaluator.evaluate(&current);
                if eval.is_better_than(&best_eval) {
                    best = current.clone();
                    best_eval = eval;
                    best_iteration = iteration;
                }
                no_improve_count = 0;
                diversifications += 1;
                trace!(iteration, "diversified");
            }

            unwanted_history.push(best_eval.unwanted());
        }

        debug!(
            event = "tabu_end",
            iterations,
            best_iteration,
            diversifications,
            unwanted = best_eval.unwanted(),
        );

        Ok(TabuResult {
            reached_ideal: best_eval.is_ideal(),
            best,
            evaluation: best_eval,
            iterations,
            best_iteration,
            diversifications,
            unwanted_history,
        })
    }
}

/// Best swap by evaluator ordering; ties keep the first candidate found.
fn best_admissible(
    instance: &Instance,
    evaluator: &SolutionEvaluator<'_>,
    current: &Solution,
    tabu: &TabuList,
    iteration: usize,
    aspiration: Option<&Evaluation>,
) -> Option<(SwapMove, Solution, Evaluation)> {
    let mut chosen: Option<(SwapMove, Solution, Evaluation)> = None;
    for a in priority_students(instance, current) {
        for b in 0..current.len() {
            let mv = SwapMove::new(a, b);
            if !mv.is_effective(current) {
                continue;
            }
            let candidate = mv.apply(current);
            let eval = evaluator.evaluate(&candidate);
            if tabu.is_tabu(a, b, iteration)
                && !aspiration.is_some_and(|best| eval.is_better_than(best))
            {
                continue;
            }
            if chosen.as_ref().is_none_or(|(_, _, e)| eval.is_better_than(e)) {
                chosen = Some((mv, candidate, eval));
            }
        }
    }
    chosen
}

fn diversify<R: Rng>(instance: &Instance, start: &Solution, moves: usize, rng: &mut R) -> Solution {
    let priority = priority_students(instance, start);
    let mut current = start.clone();
    for _ in 0..moves {
        if let Some(mv) = random_swap(&current, &priority, rng) {
            current = mv.apply(&current);
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::ExactMatcher;
    use crate::random::create_rng;
    use crate::testing::random_instance;

    fn scrambled(instance: &Instance) -> Solution {
        let base = ExactMatcher::solve(instance).solution;
        Solution::new(base.as_slice().iter().rev().copied().collect())
    }

    #[test]
    fn test_tabu_never_returns_worse_than_start() {
        let inst = random_instance(21, 4);
        let start = scrambled(&inst);
        let eval = SolutionEvaluator::new(&inst);
        let before = eval.evaluate(&start);
        let mut rng = create_rng(Some(42));
        let result = TabuRunner::run(&inst, &start, &TabuConfig::default(), &mut rng).unwrap();

        assert!(result.best.is_valid(&inst));
        assert!(!before.is_better_than(&result.evaluation));
        assert_eq!(result.evaluation, eval.evaluate(&result.best));
        assert!(result.iterations <= 50);
    }

    #[test]
    fn test_tabu_history_non_increasing() {
        let inst = random_instance(21, 13);
        let start = scrambled(&inst);
        let mut rng = create_rng(Some(42));
        let config = TabuConfig::default().with_diversification(3, 5);
        let result = TabuRunner::run(&inst, &start, &config, &mut rng).unwrap();

        for window in result.unwanted_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best unwanted history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.unwanted_history.len(), result.iterations);
    }

    #[test]
    fn test_stagnation_triggers_diversification() {
        use crate::cost::CostTable;
        use crate::model::{Day, PreferenceModel, SlotId, Student, Timetable};

        // Five students share the same three choices: two must stay unwanted
        // and the baseline already achieves that, so no iteration improves.
        let tue = |h| SlotId::new(Day::Tue, h);
        let students = (0..5)
            .map(|i| Student::new(format!("s{i}"), vec![tue(10), tue(11), tue(12)]))
            .collect();
        let model = PreferenceModel::from_students(
            students,
            Timetable::new(vec![Day::Tue], vec![10, 11, 12, 14, 15, 16, 17]),
        )
        .unwrap();
        let inst = Instance::new(&model, CostTable::default(), None).unwrap();
        let start = ExactMatcher::solve(&inst).solution;
        let mut rng = create_rng(Some(3));
        let config = TabuConfig::default()
            .with_max_iterations(10)
            .with_diversification(3, 2);
        let result = TabuRunner::run(&inst, &start, &config, &mut rng).unwrap();

        assert_eq!(result.diversifications, 3);
        assert_eq!(result.best_iteration, 0);
        assert_eq!(result.evaluation.unwanted(), 2);
        assert!(result.unwanted_history.iter().all(|&u| u == 2));
    }

    #[test]
    fn test_best_admissible_skips_tabu_pair() {
        let inst = random_instance(8, 1);
        let start = scrambled(&inst);
        let evaluator = SolutionEvaluator::new(&inst);
        let Some((mv, _, _)) = best_admissible(&inst, &evaluator, &start, &TabuList::new(), 1, None)
        else {
            return;
        };
        let mut tabu = TabuList::new();
        tabu.insert(mv.a, mv.b, 5);
        if let Some((other, _, _)) = best_admissible(&inst, &evaluator, &start, &tabu, 2, None) {
            assert_ne!((other.a, other.b), (mv.a, mv.b));
            assert_ne!((other.a, other.b), (mv.b, mv.a));
        }
    }

    #[test]
    fn test_aspiration_admits_improving_tabu_move() {
        let inst = random_instance(8, 1);
        let start = scrambled(&inst);
        let evaluator = SolutionEvaluator::new(&inst);
        let start_eval = evaluator.evaluate(&start);
        let Some((mv, _, eval)) =
            best_admissible(&inst, &evaluator, &start, &TabuList::new(), 1, None)
        else {
            return;
        };
        if !eval.is_better_than(&start_eval) {
            return;
        }
        let mut tabu = TabuList::new();
        tabu.insert(mv.a, mv.b, 5);
        let (again, _, _) =
            best_admissible(&inst, &evaluator, &start, &tabu, 2, Some(&start_eval)).unwrap();
        assert_eq!(again, mv);
    }
}
