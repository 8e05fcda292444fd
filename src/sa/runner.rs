//! Annealing loop over the swap neighborhood.

use rand::Rng;
use tracing::{debug, trace};

use super::config::{AnnealingConfig, CoolingSchedule};
use crate::error::ConfigError;
use crate::neighborhood::{priority_students, random_swap};
use crate::problem::Instance;
use crate::solution::{Evaluation, Solution, SolutionEvaluator};

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingResult {
    /// Best solution seen, not the final state.
    pub best: Solution,
    pub evaluation: Evaluation,
    /// Moves evaluated.
    pub iterations: usize,
    pub final_temperature: f64,
    /// Accepted moves, improving ones included.
    pub accepted_moves: usize,
    /// Moves that lowered the unwanted count.
    pub improving_moves: usize,
    pub reheats: usize,
    /// Best unwanted count sampled during the run. Non-increasing.
    pub unwanted_history: Vec<usize>,
    pub reached_ideal: bool,
}

/// Simulated annealing on the unwanted count.
///
/// Each step draws one prioritized swap. With `Δ` the change in unwanted
/// placements, the move is accepted when `Δ <= 0` and otherwise with
/// probability `exp(-Δ / T)`.
pub struct AnnealingRunner;

impl AnnealingRunner {
    pub fn run<R: Rng>(
        instance: &Instance,
        initial: &Solution,
        config: &AnnealingConfig,
        rng: &mut R,
    ) -> Result<AnnealingResult, ConfigError> {
        config.validate()?;
        let evaluator = SolutionEvaluator::new(instance);

        let mut current = initial.clone();
        let mut current_eval = evaluator.evaluate(&current);
        let mut best = current.clone();
        let mut best_eval = current_eval;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut reheats = 0usize;
        let mut non_improving = 0usize;
        let mut window_accepted = 0usize;
        let mut window_moves = 0usize;

        let history_interval = (config.max_iterations / 100).max(1);
        let mut unwanted_history = vec![best_eval.unwanted()];

        debug!(
            event = "annealing_start",
            unwanted = current_eval.unwanted(),
            temperature,
            max_iterations = config.max_iterations,
        );

        while iterations < config.max_iterations && !best_eval.is_ideal() {
            let priority = priority_students(instance, &current);
            let Some(mv) = random_swap(&current, &priority, rng) else {
                break;
            };
            iterations += 1;

            let neighbor = mv.apply(&current);
            let neighbor_eval = evaluator.evaluate(&neighbor);
            let delta = neighbor_eval.unwanted() as f64 - current_eval.unwanted() as f64;

            // Metropolis acceptance criterion
            let accept = delta <= 0.0 || rng.random_range(0.0..1.0) < (-delta / temperature).exp();
            if accept {
                if delta < 0.0 {
                    improving_moves += 1;
                }
                accepted_moves += 1;
                window_accepted += 1;
                current = neighbor;
                current_eval = neighbor_eval;
            }
            window_moves += 1;

            if current_eval.is_better_than(&best_eval) {
                best = current.clone();
                best_eval = current_eval;
                non_improving = 0;
                trace!(iteration = iterations, unwanted = best_eval.unwanted(), "new best");
            } else {
                non_improving += 1;
            }

            temperature = match config.cooling {
                CoolingSchedule::Geometric { alpha } => temperature * alpha,
                CoolingSchedule::Adaptive {
                    target_acceptance,
                    adjust_factor,
                    window,
                } => {
                    if window_moves < window {
                        temperature
                    } else {
                        let rate = window_accepted as f64 / window_moves as f64;
                        window_accepted = 0;
                        window_moves = 0;
                        if rate > target_acceptance {
                            temperature / adjust_factor
                        } else if rate < target_acceptance {
                            temperature * adjust_factor
                        } else {
                            temperature
                        }
                    }
                }
            }
            .clamp(config.min_temperature, config.initial_temperature);

            if let Some(reheat) = config.reheat {
                if non_improving >= reheat.after_non_improving && reheats < reheat.max_reheats {
                    temperature = config.initial_temperature;
                    non_improving = 0;
                    reheats += 1;
                    trace!(iteration = iterations, reheats, "reheat");
                }
            }

            if iterations % history_interval == 0 {
                unwanted_history.push(best_eval.unwanted());
            }
        }

        if unwanted_history.last() != Some(&best_eval.unwanted()) {
            unwanted_history.push(best_eval.unwanted());
        }

        debug!(
            event = "annealing_end",
            iterations,
            accepted_moves,
            reheats,
            unwanted = best_eval.unwanted(),
        );

        Ok(AnnealingResult {
            reached_ideal: best_eval.is_ideal(),
            best,
            evaluation: best_eval,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            reheats,
            unwanted_history,
        })
    }
}
