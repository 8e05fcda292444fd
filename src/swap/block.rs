//! Random block exchange.

use rand::seq::index::sample;
use rand::Rng;
use tracing::{debug, trace};

use super::config::BlockSwapConfig;
use crate::error::ConfigError;
use crate::problem::Instance;
use crate::solution::{Evaluation, Solution, SolutionEvaluator};

/// Result of a block exchange run.
#[derive(Debug, Clone)]
pub struct BlockSwapResult {
    pub best: Solution,
    pub evaluation: Evaluation,
    /// Block pairs drawn.
    pub attempts: usize,
    /// Exchanges kept.
    pub accepted: usize,
    pub reached_ideal: bool,
}

/// Exchanges slots between two random disjoint blocks of students.
///
/// The `i`-th student of the first block trades slots with the `i`-th
/// student of the second. The exchange is kept only when the evaluator
/// ranks it strictly better. Every exchange permutes already-held slots, so
/// injectivity and day loads are preserved.
pub struct BlockSwap;

impl BlockSwap {
    pub fn run<R: Rng>(
        instance: &Instance,
        initial: &Solution,
        config: &BlockSwapConfig,
        rng: &mut R,
    ) -> Result<BlockSwapResult, ConfigError> {
        config.validate()?;
        let evaluator = SolutionEvaluator::new(instance);

        let mut best = initial.clone();
        let mut best_eval = evaluator.evaluate(&best);
        let mut attempts = 0;
        let mut accepted = 0;
        let picked = 2 * config.block_size;

        debug!(
            event = "block_swap_start",
            block_size = config.block_size,
            unwanted = best_eval.unwanted(),
        );

        if picked <= best.len() {
            while attempts < config.max_attempts && !best_eval.is_ideal() {
                attempts += 1;
                let students = sample(rng, best.len(), picked).into_vec();
                let (left, right) = students.split_at(config.block_size);
                let moves: Vec<(usize, Option<usize>)> = left
                    .iter()
                    .zip(right)
                    .flat_map(|(&a, &b)| [(a, best.slot_of(b)), (b, best.slot_of(a))])
                    .collect();

                let candidate = best.reassigned(&moves);
                let eval = evaluator.evaluate(&candidate);
                if eval.is_better_than(&best_eval) {
                    trace!(attempt = attempts, unwanted = eval.unwanted(), "block exchange accepted");
                    best = candidate;
                    best_eval = eval;
                    accepted += 1;
                }
            }
        }

        debug!(
            event = "block_swap_end",
            attempts,
            accepted,
            unwanted = best_eval.unwanted(),
        );

        Ok(BlockSwapResult {
            reached_ideal: best_eval.is_ideal(),
            best,
            evaluation: best_eval,
            attempts,
            accepted,
        })
    }
}
