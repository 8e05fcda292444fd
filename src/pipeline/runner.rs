//! Baseline-then-refine orchestration.

use rand::Rng;
use tracing::{debug, info};

use super::types::Strategy;
use crate::chain::ChainExchangeEngine;
use crate::config::OptimizerConfig;
use crate::error::{ConfigError, Error, InfeasibilityWarning};
use crate::ga::GeneticRunner;
use crate::matching::ExactMatcher;
use crate::model::{Day, PreferenceModel};
use crate::problem::Instance;
use crate::random::{create_rng, fork};
use crate::report::{OptimizationReport, StrategyOutcome};
use crate::sa::AnnealingRunner;
use crate::solution::{Evaluation, Solution, SolutionEvaluator};
use crate::swap::{BlockSwap, SwapDescent};
use crate::tabu::TabuRunner;

/// Runs the exact matcher and then the configured refiners.
///
/// # Examples
///
/// ```
/// use u_slotmatch::config::OptimizerConfig;
/// use u_slotmatch::model::{Day, PreferenceModel, SlotId, StudentRecord, Timetable};
/// use u_slotmatch::pipeline::Optimizer;
///
/// let tue = |h| SlotId::new(Day::Tue, h);
/// let model = PreferenceModel::from_records(
///     vec![
///         StudentRecord::new("ana", tue(10), tue(11), tue(12)),
///         StudentRecord::new("ben", tue(10), tue(14), tue(15)),
///     ],
///     Timetable::default(),
/// ).unwrap();
///
/// let optimizer = Optimizer::new(OptimizerConfig::default().with_seed(1));
/// let report = optimizer.optimize(&model).unwrap();
/// assert_eq!(report.assignments.len(), 2);
/// assert!(report.reached_ideal);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

/// Best result of one pipeline run, before it is turned into a report.
struct Outcome {
    solution: Solution,
    evaluation: Evaluation,
    warnings: Vec<InfeasibilityWarning>,
    strategies: Vec<StrategyOutcome>,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Optimizes over the configured days (all timetable days by default).
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for invalid engine parameters, [`Error::Validation`]
    /// for bad cost weights, a roster that does not fit the timetable, or
    /// days with no slots.
    pub fn optimize(&self, model: &PreferenceModel) -> Result<OptimizationReport, Error> {
        self.config.validate()?;
        let days = self
            .config
            .days
            .clone()
            .unwrap_or_else(|| model.timetable().days().to_vec());
        let instance = self.instance(model, &days)?;
        let mut rng = create_rng(self.config.seed);
        let outcome = self.solve(&instance, &mut rng)?;
        Ok(report(&instance, outcome))
    }

    /// Tries every `days_per_week`-combination of the timetable's days and
    /// returns the report of the best one.
    ///
    /// Branches are independent, each with its own generator derived from
    /// the configured seed. Ties go to the earliest combination in
    /// lexicographic day order. The configured `days` restriction is
    /// ignored.
    pub fn optimize_day_combinations(
        &self,
        model: &PreferenceModel,
        days_per_week: usize,
    ) -> Result<OptimizationReport, Error> {
        self.config.validate()?;
        let all_days = model.timetable().days();
        if days_per_week == 0 || days_per_week > all_days.len() {
            return Err(ConfigError::Invalid(format!(
                "days_per_week must be in 1..={}, got {days_per_week}",
                all_days.len()
            ))
            .into());
        }

        let combinations = combinations(all_days, days_per_week);
        info!(
            event = "day_combinations_start",
            combinations = combinations.len(),
            days_per_week,
        );

        let branches = self.run_branches(model, &combinations)?;
        let mut best: Option<(Instance, Outcome)> = None;
        for (instance, outcome) in branches {
            let better = best
                .as_ref()
                .is_none_or(|(_, b)| outcome.evaluation.is_better_than(&b.evaluation));
            if better {
                best = Some((instance, outcome));
            }
        }

        let (instance, outcome) = best.ok_or_else(|| {
            ConfigError::Invalid("no day combination could be evaluated".into())
        })?;
        info!(
            event = "day_combinations_end",
            days = ?instance.days(),
            unwanted = outcome.evaluation.unwanted(),
        );
        Ok(report(&instance, outcome))
    }

    #[cfg(feature = "parallel")]
    fn run_branches(
        &self,
        model: &PreferenceModel,
        combinations: &[Vec<Day>],
    ) -> Result<Vec<(Instance, Outcome)>, Error> {
        use rayon::prelude::*;

        combinations
            .par_iter()
            .enumerate()
            .map(|(idx, days)| self.run_branch(model, days, idx))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_branches(
        &self,
        model: &PreferenceModel,
        combinations: &[Vec<Day>],
    ) -> Result<Vec<(Instance, Outcome)>, Error> {
        combinations
            .iter()
            .enumerate()
            .map(|(idx, days)| self.run_branch(model, days, idx))
            .collect()
    }

    fn run_branch(
        &self,
        model: &PreferenceModel,
        days: &[Day],
        idx: usize,
    ) -> Result<(Instance, Outcome), Error> {
        let instance = self.instance(model, days)?;
        let seed = self.config.seed.map(|s| s.wrapping_add(idx as u64));
        let mut rng = create_rng(seed);
        let outcome = self.solve(&instance, &mut rng)?;
        debug!(
            event = "day_combination",
            days = ?days,
            unassigned = outcome.evaluation.unassigned(),
            unwanted = outcome.evaluation.unwanted(),
        );
        Ok((instance, outcome))
    }

    fn instance(&self, model: &PreferenceModel, days: &[Day]) -> Result<Instance, Error> {
        Ok(Instance::for_days(
            model,
            days,
            self.config.costs,
            self.config.roster.as_ref(),
        )?)
    }

    /// Baseline, optional penalty escalation, then each strategy from the
    /// best solution so far.
    fn solve<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Result<Outcome, Error> {
        let evaluator = SolutionEvaluator::new(instance);
        let baseline = ExactMatcher::solve(instance);
        let warnings = baseline.warnings;
        let mut best = baseline.solution;
        let mut best_eval = evaluator.evaluate(&best);

        info!(
            event = "optimize_start",
            students = instance.student_count(),
            slots = instance.slot_count(),
            unassigned = best_eval.unassigned(),
            unwanted = best_eval.unwanted(),
        );

        let mut factor = 1.0;
        for round in 1..=self.config.penalty_escalation_rounds {
            if best_eval.is_ideal() {
                break;
            }
            factor *= self.config.escalation_factor;
            let escalated = instance.with_costs(instance.costs().with_unwanted_scaled(factor))?;
            let candidate = ExactMatcher::solve(&escalated).solution;
            let eval = evaluator.evaluate(&candidate);
            let accepted = eval.is_better_than(&best_eval);
            debug!(
                event = "penalty_escalation",
                round,
                unwanted = eval.unwanted(),
                accepted,
            );
            if accepted {
                best = candidate;
                best_eval = eval;
            }
        }

        let mut strategies = Vec::with_capacity(self.config.strategies.len());
        for &strategy in &self.config.strategies {
            if best_eval.is_ideal() {
                break;
            }
            let (candidate, iterations) = if strategy.is_stochastic() {
                self.refine(strategy, instance, &best, &mut fork(rng))?
            } else {
                self.refine(strategy, instance, &best, rng)?
            };
            let eval = evaluator.evaluate(&candidate);
            let accepted = eval.is_better_than(&best_eval);
            let outcome = StrategyOutcome {
                strategy,
                unwanted_before: best_eval.unwanted(),
                unwanted_after: eval.unwanted(),
                accepted,
                reached_ideal: eval.is_ideal(),
                iterations,
            };
            debug!(
                event = "strategy_end",
                strategy = %strategy,
                unwanted_before = outcome.unwanted_before,
                unwanted_after = outcome.unwanted_after,
                accepted,
            );
            strategies.push(outcome);
            if accepted {
                best = candidate;
                best_eval = eval;
            }
        }

        info!(
            event = "optimize_end",
            unassigned = best_eval.unassigned(),
            unwanted = best_eval.unwanted(),
            weighted_score = best_eval.weighted_score(),
        );

        Ok(Outcome {
            solution: best,
            evaluation: best_eval,
            warnings,
            strategies,
        })
    }

    /// Runs one engine and returns its best solution with its iteration count.
    fn refine<R: Rng>(
        &self,
        strategy: Strategy,
        instance: &Instance,
        start: &Solution,
        rng: &mut R,
    ) -> Result<(Solution, usize), ConfigError> {
        let config = &self.config;
        Ok(match strategy {
            Strategy::Swap => {
                let r = SwapDescent::run(instance, start, &config.swap)?;
                (r.best, r.passes)
            }
            Strategy::Block => {
                let r = BlockSwap::run(instance, start, &config.block, rng)?;
                (r.best, r.attempts)
            }
            Strategy::Chain => {
                let r = ChainExchangeEngine::run(instance, start, &config.chain)?;
                (r.best, r.passes)
            }
            Strategy::Annealing => {
                let r = AnnealingRunner::run(instance, start, &config.annealing, rng)?;
                (r.best, r.iterations)
            }
            Strategy::Tabu => {
                let r = TabuRunner::run(instance, start, &config.tabu, rng)?;
                (r.best, r.iterations)
            }
            Strategy::Genetic => {
                let r = GeneticRunner::run(instance, start, &config.genetic, rng)?;
                (r.best, r.generations)
            }
        })
    }
}

fn report(instance: &Instance, outcome: Outcome) -> OptimizationReport {
    OptimizationReport::build(
        instance,
        &outcome.solution,
        &outcome.evaluation,
        outcome.warnings,
        outcome.strategies,
    )
}

/// All `k`-subsets of `days`, in lexicographic order of positions.
fn combinations(days: &[Day], k: usize) -> Vec<Vec<Day>> {
    let n = days.len();
    if k > n {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        result.push(idx.iter().map(|&i| days[i]).collect());
        // Rightmost position that can still advance
        let Some(pos) = (0..k).rev().find(|&i| idx[i] < n - k + i) else {
            return result;
        };
        idx[pos] += 1;
        for j in pos + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}
