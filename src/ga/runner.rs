//! GA evolutionary loop execution.
//!
//! [`GeneticRunner`] orchestrates the complete evolutionary process:
//! seeding → evaluation → elitism → selection → crossover → mutation → repeat.

use rand::Rng;
use tracing::{debug, trace};

use super::config::GeneticConfig;
use super::operators::{swap_mutation, uniform_crossover};
use super::selection::tournament;
use super::types::Individual;
use crate::error::ConfigError;
use crate::neighborhood::random_swap;
use crate::problem::Instance;
use crate::solution::{Evaluation, Solution, SolutionEvaluator};

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GeneticResult {
    /// Best solution seen across all generations.
    pub best: Solution,
    pub evaluation: Evaluation,
    pub best_fitness: f64,
    /// Generations executed.
    pub generations: usize,
    /// Fittest individual's fitness after seeding and after each generation.
    pub fitness_history: Vec<f64>,
    pub reached_ideal: bool,
}

/// Executes the GA evolutionary loop.
pub struct GeneticRunner;

impl GeneticRunner {
    /// Evolves a population seeded from `baseline`.
    pub fn run<R: Rng>(
        instance: &Instance,
        baseline: &Solution,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Result<GeneticResult, ConfigError> {
        config.validate()?;
        let evaluator = SolutionEvaluator::new(instance);
        let penalty = config.unwanted_penalty;

        // 1. Seed: baseline plus perturbed variants
        let mut seeds = Vec::with_capacity(config.population_size);
        seeds.push(baseline.clone());
        while seeds.len() < config.population_size {
            let mut variant = baseline.clone();
            for _ in 0..config.seed_swaps {
                if let Some(mv) = random_swap(&variant, &[], rng) {
                    variant = mv.apply(&variant);
                }
            }
            seeds.push(variant);
        }
        let mut population = evaluate_all(seeds, &evaluator, penalty, config.parallel);

        // 2. Track best by evaluator ordering, fitness drives selection
        let mut best = population[0].clone();
        update_best(&mut best, &population);
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(fittest(&population).fitness());
        let mut generations = 0;

        debug!(
            event = "genetic_start",
            population = config.population_size,
            unwanted = best.evaluation().unwanted(),
        );

        // 3. Evolutionary loop
        while generations < config.max_generations && !best.evaluation().is_ideal() {
            generations += 1;

            // Elite preservation
            let elite = fittest(&population).clone();

            // Generate offspring
            let mut offspring = Vec::with_capacity(config.population_size - 1);
            while offspring.len() < config.population_size - 1 {
                let p1 = tournament(&population, config.tournament_size, rng);
                let p2 = tournament(&population, config.tournament_size, rng);

                let mut child = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    uniform_crossover(
                        population[p1].solution(),
                        population[p2].solution(),
                        instance.slot_count(),
                        rng,
                    )
                } else {
                    population[p1].solution().clone()
                };

                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    child = swap_mutation(&child, rng);
                }
                offspring.push(child);
            }

            population = std::iter::once(elite)
                .chain(evaluate_all(offspring, &evaluator, penalty, config.parallel))
                .collect();

            if update_best(&mut best, &population) {
                trace!(generation = generations, unwanted = best.evaluation().unwanted(), "new best");
            }
            fitness_history.push(fittest(&population).fitness());
        }

        debug!(
            event = "genetic_end",
            generations,
            best_fitness = best.fitness(),
            unwanted = best.evaluation().unwanted(),
        );

        let evaluation = *best.evaluation();
        let best_fitness = best.fitness();
        Ok(GeneticResult {
            reached_ideal: evaluation.is_ideal(),
            best: best.into_solution(),
            evaluation,
            best_fitness,
            generations,
            fitness_history,
        })
    }
}

/// Evaluate a batch of solutions.
#[cfg(feature = "parallel")]
fn evaluate_all(
    solutions: Vec<Solution>,
    evaluator: &SolutionEvaluator<'_>,
    penalty: f64,
    parallel: bool,
) -> Vec<Individual> {
    use rayon::prelude::*;

    if parallel {
        solutions
            .into_par_iter()
            .map(|s| Individual::new(s, evaluator, penalty))
            .collect()
    } else {
        solutions
            .into_iter()
            .map(|s| Individual::new(s, evaluator, penalty))
            .collect()
    }
}

/// Evaluate a batch of solutions.
#[cfg(not(feature = "parallel"))]
fn evaluate_all(
    solutions: Vec<Solution>,
    evaluator: &SolutionEvaluator<'_>,
    penalty: f64,
    _parallel: bool,
) -> Vec<Individual> {
    solutions
        .into_iter()
        .map(|s| Individual::new(s, evaluator, penalty))
        .collect()
}

/// Replaces `best` with any individual the evaluator ranks higher.
fn update_best(best: &mut Individual, population: &[Individual]) -> bool {
    let mut improved = false;
    for ind in population {
        if ind.evaluation().is_better_than(best.evaluation()) {
            *best = ind.clone();
            improved = true;
        }
    }
    improved
}

/// The fittest individual; the first one on ties.
fn fittest(population: &[Individual]) -> &Individual {
    let mut best = &population[0];
    for ind in &population[1..] {
        if ind.is_fitter_than(best) {
            best = ind;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
