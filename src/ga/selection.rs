//! Tournament selection.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::seq::index::sample;
use rand::Rng;

use super::types::Individual;

/// Samples `k` distinct individuals (all of them if `k` exceeds the
/// population) and returns the index of the fittest.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Individual], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let k = k.clamp(1, population.len());
    let mut contenders = sample(rng, population.len(), k).into_iter();
    let mut best = contenders.next().unwrap_or(0);
    for idx in contenders {
        if population[idx].is_fitter_than(&population[best]) {
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::solution::{Solution, SolutionEvaluator};
    use crate::testing::random_instance;

    #[test]
    fn test_full_tournament_picks_fittest() {
        let inst = random_instance(7, 6);
        let evaluator = SolutionEvaluator::new(&inst);
        let population: Vec<Individual> = (0..5)
            .map(|shift| {
                let slots = (0..7).map(|s| Some((s + shift * 3) % 21)).collect();
                Individual::new(Solution::new(slots), &evaluator, 10.0)
            })
            .collect();
        let fittest = (0..population.len())
            .reduce(|a, b| if population[b].is_fitter_than(&population[a]) { b } else { a })
            .unwrap();

        let mut rng = create_rng(Some(1));
        for _ in 0..10 {
            let idx = tournament(&population, 5, &mut rng);
            assert!(!population[fittest].is_fitter_than(&population[idx]));
            assert!((population[idx].fitness() - population[fittest].fitness()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tournament_index_in_range() {
        let inst = random_instance(4, 0);
        let evaluator = SolutionEvaluator::new(&inst);
        let population = vec![Individual::new(Solution::new(vec![Some(0), Some(1), Some(2), Some(3)]), &evaluator, 10.0)];
        let mut rng = create_rng(Some(2));
        assert_eq!(tournament(&population, 3, &mut rng), 0);
    }
}
