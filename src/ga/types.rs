//! Population members.

use crate::solution::{Evaluation, Solution, SolutionEvaluator};

/// One solution treated as a chromosome, with its cached evaluation.
///
/// Fitness is `weighted score - penalty * unwanted`; higher is better.
#[derive(Debug, Clone)]
pub struct Individual {
    solution: Solution,
    evaluation: Evaluation,
    fitness: f64,
}

impl Individual {
    pub fn new(solution: Solution, evaluator: &SolutionEvaluator<'_>, unwanted_penalty: f64) -> Self {
        let evaluation = evaluator.evaluate(&solution);
        let fitness = evaluation.weighted_score() as f64 - unwanted_penalty * evaluation.unwanted() as f64;
        Self {
            solution,
            evaluation,
            fitness,
        }
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn into_solution(self) -> Solution {
        self.solution
    }

    /// Higher fitness wins; equal fitness falls back to evaluator ordering.
    pub fn is_fitter_than(&self, other: &Self) -> bool {
        self.fitness > other.fitness
            || (self.fitness == other.fitness && self.evaluation.is_better_than(&other.evaluation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::random_instance;

    #[test]
    fn test_fitness_penalizes_unwanted() {
        let inst = random_instance(7, 2);
        let evaluator = SolutionEvaluator::new(&inst);
        let solution = Solution::new((0..7).map(Some).collect());
        let ind = Individual::new(solution, &evaluator, 10.0);
        let e = ind.evaluation();
        assert!((ind.fitness() - (e.weighted_score() as f64 - 10.0 * e.unwanted() as f64)).abs() < 1e-9);
    }
}
