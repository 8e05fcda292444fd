//! Crossover and mutation over slot assignments.
//!
//! Both operators keep the first parent's set of occupied slots, so an
//! offspring is injective and respects day capacities whenever its parent
//! does.

use rand::Rng;

use crate::neighborhood::random_swap;
use crate::solution::Solution;

/// Uniform crossover with repair.
///
/// Each student assigned in `p1` inherits `p2`'s slot with probability 0.5,
/// provided that slot is occupied in `p1` and not yet claimed; otherwise it
/// keeps its `p1` slot if still free. Students left without a slot take the
/// remaining `p1` slots in order. Students unassigned in `p1` stay
/// unassigned.
pub fn uniform_crossover<R: Rng>(
    p1: &Solution,
    p2: &Solution,
    slot_count: usize,
    rng: &mut R,
) -> Solution {
    let n = p1.len();
    debug_assert_eq!(n, p2.len());

    let mut allowed = vec![false; slot_count];
    for &t in p1.as_slice().iter().flatten() {
        allowed[t] = true;
    }
    let mut used = vec![false; slot_count];
    let mut child = vec![None; n];
    let mut pending = Vec::new();

    for s in 0..n {
        let Some(own) = p1.slot_of(s) else {
            continue;
        };
        let inherited = if rng.random_bool(0.5) { p2.slot_of(s) } else { None };
        match inherited {
            Some(t) if allowed[t] && !used[t] => {
                child[s] = Some(t);
                used[t] = true;
            }
            _ if !used[own] => {
                child[s] = Some(own);
                used[own] = true;
            }
            _ => pending.push(s),
        }
    }

    let mut remaining = (0..slot_count).filter(|&t| allowed[t] && !used[t]);
    for s in pending {
        child[s] = remaining.next();
    }
    Solution::new(child)
}

/// Applies 1–3 uniform random swaps.
pub fn swap_mutation<R: Rng>(solution: &Solution, rng: &mut R) -> Solution {
    let swaps = rng.random_range(1..=3);
    let mut current = solution.clone();
    for _ in 0..swaps {
        if let Some(mv) = random_swap(&current, &[], rng) {
            current = mv.apply(&current);
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn occupied(s: &Solution) -> Vec<usize> {
        let mut slots: Vec<usize> = s.as_slice().iter().flatten().copied().collect();
        slots.sort_unstable();
        slots
    }

    #[test]
    fn test_crossover_keeps_parent_one_slot_set() {
        let p1 = Solution::new(vec![Some(0), Some(1), Some(2), None, Some(4)]);
        let p2 = Solution::new(vec![Some(4), Some(3), Some(0), Some(1), Some(2)]);
        let mut rng = create_rng(Some(9));
        for _ in 0..100 {
            let child = uniform_crossover(&p1, &p2, 6, &mut rng);
            assert!(child.is_injective(6));
            assert_eq!(occupied(&child), occupied(&p1));
            assert_eq!(child.slot_of(3), None);
        }
    }

    #[test]
    fn test_crossover_of_identical_parents() {
        let p = Solution::new(vec![Some(2), Some(0), Some(1)]);
        let mut rng = create_rng(Some(4));
        assert_eq!(uniform_crossover(&p, &p, 3, &mut rng), p);
    }

    #[test]
    fn test_mutation_preserves_slot_set() {
        let s = Solution::new(vec![Some(0), Some(5), None, Some(3)]);
        let mut rng = create_rng(Some(5));
        for _ in 0..50 {
            let m = swap_mutation(&s, &mut rng);
            assert_eq!(occupied(&m), occupied(&s));
        }
    }
}
