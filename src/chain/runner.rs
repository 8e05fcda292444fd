//! Breadth-first search for improving exchange chains.

use tracing::{debug, trace};

use super::config::ChainConfig;
use super::types::{ChainKind, ChainResult, ExchangeCycle};
use crate::error::ConfigError;
use crate::model::Rank;
use crate::neighborhood::unwanted_students;
use crate::problem::Instance;
use crate::solution::{Solution, SolutionEvaluator};

/// Resolves unwanted placements through chains of simultaneous moves.
///
/// Starting from an unwanted student `S0`, an edge `Si -> Sj` means `Si`
/// can take `Sj`'s slot: that slot is one of `Si`'s preferences and ranks
/// no worse than `Si`'s current slot. A path closes when its last member can
/// take `S0`'s slot ([`ChainKind::Cycle`]) or a vacant slot within the day
/// capacity ([`ChainKind::Open`]). Every member ends up no worse off and
/// `S0` leaves its unwanted slot, so an applied chain never regresses.
pub struct ChainExchangeEngine;

impl ChainExchangeEngine {
    pub fn run(
        instance: &Instance,
        initial: &Solution,
        config: &ChainConfig,
    ) -> Result<ChainResult, ConfigError> {
        config.validate()?;
        let evaluator = SolutionEvaluator::new(instance);

        let mut current = initial.clone();
        let mut applied = Vec::new();
        let mut expansions = 0;
        let mut passes = 0;

        debug!(
            event = "chain_start",
            unwanted = evaluator.unwanted(&current),
            max_chain_length = config.max_chain_length,
        );

        while passes < config.max_passes {
            let unwanted = unwanted_students(instance, &current);
            if unwanted.is_empty() {
                break;
            }
            passes += 1;

            let mut changed = false;
            for start in unwanted {
                let still_unwanted = current
                    .slot_of(start)
                    .is_some_and(|t| instance.rank(start, t) == Rank::Unwanted);
                if !still_unwanted {
                    continue;
                }
                let (chain, used) = Self::find_chain(instance, &current, start, config);
                expansions += used;
                if let Some(chain) = chain {
                    trace!(
                        student = start,
                        length = chain.len(),
                        kind = ?chain.kind,
                        "chain applied"
                    );
                    let next = chain.apply(&current);
                    debug_assert!(
                        !evaluator.evaluate(&current).is_better_than(&evaluator.evaluate(&next))
                    );
                    current = next;
                    applied.push(chain);
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }

        let unresolved = unwanted_students(instance, &current);
        debug!(
            event = "chain_end",
            passes,
            chains = applied.len(),
            expansions,
            unresolved = unresolved.len(),
        );

        Ok(ChainResult {
            reached_ideal: unresolved.is_empty(),
            best: current,
            applied,
            unresolved,
            passes,
            expansions,
        })
    }

    /// Shortest improving chain rooted at `start`, with the number of nodes
    /// expanded to find it.
    ///
    /// Among chains of equal length the one with the most strictly improved
    /// members wins, then the one discovered first.
    pub fn find_chain(
        instance: &Instance,
        solution: &Solution,
        start: usize,
        config: &ChainConfig,
    ) -> (Option<ExchangeCycle>, usize) {
        let Some(start_slot) = solution.slot_of(start) else {
            return (None, 0);
        };
        let search = Search {
            instance,
            solution,
            occupancy: solution.occupancy(instance.slot_count()),
            loads: solution.day_loads(instance),
            start,
            start_slot,
            equal_preference: config.equal_preference,
        };

        let mut frontier: Vec<Vec<usize>> = vec![vec![start]];
        let mut expansions = 0;

        while !frontier.is_empty() {
            let mut found: Vec<ExchangeCycle> = Vec::new();
            let mut next = Vec::new();

            for path in &frontier {
                if expansions >= config.max_expansions {
                    break;
                }
                expansions += 1;
                let extend = path.len() < config.max_chain_length;
                search.expand(path, extend, &mut found, &mut next);
            }

            if let Some(best) = pick(found) {
                return (Some(best), expansions);
            }
            if expansions >= config.max_expansions {
                break;
            }
            frontier = next;
        }
        (None, expansions)
    }
}

struct Search<'a> {
    instance: &'a Instance,
    solution: &'a Solution,
    occupancy: Vec<Option<usize>>,
    loads: Vec<usize>,
    start: usize,
    start_slot: usize,
    equal_preference: bool,
}

impl Search<'_> {
    fn expand(
        &self,
        path: &[usize],
        extend: bool,
        found: &mut Vec<ExchangeCycle>,
        next: &mut Vec<Vec<usize>>,
    ) {
        let Some(&last) = path.last() else {
            return;
        };
        let Some(own) = self.solution.slot_of(last) else {
            return;
        };
        let current_rank = self.instance.rank(last, own);

        for &(slot, rank) in self.instance.preferred_slots(last) {
            if slot == own || !(self.equal_preference || rank <= current_rank) {
                continue;
            }
            match self.occupancy[slot] {
                Some(occupant) if occupant == self.start => {
                    if path.len() >= 2 {
                        found.push(self.close(path, ChainKind::Cycle, slot));
                    }
                }
                Some(occupant) => {
                    if extend && !path.contains(&occupant) {
                        let mut branch = path.to_vec();
                        branch.push(occupant);
                        next.push(branch);
                    }
                }
                None => {
                    if self.instance.is_open(slot) && self.vacancy_fits(slot) {
                        found.push(self.close(path, ChainKind::Open, slot));
                    }
                }
            }
        }
    }

    /// Moving into `slot` frees `start_slot`; only a day change can break
    /// capacity.
    fn vacancy_fits(&self, slot: usize) -> bool {
        let day = self.instance.day_of(slot);
        day == self.instance.day_of(self.start_slot)
            || self
                .instance
                .day_capacity(day)
                .is_none_or(|cap| self.loads[day] < cap)
    }

    fn close(&self, path: &[usize], kind: ChainKind, last_slot: usize) -> ExchangeCycle {
        let mut moves = Vec::with_capacity(path.len());
        for pair in path.windows(2) {
            if let Some(slot) = self.solution.slot_of(pair[1]) {
                moves.push((pair[0], slot));
            }
        }
        if let Some(&last) = path.last() {
            moves.push((last, last_slot));
        }
        let improved = moves
            .iter()
            .filter(|&&(s, to)| {
                self.solution
                    .slot_of(s)
                    .is_some_and(|from| self.instance.rank(s, to) < self.instance.rank(s, from))
            })
            .count();
        ExchangeCycle {
            students: path.to_vec(),
            moves,
            kind,
            improved,
        }
    }
}

fn pick(found: Vec<ExchangeCycle>) -> Option<ExchangeCycle> {
    found.into_iter().reduce(|best, c| if c.improved > best.improved { c } else { best })
}
