use std::collections::HashSet;
use std::time::Instant;

use rand::Rng;
use tracing::trace;

use super::{SearchLimits, SearchStats};
use crate::error::Budget;
use crate::model::ForbiddenIndex;
use crate::sample::{SampleMode, scramble};

// Roughly how many candidate tests may run between clock reads.
const TIME_CHECK_WORK: u64 = 1 << 18;
const MAX_TIME_CHECK_INTERVAL: u64 = 1024;
// Dead states beyond this are not remembered; the search stays exact, only slower.
pub(crate) const MEMO_CAP: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Found(Vec<usize>),
    Exhausted,
    Stopped(Budget),
}

enum Step {
    Found,
    Dead,
    Stop(Budget),
}

pub(crate) struct Backtracker<'a, R: Rng + ?Sized> {
    index: &'a ForbiddenIndex,
    order: &'a [usize],
    items: usize,
    mode: SampleMode,
    limits: SearchLimits,
    rng: &'a mut R,
    used: Vec<bool>,
    picks: Vec<usize>,
    dead: HashSet<Vec<usize>>,
    memo_cap: usize,
    started: Instant,
    check_every: u64,
    pub(crate) stats: SearchStats,
}

impl<'a, R: Rng + ?Sized> Backtracker<'a, R> {
    pub(crate) fn new(
        index: &'a ForbiddenIndex,
        order: &'a [usize],
        items: usize,
        mode: SampleMode,
        limits: SearchLimits,
        rng: &'a mut R,
    ) -> Self {
        Self {
            index,
            order,
            items,
            mode,
            limits,
            rng,
            used: vec![false; items],
            picks: Vec::with_capacity(order.len()),
            dead: HashSet::new(),
            memo_cap: MEMO_CAP,
            started: Instant::now(),
            check_every: time_check_interval(items, order.len()),
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn run(&mut self) -> Outcome {
        self.started = Instant::now();
        match self.descend(0) {
            Step::Found => {
                let mut by_slot = vec![0usize; self.order.len()];
                for (depth, &item) in self.picks.iter().enumerate() {
                    by_slot[self.order[depth]] = item;
                }
                Outcome::Found(by_slot)
            }
            Step::Dead => Outcome::Exhausted,
            Step::Stop(b) => Outcome::Stopped(b),
        }
    }

    fn descend(&mut self, depth: usize) -> Step {
        if depth == self.order.len() {
            return Step::Found;
        }
        if let Some(b) = self.tick() {
            return Step::Stop(b);
        }

        let key = self.state_key();
        if self.dead.contains(&key) {
            self.stats.memo_hits += 1;
            return Step::Dead;
        }

        let slot = self.order[depth];
        let mut candidates = self.candidates(slot);
        scramble(&mut candidates, self.mode, &mut *self.rng);

        for item in candidates {
            self.used[item] = true;
            self.picks.push(item);

            if self.remaining_slots_open(depth + 1) {
                match self.descend(depth + 1) {
                    Step::Found => return Step::Found,
                    Step::Stop(b) => return Step::Stop(b),
                    Step::Dead => {}
                }
            } else {
                self.stats.pruned += 1;
            }

            self.picks.pop();
            self.used[item] = false;
            self.stats.backtracks += 1;
            trace!(depth, slot = slot + 1, item, "backtrack");
        }

        if self.dead.len() < self.memo_cap {
            self.dead.insert(key);
        }
        Step::Dead
    }

    fn candidates(&self, slot: usize) -> Vec<usize> {
        (0..self.items)
            .filter(|&i| !self.used[i] && !self.index.is_forbidden(slot, i))
            .collect()
    }

    fn remaining_slots_open(&self, depth: usize) -> bool {
        self.order[depth..].iter().all(|&slot| {
            (0..self.items).any(|i| !self.used[i] && !self.index.is_forbidden(slot, i))
        })
    }

    // The visiting order is fixed, so the consumed set alone fixes the next slot.
    fn state_key(&self) -> Vec<usize> {
        let mut key = self.picks.clone();
        key.sort_unstable();
        key
    }

    fn tick(&mut self) -> Option<Budget> {
        self.stats.nodes += 1;
        if let Some(max) = self.limits.max_nodes {
            if self.stats.nodes > max {
                return Some(Budget::Nodes(max));
            }
        }
        if let Some(limit) = self.limits.time_limit {
            let due = self.stats.nodes == 1 || self.stats.nodes % self.check_every == 0;
            if due && self.started.elapsed() >= limit {
                return Some(Budget::TimeMs(limit.as_millis() as u64));
            }
        }
        None
    }
}

// Each node scans every slot for a free item, so wide problems read the clock more often.
fn time_check_interval(items: usize, slots: usize) -> u64 {
    let work = (items as u64).saturating_mul(slots as u64).max(1);
    (TIME_CHECK_WORK / work).clamp(1, MAX_TIME_CHECK_INTERVAL)
}
