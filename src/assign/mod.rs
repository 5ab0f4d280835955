pub mod order;
pub(crate) mod search;

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::error::AssignError;
use crate::model::{Assignment, Catalog, ForbiddenIndex, ForbiddenRelation};
use crate::rng::{resolve_seed, rng_from_seed};
use crate::sample::SampleMode;

pub use order::SlotOrder;
use search::{Backtracker, Outcome};

pub const DEFAULT_MAX_NODES: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_nodes: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_nodes: Some(DEFAULT_MAX_NODES),
            time_limit: None,
        }
    }
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self {
            max_nodes: None,
            time_limit: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignOptions {
    pub seed: Option<u64>,
    pub order: SlotOrder,
    pub limits: SearchLimits,
    pub mode: SampleMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub backtracks: u64,
    pub memo_hits: u64,
    pub pruned: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignOutcome<K> {
    pub assignment: Assignment<K>,
    pub stats: SearchStats,
    pub seed: Option<u64>,
}

pub fn assign<K, M>(
    catalog: &Catalog<K, M>,
    forbidden: &ForbiddenRelation<K>,
    slots: u32,
    opts: &AssignOptions,
) -> Result<AssignOutcome<K>, AssignError>
where
    K: Clone + Debug + Hash + Eq,
{
    let seed = resolve_seed(opts.seed);
    let mut rng = rng_from_seed(seed);
    let mut out = assign_with_rng(catalog, forbidden, slots, opts, &mut rng)?;
    out.seed = Some(seed);
    Ok(out)
}

pub fn assign_with_rng<K, M, R>(
    catalog: &Catalog<K, M>,
    forbidden: &ForbiddenRelation<K>,
    slots: u32,
    opts: &AssignOptions,
    rng: &mut R,
) -> Result<AssignOutcome<K>, AssignError>
where
    K: Clone + Debug + Hash + Eq,
    R: Rng + ?Sized,
{
    if slots == 0 {
        return Err(AssignError::invalid("slot count must be at least 1"));
    }
    if catalog.len() < slots as usize {
        return Err(AssignError::invalid(format!(
            "catalog has {} items, need at least {} for {} slots",
            catalog.len(),
            slots,
            slots
        )));
    }
    let index = ForbiddenIndex::build(catalog, forbidden, slots)?;
    let visit = opts.order.visit(&index);

    debug!(
        event = "assign_start",
        slots,
        items = catalog.len(),
        forbidden = forbidden.len(),
        order = opts.order.name(),
    );

    let mut bt = Backtracker::new(&index, &visit, catalog.len(), opts.mode, opts.limits, rng);
    let outcome = bt.run();
    let stats = bt.stats;

    debug!(
        event = "assign_end",
        nodes = stats.nodes,
        backtracks = stats.backtracks,
        memo_hits = stats.memo_hits,
        pruned = stats.pruned,
    );

    match outcome {
        Outcome::Found(positions) => {
            let ids = positions
                .into_iter()
                .map(|pos| {
                    catalog.id_at(pos).cloned().ok_or_else(|| {
                        AssignError::invalid(format!("catalog position {} out of range", pos))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(AssignOutcome {
                assignment: Assignment::from_ids(ids),
                stats,
                seed: None,
            })
        }
        Outcome::Exhausted => Err(AssignError::Infeasible {
            slots,
            items: catalog.len(),
        }),
        Outcome::Stopped(limit) => Err(AssignError::BudgetExceeded {
            limit,
            nodes: stats.nodes,
        }),
    }
}
