use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::warn;

use super::catalog::Catalog;
use super::slot::Slot;
use crate::error::AssignError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenRelation<K>
where
    K: Hash + Eq,
{
    by_slot: HashMap<Slot, HashSet<K>>,
}

impl<K> Default for ForbiddenRelation<K>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self {
            by_slot: HashMap::new(),
        }
    }
}

impl<K> ForbiddenRelation<K>
where
    K: Clone + Debug + Hash + Eq,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Slot)>,
    {
        let mut rel = Self::new();
        for (item, slot) in pairs {
            rel.forbid(item, slot);
        }
        rel
    }

    pub fn forbid(&mut self, item: K, slot: Slot) -> &mut Self {
        self.by_slot.entry(slot).or_default().insert(item);
        self
    }

    pub fn is_forbidden(&self, item: &K, slot: Slot) -> bool {
        self.by_slot
            .get(&slot)
            .is_some_and(|items| items.contains(item))
    }

    pub fn is_allowed(&self, item: &K, slot: Slot) -> bool {
        !self.is_forbidden(item, slot)
    }

    pub fn len(&self) -> usize {
        self.by_slot.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&K, Slot)> {
        self.by_slot
            .iter()
            .flat_map(|(&slot, items)| items.iter().map(move |k| (k, slot)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenIndex {
    // rows[slot][item] is true when the item may not go there
    rows: Vec<Vec<bool>>,
    allowed: Vec<usize>,
}

impl ForbiddenIndex {
    pub fn build<K, M>(
        catalog: &Catalog<K, M>,
        relation: &ForbiddenRelation<K>,
        slots: u32,
    ) -> Result<Self, AssignError>
    where
        K: Clone + Debug + Hash + Eq,
    {
        let n = catalog.len();
        let mut rows = vec![vec![false; n]; slots as usize];
        for (item, slot) in relation.pairs() {
            Slot::validate(slot.get(), slots)?;
            match catalog.index_of(item) {
                Some(pos) => rows[slot.index()][pos] = true,
                None => warn!(
                    item = ?item,
                    slot = slot.get(),
                    "forbidden pair names an item not in the catalog"
                ),
            }
        }
        let allowed = rows
            .iter()
            .map(|row| row.iter().filter(|&&f| !f).count())
            .collect();
        Ok(Self { rows, allowed })
    }

    pub fn slots(&self) -> usize {
        self.rows.len()
    }

    pub fn is_forbidden(&self, slot_idx: usize, item: usize) -> bool {
        self.rows[slot_idx][item]
    }

    pub fn allowed_count(&self, slot_idx: usize) -> usize {
        self.allowed[slot_idx]
    }
}
