use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use super::catalog::Catalog;
use super::forbidden::ForbiddenRelation;
use super::slot::Slot;
use crate::error::AssignError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<K> {
    ids: Vec<K>,
}

impl<K> Assignment<K>
where
    K: Clone + Debug + Hash + Eq,
{
    pub fn from_ids(ids: Vec<K>) -> Self {
        Self { ids }
    }

    pub fn slots(&self) -> u32 {
        self.ids.len() as u32
    }

    pub fn get(&self, slot: Slot) -> Option<&K> {
        if !slot.is_valid_for(self.slots()) {
            return None;
        }
        self.ids.get(slot.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &K)> {
        self.ids
            .iter()
            .enumerate()
            .map(|(i, id)| (Slot::from_index(i), id))
    }

    pub fn ids_in_slot_order(&self) -> &[K] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<K> {
        self.ids
    }

    pub fn slot_of(&self, id: &K) -> Option<Slot> {
        self.ids
            .iter()
            .position(|k| k == id)
            .map(Slot::from_index)
    }

    pub fn verify<M>(
        &self,
        catalog: &Catalog<K, M>,
        forbidden: &ForbiddenRelation<K>,
        slots: u32,
    ) -> Result<(), AssignError> {
        if self.slots() != slots {
            return Err(AssignError::invalid(format!(
                "assignment has {} entries, expected {}",
                self.ids.len(),
                slots
            )));
        }
        let mut seen = HashSet::with_capacity(self.ids.len());
        for (slot, id) in self.iter() {
            if !catalog.contains(id) {
                return Err(AssignError::invalid(format!(
                    "slot {} holds {:?}, which is not in the catalog",
                    slot, id
                )));
            }
            if !seen.insert(id) {
                return Err(AssignError::invalid(format!(
                    "item {:?} appears in more than one slot",
                    id
                )));
            }
            if forbidden.is_forbidden(id, slot) {
                return Err(AssignError::invalid(format!(
                    "item {:?} is forbidden in slot {}",
                    id, slot
                )));
            }
        }
        Ok(())
    }
}
