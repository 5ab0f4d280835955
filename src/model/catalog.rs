use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::AssignError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<K, M = ()> {
    pub id: K,
    pub meta: M,
}

impl<K> Item<K, ()> {
    pub fn bare(id: K) -> Self {
        Self { id, meta: () }
    }
}

impl<K, M> Item<K, M> {
    pub fn new(id: K, meta: M) -> Self {
        Self { id, meta }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<K, M = ()>
where
    K: Hash + Eq,
{
    items: IndexMap<K, M>,
}

impl<K, M> Catalog<K, M>
where
    K: Clone + Debug + Hash + Eq,
{
    pub fn new<I>(items: I) -> Result<Self, AssignError>
    where
        I: IntoIterator<Item = Item<K, M>>,
    {
        let mut map = IndexMap::new();
        for item in items {
            match map.entry(item.id) {
                Entry::Occupied(e) => {
                    return Err(AssignError::invalid(format!(
                        "duplicate item id {:?} in catalog",
                        e.key()
                    )));
                }
                Entry::Vacant(e) => {
                    e.insert(item.meta);
                }
            }
        }
        Ok(Self { items: map })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.items.contains_key(id)
    }

    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.items.get_index_of(id)
    }

    pub fn id_at(&self, idx: usize) -> Option<&K> {
        self.items.get_index(idx).map(|(k, _)| k)
    }

    pub fn meta(&self, id: &K) -> Option<&M> {
        self.items.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &K> {
        self.items.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &M)> {
        self.items.iter()
    }
}

impl<K> Catalog<K, ()>
where
    K: Clone + Debug + Hash + Eq,
{
    pub fn from_ids<I>(ids: I) -> Result<Self, AssignError>
    where
        I: IntoIterator<Item = K>,
    {
        Self::new(ids.into_iter().map(Item::bare))
    }
}
