//! Generic keyed container shared by every level of the hierarchy.
//!
//! A [`Registry`] maps normalized ids to items while preserving insertion
//! order, so summaries list entries in the order they were registered.
//! Batch operations ([`Registry::add_all`], [`Registry::remove_all`]) are
//! all-or-nothing: the batch is checked in full before the registry is
//! touched.

use crate::error::{EngineError, Result};
use crate::id::normalize_id;
use crate::summary::Summary;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Which level of the hierarchy a registry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryKind {
    Pipeline,
    Stage,
    Strategy,
}

impl RegistryKind {
    /// Lowercase name, as used in messages ("the stage registry").
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryKind::Pipeline => "pipeline",
            RegistryKind::Stage => "stage",
            RegistryKind::Strategy => "strategy",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Pipeline => write!(f, "Pipeline"),
            RegistryKind::Stage => write!(f, "Stage"),
            RegistryKind::Strategy => write!(f, "Strategy"),
        }
    }
}

/// An item that can be stored in a [`Registry`].
pub trait Registrable {
    /// Registry level this item belongs to.
    const KIND: RegistryKind;

    /// The item's id. Normalized again on every registry boundary.
    fn id(&self) -> &str;

    /// Short, agent-facing description of when to use the item.
    fn description(&self) -> &str;

    /// The `{id, description}` pair shown to agents.
    fn usage_summary(&self) -> Summary {
        Summary::new(self.id(), self.description())
    }
}

/// Insertion-ordered map from normalized id to item.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Registrable> Registry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item. Fails with `DuplicateKey` if its id is already present.
    pub fn add(&mut self, item: T) -> Result<()> {
        let key = normalize_id(item.id());
        if self.index.contains_key(&key) {
            return Err(EngineError::duplicate(T::KIND, key));
        }
        self.insert(key, item);
        Ok(())
    }

    /// Insert a batch of items atomically.
    ///
    /// Fails with `DuplicateKey` if any id collides with an existing entry or
    /// with another item of the same batch; in that case nothing is inserted.
    pub fn add_all(&mut self, items: Vec<T>) -> Result<()> {
        let mut batch = HashSet::with_capacity(items.len());
        for item in &items {
            let key = normalize_id(item.id());
            if self.index.contains_key(&key) || !batch.insert(key.clone()) {
                return Err(EngineError::duplicate(T::KIND, key));
            }
        }
        for item in items {
            let key = normalize_id(item.id());
            self.insert(key, item);
        }
        Ok(())
    }

    /// Remove and return an item. Fails with `NotFound` if absent.
    pub fn remove(&mut self, id: &str) -> Result<T> {
        let key = normalize_id(id);
        let pos = self
            .index
            .remove(&key)
            .ok_or_else(|| EngineError::not_found(T::KIND, key))?;
        let item = self.entries.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Ok(item)
    }

    /// Remove a batch of items atomically.
    ///
    /// Every id must be present (an id repeated in the batch counts as absent
    /// the second time). On failure nothing is removed.
    pub fn remove_all<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<Vec<T>> {
        let mut batch = HashSet::with_capacity(ids.len());
        for id in ids {
            let key = normalize_id(id.as_ref());
            if !self.index.contains_key(&key) || !batch.insert(key.clone()) {
                return Err(EngineError::not_found(T::KIND, key));
            }
        }
        ids.iter().map(|id| self.remove(id.as_ref())).collect()
    }

    /// Look up an item. Fails with `NotFound` if absent.
    pub fn get(&self, id: &str) -> Result<&T> {
        let key = normalize_id(id);
        self.index
            .get(&key)
            .map(|&pos| &self.entries[pos])
            .ok_or_else(|| EngineError::not_found(T::KIND, key))
    }

    /// Look up an item, returning `None` if absent.
    pub fn find(&self, id: &str) -> Option<&T> {
        self.index
            .get(&normalize_id(id))
            .map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(&normalize_id(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Item ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Registrable::id)
    }

    /// `{id, description}` of every item in insertion order.
    pub fn summaries(&self) -> Vec<Summary> {
        self.entries.iter().map(Registrable::usage_summary).collect()
    }

    /// Keep only the items for which `keep` returns `true`.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.entries.retain(|item| keep(item));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, item)| (normalize_id(item.id()), pos))
            .collect();
    }

    fn insert(&mut self, key: String, item: T) {
        self.index.insert(key, self.entries.len());
        self.entries.push(item);
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Registries serialize as the ordered sequence of their entries.
impl<T: Serialize> Serialize for Registry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}
