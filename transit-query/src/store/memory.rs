//! In-memory document store.

use std::collections::BTreeMap;
use std::ops::Bound;

use super::{DocumentStore, Located, LocationIndex, Row, StorageKey, StoreError};
use crate::domain::GeoPoint;

/// A document store backed by a sorted map.
///
/// Enumeration order is always ascending key order, so results that depend
/// on "first enumerated" are reproducible.
#[derive(Debug, Clone)]
pub struct MemoryStore<D> {
    docs: BTreeMap<String, D>,
}

impl<D> Default for MemoryStore<D> {
    fn default() -> Self {
        Self {
            docs: BTreeMap::new(),
        }
    }
}

impl<D> MemoryStore<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, replacing any previous one under the same key.
    pub fn insert(&mut self, key: impl Into<String>, doc: D) {
        self.docs.insert(key.into(), doc);
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl<D: StorageKey> MemoryStore<D> {
    /// Build a store keyed by each document's own storage key.
    pub fn from_docs(docs: impl IntoIterator<Item = D>) -> Self {
        docs.into_iter()
            .map(|doc| (doc.storage_key(), doc))
            .collect()
    }
}

impl<D> FromIterator<(String, D)> for MemoryStore<D> {
    fn from_iter<I: IntoIterator<Item = (String, D)>>(iter: I) -> Self {
        Self {
            docs: iter.into_iter().collect(),
        }
    }
}

impl<D: Clone> DocumentStore<D> for MemoryStore<D> {
    async fn get(&self, key: &str) -> Result<D, StoreError> {
        self.docs
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn range(
        &self,
        start: &str,
        end: &str,
        include_docs: bool,
    ) -> Result<Vec<Row<D>>, StoreError> {
        // BTreeMap::range panics on inverted bounds
        if start > end {
            return Ok(Vec::new());
        }

        Ok(self
            .docs
            .range::<str, _>((Bound::Included(start), Bound::Included(end)))
            .map(|(key, doc)| Row::new(key.clone(), include_docs.then(|| doc.clone())))
            .collect())
    }

    async fn list_all(&self, include_docs: bool) -> Result<Vec<Row<D>>, StoreError> {
        Ok(self
            .docs
            .iter()
            .map(|(key, doc)| Row::new(key.clone(), include_docs.then(|| doc.clone())))
            .collect())
    }
}

impl<D: Located> LocationIndex for MemoryStore<D> {
    async fn locations(&self) -> Result<Vec<(String, GeoPoint)>, StoreError> {
        Ok(self
            .docs
            .iter()
            .map(|(key, doc)| (key.clone(), doc.location()))
            .collect())
    }
}
