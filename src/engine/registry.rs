//! Layered response registry.
//!
//! A registry is two ordered layers of `ResponseKey -> ResponseValue`:
//!
//! ```text
//! base          [hello hi] [hi] [how are you] ... [thank]
//! supplemental  [who are you] ... [hi*]              (* shadows base "hi")
//!                      │
//!                      │ merge(base, supplemental)
//!                      v
//! effective     [hello hi] [hi*] [how are you] ... [thank] [who are you] ...
//! ```
//!
//! Each layer is an arena of entries plus a key index, so lookups are a hash
//! probe and iteration follows insertion order without any sorting.
//!
//! ## Invariants
//!
//! - Layers never shrink; extension only inserts or replaces.
//! - Replacing a key keeps its slot, so iteration order (and therefore ranking
//!   tie-breaks) stays stable for the lifetime of the registry.
//! - `effective` is rebuilt on every extension and always equals
//!   `merge(&base, &supplemental)`.

use crate::{ResponseKey, ResponseValue};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("response key is empty after normalization")]
    EmptyKey,
}

/// One ordered layer of responses.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    entries: Vec<(ResponseKey, ResponseValue)>,
    index: HashMap<ResponseKey, usize>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layer from `(phrase, value)` pairs, failing on the first bad key.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, ResponseValue)>,
        K: AsRef<str>,
    {
        let mut layer = Layer::new();
        for (phrase, value) in entries {
            layer.insert(ResponseKey::new(phrase)?, value);
        }
        Ok(layer)
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: ResponseKey, value: ResponseValue) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ResponseValue> {
        let slot = self.index.get(key)?;
        Some(&self.entries[*slot].1)
    }

    pub fn contains(&self, key: &ResponseKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ResponseKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResponseKey, &ResponseValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Overlay `overrides` on `base`.
///
/// Base keys come first in base order, taking the override value when one
/// exists; keys only present in `overrides` follow in their own order.
pub fn merge(base: &Layer, overrides: &Layer) -> Layer {
    let mut merged = Layer::new();
    for (key, value) in base.iter() {
        let value = overrides.index.get(key).map(|&slot| &overrides.entries[slot].1).unwrap_or(value);
        merged.insert(key.clone(), value.clone());
    }
    for (key, value) in overrides.iter() {
        if !base.contains(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Base layer, supplemental layer and their cached merge.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    base: Layer,
    supplemental: Layer,
    effective: Layer,
}

impl Registry {
    pub fn new(base: Layer, supplemental: Layer) -> Self {
        let effective = merge(&base, &supplemental);
        Registry { base, supplemental, effective }
    }

    /// A registry with a single base layer and nothing supplemental.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, ResponseValue)>,
        K: AsRef<str>,
    {
        Ok(Registry::new(Layer::from_entries(entries)?, Layer::new()))
    }

    /// Fold `extra` into the supplemental layer.
    ///
    /// All keys are validated before anything is inserted, so a failed call
    /// leaves the registry untouched.
    pub fn extend<I, K>(&mut self, extra: I) -> Result<usize, RegistryError>
    where
        I: IntoIterator<Item = (K, ResponseValue)>,
        K: AsRef<str>,
    {
        let batch = extra
            .into_iter()
            .map(|(phrase, value)| ResponseKey::new(phrase).map(|key| (key, value)))
            .collect::<Result<Vec<_>, _>>()?;

        let added = batch.len();
        for (key, value) in batch {
            self.supplemental.insert(key, value);
        }
        self.effective = merge(&self.base, &self.supplemental);

        tracing::debug!(added, total = self.effective.len(), "registry extended");
        Ok(added)
    }

    /// The merged view that ranking runs against.
    pub fn effective(&self) -> &Layer {
        &self.effective
    }

    pub fn base(&self) -> &Layer {
        &self.base
    }

    pub fn supplemental(&self) -> &Layer {
        &self.supplemental
    }

    pub fn get(&self, key: &str) -> Option<&ResponseValue> {
        self.effective.get(key)
    }

    pub fn len(&self) -> usize {
        self.effective.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effective.is_empty()
    }
}
