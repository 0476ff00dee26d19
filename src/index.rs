//! Sorted value index derived from a [`ResourceCatalog`].
//!
//! The index is the left-hand side of the bipartite graph: one entry per
//! distinct value, ascending, each carrying the slots of the resources that
//! offer it. Candidate order is discovery order (catalog order, then the order
//! values appear within a resource) and is the tie-break for default
//! assignment, so it must be reproducible.

use std::collections::{BTreeMap, HashSet};

use crate::catalog::ResourceCatalog;
use crate::error::{Error, Result};

/// One distinct value together with the resources that can back it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub value: i64,
    /// Resource slots offering `value`, in discovery order, without repeats.
    pub candidates: Vec<usize>,
}

/// Ascending sequence of distinct values with their candidate lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyIndex {
    entries: Vec<KeyEntry>,
    resource_count: usize,
}

impl KeyIndex {
    /// Index every value offered by `catalog`.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if the catalog is empty, a resource offers no
    /// values, or two resources share an id.
    pub fn build(catalog: &ResourceCatalog) -> Result<Self> {
        if catalog.is_empty() {
            return Err(Error::invalid_input("catalog contains no resources"));
        }

        let mut seen_ids = HashSet::with_capacity(catalog.len());
        let mut by_value: BTreeMap<i64, Vec<usize>> = BTreeMap::new();

        for (slot, resource) in catalog.iter().enumerate() {
            if !seen_ids.insert(resource.id) {
                return Err(Error::invalid_input(format!(
                    "duplicate resource id {}",
                    resource.id
                )));
            }
            if resource.values.is_empty() {
                return Err(Error::invalid_input(format!(
                    "resource {} offers no values",
                    resource.id
                )));
            }
            for &value in &resource.values {
                let slots = by_value.entry(value).or_default();
                // A resource repeating a value is still one candidate.
                if slots.last() != Some(&slot) {
                    slots.push(slot);
                }
            }
        }

        let entries = by_value
            .into_iter()
            .map(|(value, candidates)| KeyEntry { value, candidates })
            .collect();

        Ok(Self {
            entries,
            resource_count: catalog.len(),
        })
    }

    /// Number of distinct values.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of resources in the source catalog.
    #[inline]
    pub fn resource_count(&self) -> usize {
        self.resource_count
    }

    #[inline]
    pub fn value(&self, key: usize) -> i64 {
        self.entries[key].value
    }

    #[inline]
    pub fn candidates(&self, key: usize) -> &[usize] {
        &self.entries[key].candidates
    }

    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    /// Position of `value` in the index, if any resource offers it.
    pub fn position(&self, value: i64) -> Option<usize> {
        self.entries.binary_search_by_key(&value, |e| e.value).ok()
    }
}
