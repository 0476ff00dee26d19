//! The live matching between active keys and resource slots.
//!
//! Stored as two index arrays that must always be mutual inverses:
//! `owner[slot]` is the key currently using a resource and `held[key]` is the
//! resource a key currently uses. Neither side owns the other; both are plain
//! indices into the [`KeyIndex`] and the catalog.
//!
//! The state also remembers the scanner's current window `[start, end)`.
//! Keys may only be bound, searched for or released inside the window, or at
//! `end` while it is being claimed; debug builds panic on anything else.
//! A fresh state's window spans every key.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::index::KeyIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentState {
    owner: Vec<Option<usize>>,
    held: Vec<Option<usize>>,
    active: usize,
    window: Range<usize>,
}

impl AssignmentState {
    /// Empty matching sized for `index`.
    pub fn new(index: &KeyIndex) -> Self {
        Self::with_sizes(index.len(), index.resource_count())
    }

    pub fn with_sizes(keys: usize, resources: usize) -> Self {
        Self {
            owner: vec![None; resources],
            held: vec![None; keys],
            active: 0,
            window: 0..keys,
        }
    }

    /// Current window of keys the scanner is working on.
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    /// Restrict subsequent operations to keys in `[start, end)`.
    pub fn open_window(&mut self, start: usize, end: usize) {
        debug_assert!(start < end && end <= self.held.len(), "bad window [{start}, {end})");
        self.window = start..end;
    }

    /// Admit the frontier key into the window.
    pub fn extend_window(&mut self) {
        debug_assert!(self.window.end < self.held.len(), "window already covers every key");
        self.window.end += 1;
    }

    #[inline]
    fn debug_check_in_window(&self, key: usize) {
        debug_assert!(
            self.window.contains(&key),
            "key {key} outside window {:?}",
            self.window
        );
    }

    /// Inside the window or the frontier key being claimed.
    #[inline]
    fn debug_check_reachable(&self, key: usize) {
        debug_assert!(
            self.window.start <= key && key <= self.window.end,
            "key {key} outside window {:?}",
            self.window
        );
    }

    /// Key currently using resource `slot`.
    #[inline]
    pub fn owner_of(&self, slot: usize) -> Option<usize> {
        self.owner[slot]
    }

    /// Resource currently used by `key`.
    #[inline]
    pub fn resource_of(&self, key: usize) -> Option<usize> {
        self.held[key]
    }

    #[inline]
    pub fn is_active(&self, key: usize) -> bool {
        self.held[key].is_some()
    }

    #[inline]
    pub fn is_free(&self, slot: usize) -> bool {
        self.owner[slot].is_none()
    }

    /// Number of keys currently holding a resource.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// First candidate of `key` nobody is using. Does not mutate.
    pub fn find_free_resource(&self, index: &KeyIndex, key: usize) -> Option<usize> {
        self.debug_check_reachable(key);
        index
            .candidates(key)
            .iter()
            .copied()
            .find(|&slot| self.is_free(slot))
    }

    /// Bootstrap a freshly opened window: if `key` holds nothing, give it its
    /// first candidate.
    ///
    /// Only valid when the first candidate is not in use, which holds whenever
    /// the scanner opens a window at a key it has not matched yet.
    pub fn assign_default(&mut self, index: &KeyIndex, key: usize) {
        self.debug_check_in_window(key);
        if self.is_active(key) {
            return;
        }
        let slot = index.candidates(key)[0];
        self.bind(key, slot);
    }

    /// Link an inactive key to a free resource.
    pub fn bind(&mut self, key: usize, slot: usize) {
        self.debug_check_reachable(key);
        debug_assert!(self.held[key].is_none(), "key {key} already holds a resource");
        debug_assert!(
            self.owner[slot].is_none(),
            "resource slot {slot} already used by key {:?}",
            self.owner[slot]
        );
        self.owner[slot] = Some(key);
        self.held[key] = Some(slot);
        self.active += 1;
    }

    /// Move an active key onto a free resource, releasing the one it held.
    pub fn rebind(&mut self, key: usize, slot: usize) {
        self.debug_check_in_window(key);
        debug_assert!(self.owner[slot].is_none(), "rebind target {slot} is in use");
        let previous = self.held[key].expect("rebind on an inactive key");
        self.owner[previous] = None;
        self.owner[slot] = Some(key);
        self.held[key] = Some(slot);
    }

    /// Unlink `key` from its resource. No-op if `key` is inactive.
    pub fn release(&mut self, key: usize) {
        self.debug_check_in_window(key);
        if let Some(slot) = self.held[key].take() {
            debug_assert_eq!(self.owner[slot], Some(key));
            self.owner[slot] = None;
            self.active -= 1;
        }
    }

    /// Verify both maps are mutual inverses and the active count agrees.
    pub fn check_invariants(&self) -> Result<()> {
        for (slot, owner) in self.owner.iter().enumerate() {
            if let Some(key) = *owner {
                match self.held.get(key) {
                    Some(Some(held)) if *held == slot => {}
                    other => {
                        return Err(Error::invariant(format!(
                            "resource slot {slot} claims key {key}, but key holds {other:?}"
                        )))
                    }
                }
            }
        }
        let mut active = 0;
        for (key, held) in self.held.iter().enumerate() {
            if let Some(slot) = *held {
                active += 1;
                match self.owner.get(slot) {
                    Some(Some(owner)) if *owner == key => {}
                    other => {
                        return Err(Error::invariant(format!(
                            "key {key} holds resource slot {slot}, but slot is owned by {other:?}"
                        )))
                    }
                }
            }
        }
        if active != self.active {
            return Err(Error::invariant(format!(
                "active count {} disagrees with {active} held links",
                self.active
            )));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn corrupt_owner(&mut self, slot: usize, key: Option<usize>) {
        self.owner[slot] = key;
    }
}
