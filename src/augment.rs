//! Augmenting-path search that frees a resource for a blocked key.
//!
//! When every candidate of a key is taken, the search tries to relocate the
//! key occupying one of those candidates, recursively relocating whoever is in
//! the way of *that* move. This is a depth-first search for an augmenting path
//! in the bipartite graph (active keys) × (resources).
//!
//! The recursion is unrolled onto an explicit stack of [`Frame`]s, so the chain
//! length is bounded by the number of resources instead of the native stack.
//! Nothing is written to the [`AssignmentState`] until a free resource is
//! reached; the whole chain is then committed from the innermost frame
//! outward. A failed search leaves the matching untouched.

use crate::assignment::AssignmentState;
use crate::index::KeyIndex;

/// One suspended level of the depth-first search.
///
/// `slot` is the resource this level is trying to free, `owner` the key
/// currently using it, and `cursor` the next position in `owner`'s candidate
/// list to try.
#[derive(Debug, Clone, Copy)]
struct Frame {
    slot: usize,
    owner: usize,
    cursor: usize,
}

/// Counters accumulated across all searches run by one [`AugmentingSearch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Top-level searches started.
    pub searches: u64,
    /// Top-level searches that freed a resource.
    pub successes: u64,
    /// Frames pushed (resources marked visited).
    pub frames: u64,
    /// Reassignments committed by successful chains.
    pub reassignments: u64,
    /// Longest committed chain, counted in reassignments.
    pub longest_chain: usize,
}

/// Reusable scratch space for augmenting searches over one instance.
#[derive(Debug, Clone)]
pub struct AugmentingSearch {
    visited: Vec<bool>,
    stack: Vec<Frame>,
    stats: SearchStats,
}

impl AugmentingSearch {
    /// Scratch sized for `resources` resource slots.
    pub fn new(resources: usize) -> Self {
        Self {
            visited: vec![false; resources],
            stack: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Free one of `key`'s candidates by shuffling the keys that use them.
    ///
    /// Starts a fresh visited set shared by every attempt of this call, so a
    /// resource is explored at most once. Returns the freed resource, or
    /// `None` with the matching unchanged.
    ///
    /// Callers must try [`AssignmentState::find_free_resource`] first; every
    /// candidate is expected to be in use.
    pub fn find_unused_by_shuffling(
        &mut self,
        index: &KeyIndex,
        state: &mut AssignmentState,
        key: usize,
    ) -> Option<usize> {
        self.stats.searches += 1;
        self.visited.fill(false);

        for &slot in index.candidates(key) {
            debug_assert!(
                !state.is_free(slot),
                "augmenting search started while candidate {slot} of key {key} is free"
            );
            if self.visited[slot] {
                continue;
            }
            if self.try_free(index, state, slot) {
                self.stats.successes += 1;
                return Some(slot);
            }
        }
        None
    }

    /// Try to make the in-use resource `slot` free.
    ///
    /// Uses the visited set of the enclosing top-level search.
    pub fn try_free(&mut self, index: &KeyIndex, state: &mut AssignmentState, slot: usize) -> bool {
        // Cheapest case first: the owner can step onto a free sibling.
        if Self::relocate_directly(index, state, slot) {
            self.record_chain(1);
            return true;
        }

        self.stack.clear();
        self.push(state, slot);

        while let Some(top) = self.stack.last_mut() {
            let candidates = index.candidates(top.owner);
            let mut next = None;
            while top.cursor < candidates.len() {
                let candidate = candidates[top.cursor];
                top.cursor += 1;
                if !self.visited[candidate] {
                    next = Some(candidate);
                    break;
                }
            }

            let Some(next) = next else {
                self.stack.pop();
                continue;
            };

            // `next` is in use: the owner's direct check failed when this
            // frame was pushed and nothing has been written since.
            if Self::relocate_directly(index, state, next) {
                let depth = self.commit(state, next);
                self.record_chain(depth);
                return true;
            }
            self.push(state, next);
        }

        false
    }

    /// If the key using `slot` has another free candidate, move it there.
    fn relocate_directly(index: &KeyIndex, state: &mut AssignmentState, slot: usize) -> bool {
        let owner = state
            .owner_of(slot)
            .expect("augmenting search reached a free resource");
        match state.find_free_resource(index, owner) {
            Some(free) => {
                state.rebind(owner, free);
                true
            }
            None => false,
        }
    }

    fn push(&mut self, state: &AssignmentState, slot: usize) {
        let owner = state
            .owner_of(slot)
            .expect("augmenting search reached a free resource");
        self.visited[slot] = true;
        self.stack.push(Frame {
            slot,
            owner,
            cursor: 0,
        });
        self.stats.frames += 1;
    }

    /// Unwind the stack, moving each frame's owner onto the resource freed by
    /// the level above it. Returns the number of reassignments, including the
    /// direct relocation that freed `freed`.
    fn commit(&mut self, state: &mut AssignmentState, mut freed: usize) -> usize {
        let depth = self.stack.len() + 1;
        while let Some(frame) = self.stack.pop() {
            state.rebind(frame.owner, freed);
            freed = frame.slot;
        }
        depth
    }

    fn record_chain(&mut self, depth: usize) {
        self.stats.reassignments += depth as u64;
        self.stats.longest_chain = self.stats.longest_chain.max(depth);
    }
}
