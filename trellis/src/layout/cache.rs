//! Per-frame memo of intrinsic sizes.
//!
//! The bottom-up pre-pass may ask for the same node's size several times
//! (once for a flex basis, again for its cross size at the final main size).
//! Results are kept for the duration of one `build` call only; a new frame
//! starts with an empty cache because the tree may have changed.

use std::collections::HashMap;

use super::tree::NodeId;
use crate::primitives::Size;

/// What a size query depends on besides the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasureKey {
    pub node: NodeId,
    /// Parent content size, where known.
    pub parent: (Option<i32>, Option<i32>),
    /// Sizes imposed by the parent's layout (flex main size, stretch).
    pub forced: (Option<i32>, Option<i32>),
}

#[derive(Debug, Default)]
pub struct MeasureCache {
    entries: HashMap<MeasureKey, Size>,

    /// Stats for debugging
    #[cfg(debug_assertions)]
    pub hits: u64,
    #[cfg(debug_assertions)]
    pub misses: u64,
}

impl MeasureCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&mut self, key: &MeasureKey) -> Option<Size> {
        let found = self.entries.get(key).copied();
        #[cfg(debug_assertions)]
        {
            if found.is_some() {
                self.hits += 1;
            } else {
                self.misses += 1;
            }
        }
        found
    }

    #[inline]
    pub fn insert(&mut self, key: MeasureKey, size: Size) {
        self.entries.insert(key, size);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache stats (debug builds only).
    #[cfg(debug_assertions)]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
