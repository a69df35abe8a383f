//! An in-memory [`mctick_core::BlockStore`] for exercising the tick
//! pipeline without a real voxel backend.
//!
//! Grounded on the mock-backed test doubles in `murk-test-utils`.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::{HashMap, HashSet};

use mctick_core::{BlockStore, Chunk, SetBlockRequest, SECTIONS_PER_CHUNK};

/// World Y coordinate the first section starts at.
pub const MIN_Y: i32 = 0;
/// Total addressable world height (`SECTIONS_PER_CHUNK * 16`).
pub const CHUNK_HEIGHT: i32 = (SECTIONS_PER_CHUNK as i32) * 16;

/// A flat `HashMap`-backed block store. Only non-air cells are retained.
pub struct FakeBlockStore {
    blocks: HashMap<(i32, i32, i32), i32>,
    ticks: u64,
    clear_ticks_calls: u32,
    unloaded_chunks: HashSet<(i32, i32)>,
}

impl Default for FakeBlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBlockStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            ticks: 0,
            clear_ticks_calls: 0,
            unloaded_chunks: HashSet::new(),
        }
    }

    /// Number of non-air cells currently stored.
    pub fn cell_count(&self) -> usize {
        self.blocks.len()
    }

    /// Clone the current non-air cell map, for equality assertions in
    /// tests comparing two independently-driven stores.
    pub fn snapshot(&self) -> HashMap<(i32, i32, i32), i32> {
        self.blocks.clone()
    }

    /// Number of logical ticks this store has observed via `tick()`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of times `clear_ticks()` has been called.
    pub fn clear_ticks_calls(&self) -> u32 {
        self.clear_ticks_calls
    }

    /// Mark a chunk as unloaded so `load_chunk` returns `None` for it,
    /// simulating a backend that dropped a chunk mid-tick.
    pub fn unload_chunk(&mut self, x: i32, z: i32) {
        self.unloaded_chunks.insert((x, z));
    }
}

impl BlockStore for FakeBlockStore {
    fn batch_set_blocks(&mut self, requests: &[SetBlockRequest]) {
        for req in requests {
            if req.is_clear() {
                self.blocks.remove(&req.key());
            } else {
                self.blocks.insert(req.key(), req.state);
            }
        }
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }

    fn load_chunk(&self, x: i32, z: i32) -> Option<Chunk> {
        if self.unloaded_chunks.contains(&(x, z)) {
            return None;
        }
        let mut chunk = Chunk::empty();
        for (&(bx, by, bz), &state) in &self.blocks {
            if by < MIN_Y || by >= MIN_Y + CHUNK_HEIGHT {
                continue;
            }
            if bx.div_euclid(16) != x || bz.div_euclid(16) != z {
                continue;
            }
            let local_x = bx.rem_euclid(16);
            let local_z = bz.rem_euclid(16);
            let local_y_total = by - MIN_Y;
            let section_idx = (local_y_total / 16) as usize;
            let local_y = local_y_total % 16;
            let idx = (local_y * 256 + local_z * 16 + local_x) as usize;
            chunk.sections[section_idx].set_block(idx, state);
        }
        Some(chunk)
    }

    fn clear_ticks(&mut self) {
        self.clear_ticks_calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_set_and_clear_round_trip() {
        let mut store = FakeBlockStore::new();
        store.batch_set_blocks(&[SetBlockRequest::new(1, 2, 3, 7)]);
        assert_eq!(store.cell_count(), 1);
        store.batch_set_blocks(&[SetBlockRequest::new(1, 2, 3, 0)]);
        assert_eq!(store.cell_count(), 0);
    }

    #[test]
    fn load_chunk_reflects_writes_within_bounds() {
        let mut store = FakeBlockStore::new();
        store.batch_set_blocks(&[SetBlockRequest::new(5, 10, 5, 3)]);
        let chunk = store.load_chunk(0, 0).unwrap();
        assert_eq!(chunk.sections[0].blockcount, 1);
        let empty = store.load_chunk(1, 1).unwrap();
        assert_eq!(empty.sections[0].blockcount, 0);
    }

    #[test]
    fn unloaded_chunk_is_none() {
        let mut store = FakeBlockStore::new();
        store.unload_chunk(2, 2);
        store.batch_set_blocks(&[SetBlockRequest::new(33, 1, 33, 4)]);
        assert!(store.load_chunk(2, 2).is_none());
    }
}
