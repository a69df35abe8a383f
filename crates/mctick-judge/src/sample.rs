//! Rectangle snapshotting shared by the recorder and the comparer.

use mctick_core::{BlockStore, Chunk};
use mctick_engine::config::SampleConfig;

use crate::dim::Dim;
use crate::error::MissingChunkWarning;

/// Snapshot the `(x1,z1)..(x2,z2)` chunk rectangle in row-major (x then
/// z) order. A chunk the backend reports as unloaded is recorded as a
/// [`MissingChunkWarning`] and written as an empty chunk.
pub(crate) fn snapshot_rectangle<S: BlockStore>(
    store: &S,
    config: &SampleConfig,
    tick: u64,
    missing: &mut Vec<MissingChunkWarning>,
) -> Dim {
    let width = (config.x2 - config.x1) as usize;
    let height = (config.z2 - config.z1) as usize;
    let mut chunks = Vec::with_capacity(width * height);
    for iz in 0..height {
        for ix in 0..width {
            let chunk_x = config.x1 + ix as i32;
            let chunk_z = config.z1 + iz as i32;
            match store.load_chunk(chunk_x, chunk_z) {
                Some(chunk) => chunks.push(chunk),
                None => {
                    missing.push(MissingChunkWarning {
                        tick,
                        chunk_x,
                        chunk_z,
                    });
                    chunks.push(Chunk::empty());
                }
            }
        }
    }
    Dim { chunks }
}

/// Number of ticks in `0..ticks` divisible by `sample_interval`.
pub(crate) fn expected_sample_count(ticks: u64, sample_interval: u64) -> u64 {
    if ticks == 0 {
        0
    } else {
        ticks.div_ceil(sample_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_count_matches_exact_division() {
        assert_eq!(expected_sample_count(100, 10), 10);
    }

    #[test]
    fn expected_count_rounds_up() {
        assert_eq!(expected_sample_count(101, 10), 11);
        assert_eq!(expected_sample_count(5, 10), 1);
    }

    #[test]
    fn expected_count_zero_ticks() {
        assert_eq!(expected_sample_count(0, 10), 0);
    }
}
