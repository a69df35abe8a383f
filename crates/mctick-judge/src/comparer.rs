//! Compare mode: step the scheduler and verify the backend's sampled
//! state against a previously recorded stream, failing fast on the
//! first mismatch.
//!
//! Grounded on `Compare` in
//! `original_source/mcticks/go/judge/judger.go`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use mctick_core::BlockStore;
use mctick_engine::config::SampleConfig;
use mctick_engine::TickScheduler;

use crate::dim::{read_dim, read_header};
use crate::error::{JudgeError, MissingChunkWarning};
use crate::sample::{expected_sample_count, snapshot_rectangle};

/// Outcome of a successful `compare_*` call.
#[derive(Clone, Debug, PartialEq)]
pub struct CompareReport {
    /// Number of sampled ticks verified equal.
    pub ticks_compared: u64,
    /// Chunks the backend reported as unloaded during comparison.
    pub missing_chunks: Vec<MissingChunkWarning>,
}

/// Compare mode over an arbitrary reader (already gzip-unwrapped if the
/// stream was compressed).
pub fn compare_stream<S: BlockStore>(
    scheduler: &TickScheduler<S>,
    config: SampleConfig,
    reader: &mut impl Read,
) -> Result<CompareReport, JudgeError> {
    config.validate()?;
    let header = read_header(reader)?;
    let expected_count = expected_sample_count(config.ticks, config.sample_interval);
    if header.count != expected_count {
        return Err(JudgeError::CountMismatch {
            expected: header.count,
            actual: expected_count,
        });
    }
    if header.sample_rate != config.sample_interval {
        return Err(JudgeError::SampleRateMismatch {
            expected: header.sample_rate,
            actual: config.sample_interval,
        });
    }

    let mut missing_chunks = Vec::new();
    let mut ticks_compared = 0u64;
    let width = (config.x2 - config.x1) as usize;
    for tick in 0..config.ticks {
        scheduler.tick();
        if tick % config.sample_interval != 0 {
            continue;
        }

        let recorded = match read_dim(reader) {
            Ok(dim) => dim,
            Err(JudgeError::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(JudgeError::UnexpectedEof)
            }
            Err(e) => return Err(e),
        };
        let live = scheduler.with_manager(|_mgr, store| {
            snapshot_rectangle(store, &config, tick, &mut missing_chunks)
        });

        for (idx, (recorded_chunk, live_chunk)) in
            recorded.chunks.iter().zip(live.chunks.iter()).enumerate()
        {
            if !recorded_chunk.equals_for_judge(live_chunk) {
                return Err(JudgeError::ChunkMismatch {
                    tick,
                    chunk_x: config.x1 + (idx % width) as i32,
                    chunk_z: config.z1 + (idx / width) as i32,
                });
            }
        }
        ticks_compared += 1;
    }

    Ok(CompareReport {
        ticks_compared,
        missing_chunks,
    })
}

/// Compare mode against a gzip file.
pub fn compare_file<S: BlockStore>(
    scheduler: &TickScheduler<S>,
    config: SampleConfig,
    path: &Path,
) -> Result<CompareReport, JudgeError> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    compare_stream(scheduler, config, &mut decoder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::record_stream;
    use mctick_test_utils::FakeBlockStore;

    fn config() -> SampleConfig {
        SampleConfig {
            x1: 0,
            z1: 0,
            x2: 2,
            z2: 2,
            ticks: 20,
            sample_interval: 5,
        }
    }

    #[test]
    fn compare_rejects_zero_sample_interval_instead_of_panicking() {
        let scheduler = TickScheduler::new(FakeBlockStore::new());
        let mut bad_config = config();
        bad_config.sample_interval = 0;
        let mut cursor: &[u8] = &[];
        let err = compare_stream(&scheduler, bad_config, &mut cursor).unwrap_err();
        assert!(matches!(err, JudgeError::InvalidConfig(_)));
    }

    #[test]
    fn compare_succeeds_against_an_independent_identical_run() {
        let recording_scheduler = TickScheduler::new(FakeBlockStore::new());
        let mut buf = Vec::new();
        record_stream(&recording_scheduler, config(), &mut buf).unwrap();

        let comparing_scheduler = TickScheduler::new(FakeBlockStore::new());
        let mut cursor = &buf[..];
        let report = compare_stream(&comparing_scheduler, config(), &mut cursor).unwrap();
        assert_eq!(report.ticks_compared, 4);
    }

    #[test]
    fn compare_detects_sample_rate_mismatch() {
        let recording_scheduler = TickScheduler::new(FakeBlockStore::new());
        let mut buf = Vec::new();
        record_stream(&recording_scheduler, config(), &mut buf).unwrap();

        let mut wrong = config();
        wrong.sample_interval = 10;
        let comparing_scheduler = TickScheduler::new(FakeBlockStore::new());
        let mut cursor = &buf[..];
        let err = compare_stream(&comparing_scheduler, wrong, &mut cursor).unwrap_err();
        assert!(matches!(err, JudgeError::CountMismatch { .. }));
    }

    #[test]
    fn compare_fails_fast_on_chunk_mismatch() {
        let recording_scheduler = TickScheduler::new(FakeBlockStore::new());
        let mut buf = Vec::new();
        record_stream(&recording_scheduler, config(), &mut buf).unwrap();

        let mut divergent_store = FakeBlockStore::new();
        divergent_store.batch_set_blocks(&[mctick_core::SetBlockRequest::new(0, 64, 0, 9)]);
        let comparing_scheduler = TickScheduler::new(divergent_store);
        let mut cursor = &buf[..];
        let err = compare_stream(&comparing_scheduler, config(), &mut cursor).unwrap_err();
        assert!(matches!(err, JudgeError::ChunkMismatch { tick: 0, .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::recorder::record_stream;
    use mctick_test_utils::FakeBlockStore;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn compare_of_an_independent_identical_run_always_succeeds(
            ticks in 1u64..40,
            sample_interval in 1u64..10,
            width in 1i32..3,
            height in 1i32..3,
        ) {
            let config = SampleConfig {
                x1: 0,
                z1: 0,
                x2: width,
                z2: height,
                ticks,
                sample_interval,
            };
            let recording_scheduler = TickScheduler::new(FakeBlockStore::new());
            let mut buf = Vec::new();
            record_stream(&recording_scheduler, config, &mut buf).unwrap();

            let comparing_scheduler = TickScheduler::new(FakeBlockStore::new());
            let mut cursor = &buf[..];
            let report = compare_stream(&comparing_scheduler, config, &mut cursor).unwrap();
            prop_assert_eq!(report.ticks_compared, ticks.div_ceil(sample_interval));
        }
    }
}
