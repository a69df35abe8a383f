//! Errors raised by the judge recorder/comparer.

use std::fmt;
use std::io;

use mctick_engine::config::ConfigError;

/// I/O and stream-format errors from `record`/`compare`.
#[derive(Debug)]
pub enum JudgeError {
    /// The `SampleConfig` failed validation (e.g. `sample_interval == 0`
    /// or an empty/inverted chunk rectangle).
    InvalidConfig(ConfigError),
    /// Recording requires manual stepping (`tick_rate == 0`).
    TickRateNotZero,
    /// Underlying file or stream I/O failed.
    Io(io::Error),
    /// The stream's `sample_rate` header field didn't match the caller's.
    SampleRateMismatch {
        /// Value recorded in the stream.
        expected: u64,
        /// Value the caller passed.
        actual: u64,
    },
    /// The stream's `count` header field didn't match the caller's.
    CountMismatch {
        /// Value recorded in the stream.
        expected: u64,
        /// Value implied by the caller's `ticks`/`sample_interval`.
        actual: u64,
    },
    /// A sampled `Dim` differed from the reference at a specific chunk.
    ChunkMismatch {
        /// The tick at which the mismatch was observed.
        tick: u64,
        /// Chunk X coordinate.
        chunk_x: i32,
        /// Chunk Z coordinate.
        chunk_z: i32,
    },
    /// The stream ended before the expected number of `Dim` records.
    UnexpectedEof,
}

impl fmt::Display for JudgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "invalid sample config: {e}"),
            Self::TickRateNotZero => {
                write!(f, "recording requires tick_rate == 0 (deterministic stepping)")
            }
            Self::Io(e) => write!(f, "judge stream I/O error: {e}"),
            Self::SampleRateMismatch { expected, actual } => write!(
                f,
                "stream sample_rate {expected} does not match requested {actual}"
            ),
            Self::CountMismatch { expected, actual } => {
                write!(f, "stream count {expected} does not match requested {actual}")
            }
            Self::ChunkMismatch {
                tick,
                chunk_x,
                chunk_z,
            } => write!(f, "chunk ({chunk_x},{chunk_z}) mismatched at tick {tick}"),
            Self::UnexpectedEof => write!(f, "judge stream ended before the expected record count"),
        }
    }
}

impl std::error::Error for JudgeError {}

impl From<io::Error> for JudgeError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for JudgeError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfig(e)
    }
}

/// A chunk the backend reported as unloaded during a sample. Written (and
/// compared) as an empty chunk; the warning is surfaced as data rather
/// than a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissingChunkWarning {
    /// The tick at which the chunk was missing.
    pub tick: u64,
    /// Chunk X coordinate.
    pub chunk_x: i32,
    /// Chunk Z coordinate.
    pub chunk_z: i32,
}
