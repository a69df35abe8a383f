//! The judge: deterministic record/compare of per-tick world state over
//! a fixed chunk rectangle.
//!
//! Grounded on `original_source/mcticks/go/judge/judger.go` and
//! `save.go`'s record/compare pair, re-expressed over a small
//! length-prefixed binary codec instead of gob (see [`codec`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod comparer;
pub mod dim;
pub mod error;
pub mod recorder;
mod sample;

pub use comparer::{compare_file, compare_stream, CompareReport};
pub use dim::{Dim, StreamHeader};
pub use error::{JudgeError, MissingChunkWarning};
pub use recorder::{record_stream, record_to_file, RecordReport, TimingSidecar};

