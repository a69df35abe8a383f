//! The animation catalog: stores named shapes, aggregates their
//! placements per tick, and dispatches clear/fill diffs to a
//! [`mctick_core::BlockStore`].
//!
//! Grounded on `Manager` in `shapes.go`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod manager;

pub use error::ManagerError;
pub use manager::{AnimationManager, TickDiff};
