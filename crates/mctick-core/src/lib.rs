//! Core types and traits shared across the mctick tick engine.
//!
//! This is the leaf crate with zero internal mctick dependencies. It
//! defines the geometric value types, the block-write wire type, and the
//! `BlockStore` external-collaborator contract. Each downstream crate
//! defines its own error enum at the granularity of its component.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block_store;
pub mod geometry;

pub use block_store::{BlockStore, Chunk, Section, SECTIONS_PER_CHUNK};
pub use geometry::{BlockOffset, OrbitPlane, SetBlockRequest, ShapeKind, Vec3};
