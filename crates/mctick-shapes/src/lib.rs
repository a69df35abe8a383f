//! Shape kinematics: pure functions mapping `(shape, tick)` to block
//! placements.
//!
//! Nothing in this crate touches a `BlockStore` or holds a lock; every
//! function here is a pure computation over a [`Shape`] and a tick
//! number, grounded on `shapes.go`'s `BlocksAtTick` / `positionAtTick` /
//! `rotationAtTick` triad in the original source.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod generators;
pub mod random;
pub mod shape;

pub use generators::{sphere_offsets, ring_offsets, rect_offsets};
pub use random::Mt19937;
pub use shape::{Movement, Orbit, RandomSpec, Shape, ShapeError, Spin};
