//! Mctick: a deterministic tick engine for a shape-based voxel animation
//! system.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all `mctick-*` sub-crates. For most users, adding `mctick` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use mctick::prelude::*;
//!
//! # #[derive(Default)]
//! # struct MemoryStore { ticks: u64 }
//! # impl BlockStore for MemoryStore {
//! #     fn batch_set_blocks(&mut self, _blocks: &[SetBlockRequest]) {}
//! #     fn tick(&mut self) { self.ticks += 1; }
//! #     fn load_chunk(&self, _x: i32, _z: i32) -> Option<Chunk> { Some(Chunk::empty()) }
//! #     fn clear_ticks(&mut self) {}
//! # }
//! let scheduler = TickScheduler::new(MemoryStore::default());
//! scheduler.with_manager(|manager, store| {
//!     manager
//!         .create_sphere(store, "orb", Vec3::new(0.0, 64.0, 0.0), 3, true, 1)
//!         .unwrap();
//! });
//! scheduler.tick();
//! assert_eq!(scheduler.tick_count(), 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `mctick-core` | `BlockStore`, geometry, `SetBlockRequest`, chunk/section wire types |
//! | [`shapes`] | `mctick-shapes` | Shape kinematics, random-placement MT19937, shape errors |
//! | [`anim`] | `mctick-anim` | `AnimationManager`, precompute/dynamic tick dispatch |
//! | [`engine`] | `mctick-engine` | `TickScheduler`, command queue, config, background ticker |
//! | [`judge`] | `mctick-judge` | Deterministic record/compare of sampled world state |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Block-store trait and geometry primitives (`mctick-core`).
pub use mctick_core as core;

/// Shape kinematics and the random-placement RNG (`mctick-shapes`).
pub use mctick_shapes as shapes;

/// The animation catalog (`mctick-anim`).
pub use mctick_anim as anim;

/// The tick scheduler (`mctick-engine`).
pub use mctick_engine as engine;

/// Deterministic record/compare (`mctick-judge`).
pub use mctick_judge as judge;

/// Common imports for typical `mctick` usage.
///
/// ```rust
/// use mctick::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use mctick_core::{
        BlockStore, Chunk, OrbitPlane, Section, SetBlockRequest, ShapeKind, Vec3,
        SECTIONS_PER_CHUNK,
    };

    // Shapes
    pub use mctick_shapes::{Movement, Mt19937, Orbit, RandomSpec, Shape, ShapeError, Spin};

    // Animation
    pub use mctick_anim::{AnimationManager, ManagerError, TickDiff};

    // Engine
    pub use mctick_engine::{CommandQueue, SchedulerError, TickScheduler, TpsSummary};
    pub use mctick_engine::config::SampleConfig;

    // Judge
    pub use mctick_judge::{
        compare_file, compare_stream, record_stream, record_to_file, CompareReport, JudgeError,
        MissingChunkWarning, RecordReport,
    };
}
