//! The [`Shape`] value type and its kinematics: `blocks_at_tick`,
//! `position_at_tick`, `rotation_at_tick`, `max_tick`.
//!
//! Grounded on the `Shape` struct and its methods in `shapes.go`.

use std::fmt;

use mctick_core::{BlockOffset, OrbitPlane, SetBlockRequest, ShapeKind, Vec3};

use crate::generators::{rect_offsets, ring_offsets, sphere_offsets};
use crate::random::Mt19937;

/// Errors raised validating shape-construction or motion-spec arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// A geometry parameter (radius, width, height, inner/outer radius)
    /// was out of range.
    InvalidGeometry {
        /// Description of which parameter and why.
        reason: String,
    },
    /// `end_tick < start_tick` (or, for Random, `end_tick <= start_tick`).
    InvalidTickRange {
        /// Description of the offending range.
        reason: String,
    },
    /// `block_num` exceeds the number of distinct positions in the
    /// bounding box.
    RandomCountExceedsBoundingBox {
        /// Requested count.
        requested: u64,
        /// Number of distinct positions available.
        available: u64,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { reason } => write!(f, "invalid geometry: {reason}"),
            Self::InvalidTickRange { reason } => write!(f, "invalid tick range: {reason}"),
            Self::RandomCountExceedsBoundingBox {
                requested,
                available,
            } => write!(
                f,
                "block_num {requested} exceeds available positions {available}"
            ),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Linear motion active between `start_tick` and `end_tick`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movement {
    /// Per-tick X displacement.
    pub dx: f64,
    /// Per-tick Y displacement.
    pub dy: f64,
    /// Per-tick Z displacement.
    pub dz: f64,
    /// First tick this movement applies.
    pub start_tick: u64,
    /// Tick at which displacement stops accumulating (clamped, inclusive
    /// of ticks up to and including this one).
    pub end_tick: u64,
}

impl Movement {
    /// Construct a movement, validating `end_tick >= start_tick`.
    pub fn new(
        dx: f64,
        dy: f64,
        dz: f64,
        start_tick: u64,
        end_tick: u64,
    ) -> Result<Self, ShapeError> {
        if end_tick < start_tick {
            return Err(ShapeError::InvalidTickRange {
                reason: format!("end_tick {end_tick} < start_tick {start_tick}"),
            });
        }
        Ok(Self {
            dx,
            dy,
            dz,
            start_tick,
            end_tick,
        })
    }
}

/// Angular velocity (radians per tick) active between `start_tick` and
/// `end_tick`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    /// Per-tick rotation about X, radians.
    pub rad_x: f64,
    /// Per-tick rotation about Y, radians.
    pub rad_y: f64,
    /// Per-tick rotation about Z, radians.
    pub rad_z: f64,
    /// First tick this spin applies.
    pub start_tick: u64,
    /// Last tick displacement accumulates.
    pub end_tick: u64,
}

impl Spin {
    /// Construct a spin, validating `end_tick >= start_tick`.
    pub fn new(
        rad_x: f64,
        rad_y: f64,
        rad_z: f64,
        start_tick: u64,
        end_tick: u64,
    ) -> Result<Self, ShapeError> {
        if end_tick < start_tick {
            return Err(ShapeError::InvalidTickRange {
                reason: format!("end_tick {end_tick} < start_tick {start_tick}"),
            });
        }
        Ok(Self {
            rad_x,
            rad_y,
            rad_z,
            start_tick,
            end_tick,
        })
    }
}

/// Circular motion within a plane, active between `start_tick` and
/// `end_tick`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    /// The plane of circular motion.
    pub plane: OrbitPlane,
    /// Orbit radius, must be `> 0`.
    pub radius: f64,
    /// Radians of angle gained per tick.
    pub angular_speed: f64,
    /// Phase offset in radians, added at `start_tick`.
    pub phase: f64,
    /// First tick this orbit applies.
    pub start_tick: u64,
    /// Last tick angle accumulates.
    pub end_tick: u64,
}

impl Orbit {
    /// Construct an orbit, validating `radius > 0` and
    /// `end_tick >= start_tick`.
    pub fn new(
        plane: OrbitPlane,
        radius: f64,
        angular_speed: f64,
        phase: f64,
        start_tick: u64,
        end_tick: u64,
    ) -> Result<Self, ShapeError> {
        if radius <= 0.0 {
            return Err(ShapeError::InvalidGeometry {
                reason: format!("orbit radius must be > 0, got {radius}"),
            });
        }
        if end_tick < start_tick {
            return Err(ShapeError::InvalidTickRange {
                reason: format!("end_tick {end_tick} < start_tick {start_tick}"),
            });
        }
        Ok(Self {
            plane,
            radius,
            angular_speed,
            phase,
            start_tick,
            end_tick,
        })
    }
}

/// Pre-materialized placements and active tick window for a Random shape.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomSpec {
    /// First tick at which placements are visible.
    pub start_tick: u64,
    /// Tick at which placements stop being visible (exclusive).
    pub end_tick: u64,
    /// Bounding box, inclusive on all bounds.
    pub min: (i32, i32, i32),
    /// Bounding box, inclusive on all bounds.
    pub max: (i32, i32, i32),
    /// The pre-drawn, deduplicated placements.
    pub placements: Vec<SetBlockRequest>,
}

impl RandomSpec {
    /// Materialize a `RandomSpec` by drawing `block_num` unique positions
    /// from `seed`'s MT19937 stream within `[min, max]` (inclusive on all
    /// axes), per `spec.md` §4.A.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_tick: u64,
        end_tick: u64,
        min: (i32, i32, i32),
        max: (i32, i32, i32),
        block_state: i32,
        block_num: u64,
        seed: u64,
    ) -> Result<Self, ShapeError> {
        if end_tick <= start_tick {
            return Err(ShapeError::InvalidTickRange {
                reason: format!("end_tick {end_tick} must be > start_tick {start_tick}"),
            });
        }
        if min.0 > max.0 || min.1 > max.1 || min.2 > max.2 {
            return Err(ShapeError::InvalidGeometry {
                reason: "min must be <= max on every axis".into(),
            });
        }
        if block_num == 0 {
            return Err(ShapeError::InvalidGeometry {
                reason: "block_num must be > 0".into(),
            });
        }
        let span_x = (max.0 - min.0 + 1) as u64;
        let span_y = (max.1 - min.1 + 1) as u64;
        let span_z = (max.2 - min.2 + 1) as u64;
        let total = span_x * span_y * span_z;
        if block_num > total {
            return Err(ShapeError::RandomCountExceedsBoundingBox {
                requested: block_num,
                available: total,
            });
        }

        let mut rng = Mt19937::new(seed);
        let mut placements = Vec::with_capacity(block_num as usize);
        let mut seen = std::collections::HashSet::with_capacity(block_num as usize);
        while (placements.len() as u64) < block_num {
            let x = min.0 + rng.next_bounded(span_x) as i32;
            let y = min.1 + rng.next_bounded(span_y) as i32;
            let z = min.2 + rng.next_bounded(span_z) as i32;
            if seen.insert((x, y, z)) {
                placements.push(SetBlockRequest::new(x, y, z, block_state));
            }
        }

        Ok(Self {
            start_tick,
            end_tick,
            min,
            max,
            placements,
        })
    }
}

/// A named geometric object together with its animation metadata.
///
/// Immutable once stored except for destroy scheduling and the
/// tick-local `last_blocks` cache (`spec.md` §3).
#[derive(Clone, Debug)]
pub struct Shape {
    /// Unique name within the owning manager.
    pub name: String,
    /// The geometric kind.
    pub kind: ShapeKind,
    /// Whether the shape is filled (meaningless for Random).
    pub filled: bool,
    /// Block state id assigned to non-air cells.
    pub block_state: i32,
    /// Position at tick 0.
    pub origin: Vec3,
    /// Shape-local offsets for static-geometry kinds; empty for Random.
    pub cells: Vec<BlockOffset>,
    /// Sphere/ring outer radius, rect width/height as applicable.
    pub radius: f64,
    /// Ring inner radius.
    pub inner_radius: f64,
    /// Rect width.
    pub width: i32,
    /// Rect height.
    pub height: i32,
    /// Random-only placement spec.
    pub random_spec: Option<RandomSpec>,
    /// Registered linear movements.
    pub moves: Vec<Movement>,
    /// Registered spins.
    pub spins: Vec<Spin>,
    /// Registered orbits.
    pub orbits: Vec<Orbit>,
    /// Tick at which this shape is removed, if scheduled.
    pub destroy_tick: u64,
    /// Whether `destroy_tick` has been armed.
    pub destroy_scheduled: bool,
    /// Placements produced at the most recently dispatched tick.
    pub last_blocks: Vec<SetBlockRequest>,
}

impl Shape {
    /// Build a new sphere shape and its tick-0 placements are left to the
    /// caller (the animation manager folds them into `active` and
    /// dispatches them as part of `create_sphere`).
    pub fn new_sphere(
        name: impl Into<String>,
        origin: Vec3,
        radius: i32,
        filled: bool,
        block_state: i32,
    ) -> Result<Self, ShapeError> {
        if radius <= 0 {
            return Err(ShapeError::InvalidGeometry {
                reason: format!("sphere radius must be > 0, got {radius}"),
            });
        }
        let cells = sphere_offsets(radius, filled);
        Ok(Self::new_static(
            name,
            ShapeKind::Sphere,
            filled,
            block_state,
            origin,
            cells,
            radius as f64,
            0.0,
            0,
            0,
        ))
    }

    /// Build a new rect shape.
    pub fn new_rect(
        name: impl Into<String>,
        origin: Vec3,
        width: i32,
        height: i32,
        filled: bool,
        block_state: i32,
    ) -> Result<Self, ShapeError> {
        if width <= 0 || height <= 0 {
            return Err(ShapeError::InvalidGeometry {
                reason: format!("rect width/height must be > 0, got {width}x{height}"),
            });
        }
        let cells = rect_offsets(width, height, filled);
        Ok(Self::new_static(
            name,
            ShapeKind::Rect,
            filled,
            block_state,
            origin,
            cells,
            0.0,
            0.0,
            width,
            height,
        ))
    }

    /// Build a new ring shape. `inner_radius >= outer_radius` is an
    /// Argument error (`spec.md` §6), matching `shapes.go`'s
    /// `"inner_radius must be < outer_radius"` check. The post-rounding
    /// clamp described in `spec.md` §4.A only fires in the original when
    /// two distinct float inputs round to equal integers; this crate's
    /// inputs are already integers, so that path can never be reached
    /// here and is not implemented.
    pub fn new_ring(
        name: impl Into<String>,
        origin: Vec3,
        inner_radius: i32,
        outer_radius: i32,
        block_state: i32,
    ) -> Result<Self, ShapeError> {
        if outer_radius <= 0 {
            return Err(ShapeError::InvalidGeometry {
                reason: format!("ring outer_radius must be > 0, got {outer_radius}"),
            });
        }
        if inner_radius < 0 {
            return Err(ShapeError::InvalidGeometry {
                reason: format!("ring inner_radius must be >= 0, got {inner_radius}"),
            });
        }
        if inner_radius >= outer_radius {
            return Err(ShapeError::InvalidGeometry {
                reason: format!(
                    "ring inner_radius must be < outer_radius, got {inner_radius} >= {outer_radius}"
                ),
            });
        }
        let cells = ring_offsets(inner_radius, outer_radius);
        Ok(Self::new_static(
            name,
            ShapeKind::Ring,
            true,
            block_state,
            origin,
            cells,
            outer_radius as f64,
            inner_radius as f64,
            0,
            0,
        ))
    }

    /// Build a new random shape from a pre-materialized [`RandomSpec`].
    pub fn new_random(name: impl Into<String>, block_state: i32, random: RandomSpec) -> Self {
        Self {
            name: name.into(),
            kind: ShapeKind::Random,
            filled: false,
            block_state,
            origin: Vec3::ZERO,
            cells: Vec::new(),
            radius: 0.0,
            inner_radius: 0.0,
            width: 0,
            height: 0,
            random_spec: Some(random),
            moves: Vec::new(),
            spins: Vec::new(),
            orbits: Vec::new(),
            destroy_tick: 0,
            destroy_scheduled: false,
            last_blocks: Vec::new(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn new_static(
        name: impl Into<String>,
        kind: ShapeKind,
        filled: bool,
        block_state: i32,
        origin: Vec3,
        cells: Vec<BlockOffset>,
        radius: f64,
        inner_radius: f64,
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            filled,
            block_state,
            origin,
            cells,
            radius,
            inner_radius,
            width,
            height,
            random_spec: None,
            moves: Vec::new(),
            spins: Vec::new(),
            orbits: Vec::new(),
            destroy_tick: 0,
            destroy_scheduled: false,
            last_blocks: Vec::new(),
        }
    }

    /// Schedule destruction at `tick`. Idempotent: calling again simply
    /// reschedules.
    pub fn schedule_destroy(&mut self, tick: u64) {
        self.destroy_tick = tick;
        self.destroy_scheduled = true;
    }

    /// The largest tick at which this shape's output may still change:
    /// the max over every Movement/Spin/Orbit end tick, the Random end
    /// tick (if any), and the destroy tick (if scheduled).
    pub fn max_tick(&self) -> u64 {
        let mut max = 0u64;
        for m in &self.moves {
            max = max.max(m.end_tick);
        }
        for s in &self.spins {
            max = max.max(s.end_tick);
        }
        for o in &self.orbits {
            max = max.max(o.end_tick);
        }
        if let Some(r) = &self.random_spec {
            max = max.max(r.end_tick);
        }
        if self.destroy_scheduled {
            max = max.max(self.destroy_tick);
        }
        max
    }

    /// Position at tick `t`: origin plus the sum of every Movement's and
    /// Orbit's contribution, each clamped at its own `end_tick`.
    pub fn position_at_tick(&self, t: u64) -> Vec3 {
        let mut pos = self.origin;
        for m in &self.moves {
            if t < m.start_tick {
                continue;
            }
            let eff_end = m.end_tick.min(t);
            let steps = eff_end.saturating_sub(m.start_tick) as f64;
            pos.x += steps * m.dx;
            pos.y += steps * m.dy;
            pos.z += steps * m.dz;
        }
        let mut offset = Vec3::ZERO;
        for o in &self.orbits {
            if t < o.start_tick {
                continue;
            }
            let eff_end = o.end_tick.min(t);
            let steps = eff_end.saturating_sub(o.start_tick) as f64;
            let angle = o.phase + steps * o.angular_speed;
            let (s, c) = angle.sin_cos();
            match o.plane {
                OrbitPlane::Xy => {
                    offset.x += o.radius * c;
                    offset.y += o.radius * s;
                }
                OrbitPlane::Xz => {
                    offset.x += o.radius * c;
                    offset.z += o.radius * s;
                }
                OrbitPlane::Yz => {
                    offset.y += o.radius * c;
                    offset.z += o.radius * s;
                }
            }
        }
        pos.x += offset.x;
        pos.y += offset.y;
        pos.z += offset.z;
        pos
    }

    /// Rotation at tick `t`: the per-axis sum across every Spin entry,
    /// each clamped at its own `end_tick`. No modular reduction.
    pub fn rotation_at_tick(&self, t: u64) -> (f64, f64, f64) {
        let (mut rx, mut ry, mut rz) = (0.0, 0.0, 0.0);
        for s in &self.spins {
            if t < s.start_tick {
                continue;
            }
            let eff_end = s.end_tick.min(t);
            let steps = eff_end.saturating_sub(s.start_tick) as f64;
            if steps <= 0.0 {
                continue;
            }
            rx += steps * s.rad_x;
            ry += steps * s.rad_y;
            rz += steps * s.rad_z;
        }
        (rx, ry, rz)
    }

    /// Compute the set of block placements this shape produces at tick
    /// `t`. See `spec.md` §4.A for the full contract.
    pub fn blocks_at_tick(&self, t: u64) -> Vec<SetBlockRequest> {
        if self.destroy_scheduled && t >= self.destroy_tick {
            return Vec::new();
        }
        if let Some(r) = &self.random_spec {
            if t < r.start_tick || t >= r.end_tick {
                return Vec::new();
            }
            return r.placements.clone();
        }
        if self.cells.is_empty() {
            return Vec::new();
        }

        let pos = self.position_at_tick(t);
        let (rx, ry, rz) = self.rotation_at_tick(t);

        // Apply rotations in fixed order X then Y then Z, skipping any
        // axis whose accumulated angle is zero — skipping avoids
        // round-trip error and is an observable part of the contract.
        let (sin_x, cos_x) = if rx != 0.0 { rx.sin_cos() } else { (0.0, 1.0) };
        let (sin_y, cos_y) = if ry != 0.0 { ry.sin_cos() } else { (0.0, 1.0) };
        let (sin_z, cos_z) = if rz != 0.0 { rz.sin_cos() } else { (0.0, 1.0) };

        let mut out = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            let (mut fx, mut fy, mut fz) = (cell.x as f64, cell.y as f64, cell.z as f64);
            if rx != 0.0 {
                let ny = fy * cos_x - fz * sin_x;
                let nz = fy * sin_x + fz * cos_x;
                fy = ny;
                fz = nz;
            }
            if ry != 0.0 {
                let nx = fx * cos_y + fz * sin_y;
                let nz = -fx * sin_y + fz * cos_y;
                fx = nx;
                fz = nz;
            }
            if rz != 0.0 {
                let nx = fx * cos_z - fy * sin_z;
                let ny = fx * sin_z + fy * cos_z;
                fx = nx;
                fy = ny;
            }
            let px = pos.x + fx;
            let py = pos.y + fy;
            let pz = pos.z + fz;
            out.push(SetBlockRequest::new(
                round_away_from_zero(px),
                round_away_from_zero(py),
                round_away_from_zero(pz),
                self.block_state,
            ));
        }
        out
    }
}

/// Away-from-zero rounding to the nearest integer, matching Go's
/// `math.Round` (and thus the reference implementation's placement
/// coordinates) rather than Rust's default round-half-to-even anywhere
/// it would differ — `f64::round` is already away-from-zero, so this is
/// a thin, explicit wrapper documenting that choice.
fn round_away_from_zero(v: f64) -> i32 {
    v.round() as i32
}
