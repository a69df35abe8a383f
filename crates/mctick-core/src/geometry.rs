//! Geometric value types shared by shapes, the animation manager, and the
//! judge subsystem.

use std::fmt;

/// A position or displacement in 3D space, always finite.
///
/// Debug builds assert finiteness at construction sites that accept
/// externally supplied coordinates (shape origins, move/orbit deltas);
/// release builds trust the caller, matching the teacher workspace's
/// convention of reserving `assert!` for structural invariants rather
/// than user-input validation paths (those return a typed error instead).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Vec3 {
    /// Construct a new `Vec3`.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        debug_assert!(x.is_finite() && y.is_finite() && z.is_finite());
        Self { x, y, z }
    }

    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// An integer cell offset local to a shape's origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockOffset {
    /// X offset.
    pub x: i32,
    /// Y offset.
    pub y: i32,
    /// Z offset.
    pub z: i32,
}

impl BlockOffset {
    /// Construct a new offset.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// A single block write: set `(x, y, z)` to `state`. `state == 0` clears
/// the cell (air).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SetBlockRequest {
    /// World X coordinate.
    pub x: i32,
    /// World Y coordinate.
    pub y: i32,
    /// World Z coordinate.
    pub z: i32,
    /// Block state id; 0 means air.
    pub state: i32,
}

impl SetBlockRequest {
    /// Construct a new request.
    pub fn new(x: i32, y: i32, z: i32, state: i32) -> Self {
        Self { x, y, z, state }
    }

    /// The `(x, y, z)` key used by the manager's `active` map.
    pub fn key(&self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }

    /// True if this request clears the cell.
    pub fn is_clear(&self) -> bool {
        self.state == 0
    }
}

/// The closed set of geometric primitives a shape may be.
///
/// Kept as a tagged variant rather than a trait object: the set is small
/// and fixed by `spec.md`, and each variant's evaluation rule differs
/// enough (static cell list vs. pre-materialized placements) that dynamic
/// dispatch would buy nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Filled or hollow sphere.
    Sphere,
    /// Axis-aligned XZ rectangle.
    Rect,
    /// XZ annulus.
    Ring,
    /// Pre-materialized random placements within a bounding box.
    Random,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sphere => "sphere",
            Self::Rect => "rect",
            Self::Ring => "ring",
            Self::Random => "random",
        };
        write!(f, "{s}")
    }
}

/// The plane an [`Orbit`](crate) moves within.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrbitPlane {
    /// XY plane.
    Xy,
    /// XZ plane.
    Xz,
    /// YZ plane.
    Yz,
}

impl fmt::Display for OrbitPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Xy => "xy",
            Self::Xz => "xz",
            Self::Yz => "yz",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrbitPlane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" => Ok(Self::Xy),
            "xz" => Ok(Self::Xz),
            "yz" => Ok(Self::Yz),
            other => Err(format!("invalid plane: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setblock_key_and_clear() {
        let r = SetBlockRequest::new(1, 2, 3, 0);
        assert_eq!(r.key(), (1, 2, 3));
        assert!(r.is_clear());
        let r2 = SetBlockRequest::new(1, 2, 3, 5);
        assert!(!r2.is_clear());
    }

    #[test]
    fn orbit_plane_parses_case_insensitively() {
        assert_eq!("XY".parse::<OrbitPlane>().unwrap(), OrbitPlane::Xy);
        assert_eq!("xz".parse::<OrbitPlane>().unwrap(), OrbitPlane::Xz);
        assert!("xq".parse::<OrbitPlane>().is_err());
    }
}
