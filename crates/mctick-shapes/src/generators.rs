//! Static-geometry cell generators for Sphere, Rect, and Ring shapes.
//!
//! Each generator produces a deduplicated set of shape-local
//! [`BlockOffset`]s, grounded on `generateSphereOffsets` /
//! `generateRectOffsets` / `generateRingOffsets` in the original source.

use std::collections::HashSet;

use mctick_core::BlockOffset;

fn dedup(cells: Vec<BlockOffset>) -> Vec<BlockOffset> {
    let mut seen = HashSet::with_capacity(cells.len());
    let mut out = Vec::with_capacity(cells.len());
    for c in cells {
        if seen.insert(c) {
            out.push(c);
        }
    }
    out
}

/// Generate offsets for a sphere of integer `radius`, filled or hollow.
///
/// A cell at integer offset `(x, y, z)` is kept when
/// `|(x,y,z)| <= radius + 0.5`; if not filled, it is additionally
/// required that `|(x,y,z)| >= radius - 0.5` (hollow shell).
pub fn sphere_offsets(radius: i32, filled: bool) -> Vec<BlockOffset> {
    let r = radius as f64;
    let mut cells = Vec::new();
    for x in -radius..=radius {
        for y in -radius..=radius {
            for z in -radius..=radius {
                let d = ((x * x + y * y + z * z) as f64).sqrt();
                if d > r + 0.5 {
                    continue;
                }
                if !filled && d < r - 0.5 {
                    continue;
                }
                cells.push(BlockOffset::new(x, y, z));
            }
        }
    }
    dedup(cells)
}

/// The 1-D span of offsets for a given side length, used by [`rect_offsets`].
///
/// Odd `size` spans `[-size/2, size/2]`; even `size` spans
/// `[-size/2, size/2 - 1]`.
fn width_offsets(size: i32) -> Vec<i32> {
    let half = size / 2;
    let (start, end) = if size % 2 == 0 {
        (-half, half - 1)
    } else {
        (-half, half)
    };
    (start..=end).collect()
}

/// Generate offsets for an axis-aligned XZ rectangle (Y = 0), filled or
/// border-only.
pub fn rect_offsets(width: i32, height: i32, filled: bool) -> Vec<BlockOffset> {
    let xs = width_offsets(width);
    let zs = width_offsets(height);
    let (x_first, x_last) = (xs[0], xs[xs.len() - 1]);
    let (z_first, z_last) = (zs[0], zs[zs.len() - 1]);
    let mut cells = Vec::new();
    for &x in &xs {
        for &z in &zs {
            if !filled && x != x_first && x != x_last && z != z_first && z != z_last {
                continue;
            }
            cells.push(BlockOffset::new(x, 0, z));
        }
    }
    dedup(cells)
}

/// Generate offsets for an XZ ring (Y = 0) between `inner` and `outer`
/// radii. Callers are responsible for applying the
/// "inner >= outer → inner = outer - 1 (floor 0)" correction before
/// calling this function (`Shape::new_ring` does so).
pub fn ring_offsets(inner: i32, outer: i32) -> Vec<BlockOffset> {
    if outer <= 0 {
        return Vec::new();
    }
    let inner = inner.max(0);
    let (inner_f, outer_f) = (inner as f64, outer as f64);
    let mut cells = Vec::new();
    for x in -outer..=outer {
        for z in -outer..=outer {
            let d = ((x * x + z * z) as f64).sqrt();
            if d > outer_f + 0.5 {
                continue;
            }
            if d < inner_f - 0.5 {
                continue;
            }
            cells.push(BlockOffset::new(x, 0, z));
        }
    }
    dedup(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_radius_one_filled_has_center_and_face_neighbors() {
        let cells = sphere_offsets(1, true);
        // center (d=0) + 6 face neighbors (d=1) + 12 edge neighbors
        // (d=sqrt(2)~1.414 <= 1.5); the 8 corners (d=sqrt(3)~1.732 > 1.5)
        // are excluded, giving 1+6+12 = 19.
        assert_eq!(cells.len(), 19);
        assert!(cells.contains(&BlockOffset::new(0, 0, 0)));
        assert!(cells.contains(&BlockOffset::new(1, 0, 0)));
        assert!(cells.contains(&BlockOffset::new(-1, 0, 0)));
        assert!(!cells.contains(&BlockOffset::new(1, 1, 1)));
    }

    #[test]
    fn filled_sphere_has_at_least_as_many_cells_as_hollow() {
        for r in 0..6 {
            let filled = sphere_offsets(r, true).len();
            let hollow = sphere_offsets(r, false).len();
            assert!(filled >= hollow, "r={r} filled={filled} hollow={hollow}");
            if r == 0 {
                assert_eq!(filled, hollow);
            }
        }
    }

    #[test]
    fn rect_even_and_odd_spans() {
        assert_eq!(width_offsets(3), vec![-1, 0, 1]);
        assert_eq!(width_offsets(4), vec![-2, -1, 0, 1]);
    }

    #[test]
    fn rect_hollow_keeps_only_border() {
        let cells = rect_offsets(3, 3, false);
        assert_eq!(cells.len(), 8);
        assert!(!cells.contains(&BlockOffset::new(0, 0, 0)));
    }

    #[test]
    fn ring_cells_satisfy_radius_bounds() {
        let cells = ring_offsets(2, 5);
        for c in &cells {
            let d = ((c.x * c.x + c.z * c.z) as f64).sqrt();
            assert!(d >= 2.0 - 0.5 - 1e-9 && d <= 5.0 + 0.5 + 1e-9);
        }
    }

    #[test]
    fn no_duplicate_cells_in_any_generator() {
        let mut seen = HashSet::new();
        for c in sphere_offsets(4, true) {
            assert!(seen.insert(c));
        }
        seen.clear();
        for c in rect_offsets(5, 4, true) {
            assert!(seen.insert(c));
        }
        seen.clear();
        for c in ring_offsets(1, 4) {
            assert!(seen.insert(c));
        }
    }
}
