// src/physics/bounds.rs

use crate::utils::geometry::{to_degrees, to_radians, Point3};
use serde::{Deserialize, Serialize};

/// Slack for float drift on the hexagonal prism walls (pm)
const HEX_TOLERANCE: f64 = 1e-6;

/// Region growth is allowed to fill.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// Axis-aligned cube `[0, ceil(size)]^3` anchored at the origin
    Cubic { size: f64 },
    /// Hexagonal prism around the Y axis, centered on the origin.
    /// `size_a` is the corner radius of the hexagon, `size_c` the full height.
    Hexagonal { size_a: f64, size_c: f64 },
}

impl Bound {
    pub fn contains(&self, p: Point3) -> bool {
        match *self {
            Bound::Cubic { size } => in_cube(p, size),
            Bound::Hexagonal { size_a, size_c } => in_hexagonal_prism(p, size_a, size_c),
        }
    }
}

/// Rounds to whole units first: growth lands "integer" sites at 99.9999999.
pub fn in_cube(p: Point3, size: f64) -> bool {
    let limit = size.ceil();
    p.iter().all(|c| {
        let r = c.round();
        (0.0..=limit).contains(&r)
    })
}

pub fn in_hexagonal_prism(p: Point3, size_a: f64, size_c: f64) -> bool {
    if p[1].abs() > size_c / 2.0 + HEX_TOLERANCE {
        return false;
    }

    let dxz = (p[0] * p[0] + p[2] * p[2]).sqrt();

    // Fold into one 60° sector; 30° is the normal of the hexagon edge
    let angle = to_degrees(p[2].atan2(p[0])).rem_euclid(60.0);
    let correction = (angle - 30.0).abs();

    let max_radius = size_a * to_radians(30.0).cos() / to_radians(correction).cos();

    dxz <= max_radius + HEX_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_is_inclusive_and_anchored() {
        let b = Bound::Cubic { size: 200.0 };
        assert!(b.contains([0.0, 0.0, 0.0]));
        assert!(b.contains([200.0, 200.0, 200.0]));
        assert!(b.contains([100.0, 0.0, 200.0]));
        assert!(!b.contains([-100.0, 0.0, 0.0]));
        assert!(!b.contains([0.0, 201.0, 0.0]));
    }

    #[test]
    fn test_cube_absorbs_float_drift() {
        let b = Bound::Cubic { size: 200.0 };
        assert!(b.contains([199.99999999, -1e-12, 200.0000001]));
        assert!(b.contains([-0.4, 0.0, 0.0]));
        assert!(!b.contains([-0.6, 0.0, 0.0]));
    }

    #[test]
    fn test_cube_ceils_fractional_size() {
        assert!(in_cube([361.0, 0.0, 0.0], 360.2));
        assert!(!in_cube([362.0, 0.0, 0.0], 360.2));
    }

    #[test]
    fn test_hexagon_corner_and_edge() {
        let a = 300.0;
        let apothem = a * (3.0f64).sqrt() / 2.0;

        // Corners sit on the X axis and every 60° from it
        assert!(in_hexagonal_prism([a, 0.0, 0.0], a, 100.0));
        assert!(in_hexagonal_prism([-a, 0.0, 0.0], a, 100.0));
        assert!(!in_hexagonal_prism([a + 1.0, 0.0, 0.0], a, 100.0));

        // Edge midpoints lie at the apothem along 30°, 90°, ...
        let along = |deg: f64, r: f64| [r * to_radians(deg).cos(), 0.0, r * to_radians(deg).sin()];
        assert!(in_hexagonal_prism(along(30.0, apothem), a, 100.0));
        assert!(in_hexagonal_prism(along(90.0, apothem), a, 100.0));
        assert!(!in_hexagonal_prism(along(90.0, apothem + 1.0), a, 100.0));
        assert!(!in_hexagonal_prism(along(270.0, apothem + 1.0), a, 100.0));
    }

    #[test]
    fn test_hexagon_height() {
        let b = Bound::Hexagonal { size_a: 300.0, size_c: 400.0 };
        assert!(b.contains([0.0, 200.0, 0.0]));
        assert!(b.contains([0.0, -200.0, 0.0]));
        assert!(!b.contains([0.0, 201.0, 0.0]));
        assert!(!b.contains([0.0, -201.0, 0.0]));
    }
}
