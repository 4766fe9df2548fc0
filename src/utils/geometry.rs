// src/utils/geometry.rs

use crate::model::structure::CrystalStructure;
use nalgebra::Vector3;

pub type Point3 = [f64; 3];

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Places a point on the sphere of `radius` around `center`.
///
/// The polar angle (0°..180°) is measured from the -Y axis, the azimuth
/// (0°..360°) sweeps around Y starting at +X towards +Z:
///
/// ```text
/// dx =  r · sin(polar) · cos(azimuth)
/// dy = -r · cos(polar)
/// dz =  r · sin(polar) · sin(azimuth)
/// ```
///
/// Every connection table in `physics::angles` is written against this convention.
pub fn point_on_sphere(center: Point3, radius: f64, polar_deg: f64, azimuth_deg: f64) -> Point3 {
    let polar = to_radians(polar_deg);
    let azimuth = to_radians(azimuth_deg);

    let offset = Vector3::new(
        radius * polar.sin() * azimuth.cos(),
        -radius * polar.cos(),
        radius * polar.sin() * azimuth.sin(),
    );
    let p = Vector3::from(center) + offset;

    [p.x, p.y, p.z]
}

/// Euclidean distance between two points
pub fn distance(p1: Point3, p2: Point3) -> f64 {
    (Vector3::from(p1) - Vector3::from(p2)).norm()
}

/// Componentwise (min, max) of a point set, `None` when empty
pub fn bounding_extent<'a, I>(points: I) -> Option<(Point3, Point3)>
where
    I: IntoIterator<Item = &'a Point3>,
{
    let mut iter = points.into_iter();
    let first = Vector3::from(*iter.next()?);

    let (min, max) = iter.fold((first, first), |(min, max), p| {
        let v = Vector3::from(*p);
        (min.inf(&v), max.sup(&v))
    });

    Some(([min.x, min.y, min.z], [max.x, max.y, max.z]))
}

/// Shifts atoms and bond endpoints by `-max / 2` of the atom bounding box.
///
/// This is the bounding-box max convention, not the centroid: it centers
/// origin-anchored growth (min = 0) and nothing else.
pub fn center(structure: &mut CrystalStructure) {
    let Some((_, max)) = bounding_extent(structure.atoms.iter().map(|a| &a.position)) else {
        return;
    };
    let shift = Vector3::from(max) * -0.5;

    let apply = |p: &mut Point3| {
        let moved = Vector3::from(*p) + shift;
        *p = [moved.x, moved.y, moved.z];
    };

    for atom in &mut structure.atoms {
        apply(&mut atom.position);
    }
    for bond in &mut structure.bonds {
        apply(&mut bond.start);
        apply(&mut bond.end);
    }
}
