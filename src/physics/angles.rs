// src/physics/angles.rs

//! Nearest-neighbour bond directions per crystal system.
//!
//! Every direction is a (polar, azimuth) pair in degrees for
//! `utils::geometry::point_on_sphere`: polar from -Y, azimuth from +X towards +Z.
//! The closed forms:
//!
//! ```text
//! body diagonal   acos(1/√3)     = 54.7356°   (BCC, diamond: acos(-1/3)/2 is the same angle)
//! hcp interlayer  acos(√(2/3))   = 35.2644°   (in-plane offset a/√3, rise a·√(2/3))
//! ```

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BondAngle {
    pub polar: f64,
    pub azimuth: f64,
}

impl BondAngle {
    pub const fn new(polar: f64, azimuth: f64) -> Self {
        Self { polar, azimuth }
    }

    pub fn is_equatorial(&self) -> bool {
        (self.polar - 90.0).abs() < 1e-9
    }
}

/// Which of two interpenetrating sublattices (or stacking positions) a site is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sublattice {
    A,
    B,
}

impl Sublattice {
    pub fn flipped(self) -> Self {
        match self {
            Sublattice::A => Sublattice::B,
            Sublattice::B => Sublattice::A,
        }
    }
}

/// Sublattice of a neighbour given the parent's sublattice and the bond's polar angle
pub type Transition = fn(Sublattice, f64) -> Sublattice;

/// Single lattice: every site looks the same
pub fn keep(parent: Sublattice, _polar: f64) -> Sublattice {
    parent
}

/// Bipartite lattice: every bond crosses to the other sublattice
pub fn alternate(parent: Sublattice, _polar: f64) -> Sublattice {
    parent.flipped()
}

/// ABAB stacking: in-plane bonds stay in the layer, out-of-plane bonds change it
pub fn hcp_stacking(parent: Sublattice, polar: f64) -> Sublattice {
    if (polar - 90.0).abs() < 1e-9 {
        parent
    } else {
        parent.flipped()
    }
}

/// Everything the growth engine needs to know about a lattice's connectivity.
#[derive(Clone, Debug)]
pub struct LatticeTables {
    pub default: Vec<BondAngle>,
    /// Used for sublattice B when present; B falls back to `default` otherwise
    pub reverse: Option<Vec<BondAngle>>,
    pub transition: Transition,
}

impl LatticeTables {
    pub fn for_sublattice(&self, sub: Sublattice) -> &[BondAngle] {
        match (sub, &self.reverse) {
            (Sublattice::B, Some(rev)) => rev,
            _ => &self.default,
        }
    }

    pub fn simple_cubic() -> Self {
        Self { default: simple_cubic(), reverse: None, transition: keep }
    }

    pub fn body_centered_cubic() -> Self {
        Self { default: body_centered_cubic(), reverse: None, transition: keep }
    }

    pub fn face_centered_cubic() -> Self {
        Self { default: face_centered_cubic(), reverse: None, transition: keep }
    }

    pub fn hexagonal_close_packed() -> Self {
        Self {
            default: hexagonal_close_packed(false),
            reverse: Some(hexagonal_close_packed(true)),
            transition: hcp_stacking,
        }
    }

    pub fn diamond_cubic() -> Self {
        Self {
            default: diamond_cubic(false),
            reverse: Some(diamond_cubic(true)),
            transition: alternate,
        }
    }

    /// Simple cubic geometry, species swapped on every hop
    pub fn rock_salt() -> Self {
        Self { default: simple_cubic(), reverse: None, transition: alternate }
    }

    /// BCC geometry, body center and corners are different species
    pub fn cesium_chloride() -> Self {
        Self { default: body_centered_cubic(), reverse: None, transition: alternate }
    }
}

fn body_diagonal() -> f64 {
    (1.0 / 3.0f64.sqrt()).acos().to_degrees()
}

pub fn simple_cubic() -> Vec<BondAngle> {
    vec![
        BondAngle::new(0.0, 0.0),
        BondAngle::new(180.0, 0.0),
        BondAngle::new(90.0, 0.0),
        BondAngle::new(90.0, 90.0),
        BondAngle::new(90.0, 180.0),
        BondAngle::new(90.0, 270.0),
    ]
}

pub fn body_centered_cubic() -> Vec<BondAngle> {
    let down = body_diagonal();
    let up = 180.0 - down;

    [down, up]
        .iter()
        .flat_map(|&polar| {
            [45.0, 135.0, 225.0, 315.0]
                .into_iter()
                .map(move |azimuth| BondAngle::new(polar, azimuth))
        })
        .collect()
}

pub fn face_centered_cubic() -> Vec<BondAngle> {
    let mut angles: Vec<BondAngle> = [45.0, 135.0, 225.0, 315.0]
        .into_iter()
        .map(|azimuth| BondAngle::new(90.0, azimuth))
        .collect();

    for polar in [45.0, 135.0] {
        for azimuth in [0.0, 90.0, 180.0, 270.0] {
            angles.push(BondAngle::new(polar, azimuth));
        }
    }
    angles
}

/// Six in-plane neighbours plus three above and three below.
///
/// The out-of-plane triangles sit at +30° on one stacking position and
/// -30° on the other, so A-to-B and B-to-A hops land on each other's sites.
pub fn hexagonal_close_packed(reverse: bool) -> Vec<BondAngle> {
    let mut angles: Vec<BondAngle> = (0..6)
        .map(|i| BondAngle::new(90.0, 60.0 * i as f64))
        .collect();

    let down = (2.0f64 / 3.0).sqrt().acos().to_degrees();
    let up = 180.0 - down;
    let offset = if reverse { -30.0 } else { 30.0 };

    for polar in [down, up] {
        for base in [0.0, 120.0, 240.0] {
            let azimuth = (base + offset + 360.0) % 360.0;
            angles.push(BondAngle::new(polar, azimuth));
        }
    }
    angles
}

/// Tetrahedral bonds. The reverse table is the point inversion of the default
/// one, which is what the second FCC sublattice sees.
pub fn diamond_cubic(reverse: bool) -> Vec<BondAngle> {
    let down = (-1.0f64 / 3.0).acos().to_degrees() / 2.0;
    let up = 180.0 - down;

    let (first, second) = if reverse {
        ([135.0, 315.0], [45.0, 225.0])
    } else {
        ([45.0, 225.0], [135.0, 315.0])
    };

    first
        .into_iter()
        .map(|azimuth| BondAngle::new(down, azimuth))
        .chain(second.into_iter().map(|azimuth| BondAngle::new(up, azimuth)))
        .collect()
}
