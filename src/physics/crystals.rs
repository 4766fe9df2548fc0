// src/physics/crystals.rs

use crate::model::elements;
use crate::model::structure::{CrystalStructure, Species};
use crate::physics::angles::{LatticeTables, Sublattice};
use crate::physics::bounds::Bound;
use crate::physics::growth::{grow, GrowArgs, GrowError};
use crate::utils::geometry;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// --- Crystal systems ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrystalKind {
    SimpleCubic,
    BodyCenteredCubic,
    FaceCenteredCubic,
    HexagonalClosePacked,
    DiamondCubic,
    ZincBlende,
    RockSalt,
    CesiumChloride,
}

impl CrystalKind {
    pub const ALL: [CrystalKind; 8] = [
        CrystalKind::SimpleCubic,
        CrystalKind::BodyCenteredCubic,
        CrystalKind::FaceCenteredCubic,
        CrystalKind::HexagonalClosePacked,
        CrystalKind::DiamondCubic,
        CrystalKind::ZincBlende,
        CrystalKind::RockSalt,
        CrystalKind::CesiumChloride,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CrystalKind::SimpleCubic => "simple-cubic",
            CrystalKind::BodyCenteredCubic => "body-centered-cubic",
            CrystalKind::FaceCenteredCubic => "face-centered-cubic",
            CrystalKind::HexagonalClosePacked => "hexagonal-close-packed",
            CrystalKind::DiamondCubic => "diamond-cubic",
            CrystalKind::ZincBlende => "zinc-blende",
            CrystalKind::RockSalt => "rock-salt",
            CrystalKind::CesiumChloride => "cesium-chloride",
        }
    }

    /// Prototype elements, one per sublattice; the first one is the seed
    pub fn default_elements(&self) -> &'static [&'static str] {
        match self {
            CrystalKind::SimpleCubic => &["Po"],
            CrystalKind::BodyCenteredCubic => &["Fe"],
            CrystalKind::FaceCenteredCubic => &["Cu"],
            CrystalKind::HexagonalClosePacked => &["Mg"],
            CrystalKind::DiamondCubic => &["C"],
            CrystalKind::ZincBlende => &["Zn", "S"],
            CrystalKind::RockSalt => &["Na", "Cl"],
            CrystalKind::CesiumChloride => &["Cs", "Cl"],
        }
    }

    pub fn species_count(&self) -> usize {
        self.default_elements().len()
    }

    fn tables(&self) -> LatticeTables {
        match self {
            CrystalKind::SimpleCubic => LatticeTables::simple_cubic(),
            CrystalKind::BodyCenteredCubic => LatticeTables::body_centered_cubic(),
            CrystalKind::FaceCenteredCubic => LatticeTables::face_centered_cubic(),
            CrystalKind::HexagonalClosePacked => LatticeTables::hexagonal_close_packed(),
            CrystalKind::DiamondCubic | CrystalKind::ZincBlende => LatticeTables::diamond_cubic(),
            CrystalKind::RockSalt => LatticeTables::rock_salt(),
            CrystalKind::CesiumChloride => LatticeTables::cesium_chloride(),
        }
    }

    /// Diamond seeds on the inverted tetrahedron: it is the only one with a
    /// bond pointing into the +x+y+z octant, so growth from a cube corner works.
    fn seed_sublattice(&self) -> Sublattice {
        match self {
            CrystalKind::DiamondCubic | CrystalKind::ZincBlende => Sublattice::B,
            _ => Sublattice::A,
        }
    }

    /// Edge of the conventional cell for nearest-neighbour distance `d`.
    /// For hexagonal close packing this is `a`; see `hexagonal_c`.
    pub fn lattice_constant(&self, d: f64) -> f64 {
        match self {
            CrystalKind::SimpleCubic => d,
            CrystalKind::RockSalt => 2.0 * d,
            CrystalKind::BodyCenteredCubic | CrystalKind::CesiumChloride => 2.0 * d / 3.0f64.sqrt(),
            CrystalKind::FaceCenteredCubic => d * 2.0f64.sqrt(),
            CrystalKind::DiamondCubic | CrystalKind::ZincBlende => 4.0 * d / 3.0f64.sqrt(),
            CrystalKind::HexagonalClosePacked => d,
        }
    }

    /// Ideal c = a·√(8/3)
    pub fn hexagonal_c(a: f64) -> f64 {
        a * (8.0f64 / 3.0).sqrt()
    }
}

impl FromStr for CrystalKind {
    type Err = GrowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let short = match wanted.as_str() {
            "sc" => Some(CrystalKind::SimpleCubic),
            "bcc" => Some(CrystalKind::BodyCenteredCubic),
            "fcc" => Some(CrystalKind::FaceCenteredCubic),
            "hcp" => Some(CrystalKind::HexagonalClosePacked),
            "diamond" => Some(CrystalKind::DiamondCubic),
            "nacl" => Some(CrystalKind::RockSalt),
            "zns" => Some(CrystalKind::ZincBlende),
            "cscl" => Some(CrystalKind::CesiumChloride),
            _ => None,
        };

        short
            .or_else(|| CrystalKind::ALL.into_iter().find(|k| k.name() == wanted))
            .ok_or_else(|| GrowError::UnknownCrystal(s.to_string()))
    }
}

// --- Size of the sample ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Extent {
    /// Fill `n` conventional cells along each axis (hexagonal prism for HCP)
    UnitCells(u32),
    /// Unbounded: `n` coordination shells around the seed
    Layers(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalRequest {
    pub kind: CrystalKind,
    pub extent: Extent,
    /// Prototype elements when `None`
    #[serde(default)]
    pub species: Option<Vec<Species>>,
}

// --- Assembly ---

/// Built-in species for `kind`
pub fn default_species(kind: CrystalKind) -> Result<Vec<Species>, GrowError> {
    kind.default_elements()
        .iter()
        .map(|el| elements::species(el).ok_or_else(|| GrowError::UnknownElement(el.to_string())))
        .collect()
}

/// Grows `kind` with its prototype elements
pub fn build(kind: CrystalKind, extent: Extent) -> Result<CrystalStructure, GrowError> {
    let species = default_species(kind)?;
    build_with(kind, &species, extent)
}

/// Grows `kind` with caller-chosen species, one per sublattice.
///
/// Homoatomic bonds are `2r`, heteroatomic bonds `r1 + r2`. Cube-bounded
/// output is centered; hexagonal and layer-capped output already is.
pub fn build_with(
    kind: CrystalKind,
    species: &[Species],
    extent: Extent,
) -> Result<CrystalStructure, GrowError> {
    let needed = kind.species_count();
    if species.len() < needed {
        return Err(GrowError::MissingSpecies {
            crystal: kind.name().to_string(),
            needed,
            given: species.len(),
        });
    }

    let first = &species[0];
    let second = (needed > 1).then(|| &species[1]);
    let distance = match second {
        Some(s) => first.radius + s.radius,
        None => 2.0 * first.radius,
    };

    let seed_on = kind.seed_sublattice();
    // Sublattice B takes `second_species`, so swap when seeding on B to keep
    // the first element on the seed
    let mut args = match (second, seed_on) {
        (Some(s), Sublattice::B) => {
            GrowArgs::new(s.clone(), distance, kind.tables()).with_second_species(first.clone())
        }
        (Some(s), Sublattice::A) => {
            GrowArgs::new(first.clone(), distance, kind.tables()).with_second_species(s.clone())
        }
        (None, _) => GrowArgs::new(first.clone(), distance, kind.tables()),
    }
    .starting_on(seed_on);

    let a = kind.lattice_constant(distance);
    let mut centered = false;
    match extent {
        Extent::UnitCells(n) if kind == CrystalKind::HexagonalClosePacked => {
            let n = n as f64;
            args = args.with_bound(Bound::Hexagonal {
                size_a: n * a,
                size_c: n * CrystalKind::hexagonal_c(a),
            });
        }
        Extent::UnitCells(n) => {
            args = args.with_bound(Bound::Cubic { size: n as f64 * a });
            centered = true;
        }
        Extent::Layers(n) => {
            args = args.with_max_layers(n);
        }
    }

    log::debug!(
        "{}: bond {:.1} pm, lattice constant {:.1} pm, {:?}",
        kind.name(),
        distance,
        a,
        extent
    );

    let mut structure = grow(&args)?;
    if centered {
        geometry::center(&mut structure);
    }
    Ok(structure)
}

/// Builds independent structures in parallel, results in request order
pub fn build_many(requests: &[CrystalRequest]) -> Vec<Result<CrystalStructure, GrowError>> {
    requests
        .par_iter()
        .map(|r| match &r.species {
            Some(species) => build_with(r.kind, species, r.extent),
            None => build(r.kind, r.extent),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::growth::{BondKey, SpatialKey};
    use crate::utils::geometry::{bounding_extent, distance};
    use std::collections::{HashMap, HashSet};

    fn bond_length(kind: CrystalKind) -> f64 {
        let s = default_species(kind).unwrap();
        if s.len() > 1 {
            s[0].radius + s[1].radius
        } else {
            2.0 * s[0].radius
        }
    }

    fn check_invariants(kind: CrystalKind, s: &CrystalStructure) {
        let atom_keys: HashSet<_> = s.atoms.iter().map(|a| SpatialKey::of(a.position)).collect();
        let bond_keys: HashSet<_> = s.bonds.iter().map(BondKey::of).collect();
        assert_eq!(atom_keys.len(), s.atoms.len(), "{}: duplicate atoms", kind.name());
        assert_eq!(bond_keys.len(), s.bonds.len(), "{}: duplicate bonds", kind.name());

        let d = bond_length(kind);
        for b in &s.bonds {
            let len = distance(b.start, b.end);
            assert!((len - d).abs() < 1e-6, "{}: bond {} != {}", kind.name(), len, d);
        }
    }

    #[test]
    fn test_every_kind_builds() {
        for kind in CrystalKind::ALL {
            for extent in [Extent::UnitCells(2), Extent::Layers(2)] {
                let s = build(kind, extent).unwrap();
                assert!(s.atoms.len() > 1, "{} {:?} did not grow", kind.name(), extent);
                assert!(!s.bonds.is_empty());
                check_invariants(kind, &s);
            }
        }
    }

    #[test]
    fn test_simple_cubic_cell_count() {
        let s = build(CrystalKind::SimpleCubic, Extent::UnitCells(2)).unwrap();
        assert_eq!(s.atoms.len(), 27);
        assert_eq!(s.bonds.len(), 54);
    }

    #[test]
    fn test_conventional_cells() {
        // Corners plus face centers; face centers bond to 4 corners and 4 faces
        let fcc = build(CrystalKind::FaceCenteredCubic, Extent::UnitCells(1)).unwrap();
        assert_eq!(fcc.atoms.len(), 14);
        assert_eq!(fcc.bonds.len(), 24 + 12);

        // Corners plus the body center
        let bcc = build(CrystalKind::BodyCenteredCubic, Extent::UnitCells(1)).unwrap();
        assert_eq!(bcc.atoms.len(), 9);
        assert_eq!(bcc.bonds.len(), 8);

        let cscl = build(CrystalKind::CesiumChloride, Extent::UnitCells(1)).unwrap();
        assert_eq!(cscl.formula(), "Cl1 Cs8");
    }

    #[test]
    fn test_rock_salt_alternates_species() {
        let s = build(CrystalKind::RockSalt, Extent::UnitCells(1)).unwrap();
        assert_eq!(s.atoms.len(), 27);
        assert_eq!(s.formula(), "Cl13 Na14");

        let at: HashMap<SpatialKey, (&str, f64)> = s
            .atoms
            .iter()
            .map(|a| (SpatialKey::of(a.position), (a.element.as_str(), a.radius)))
            .collect();
        for b in &s.bonds {
            let (e1, r1) = at[&SpatialKey::of(b.start)];
            let (e2, r2) = at[&SpatialKey::of(b.end)];
            assert_ne!(e1, e2);
            assert_ne!(r1, r2);
        }
    }

    #[test]
    fn test_zinc_blende_alternates_species() {
        let s = build(CrystalKind::ZincBlende, Extent::Layers(3)).unwrap();
        assert_eq!(s.atoms[0].element, "Zn");

        let at: HashMap<SpatialKey, &str> = s
            .atoms
            .iter()
            .map(|a| (SpatialKey::of(a.position), a.element.as_str()))
            .collect();
        for b in &s.bonds {
            assert_ne!(at[&SpatialKey::of(b.start)], at[&SpatialKey::of(b.end)]);
        }
    }

    #[test]
    fn test_diamond_two_sublattice_offsets() {
        let s = build(CrystalKind::DiamondCubic, Extent::Layers(2)).unwrap();
        let a = CrystalKind::DiamondCubic.lattice_constant(bond_length(CrystalKind::DiamondCubic));
        let half = a / 2.0;

        // Modulo a/2 every site is at (0,0,0) or (a/4,a/4,a/4)
        let mut seen = HashSet::new();
        for atom in &s.atoms {
            let quarters: Vec<f64> = atom
                .position
                .iter()
                .map(|c| c.rem_euclid(half) / (a / 4.0))
                .collect();
            let class: Vec<i64> = quarters.iter().map(|q| q.round() as i64 % 2).collect();

            for (q, c) in quarters.iter().zip(&class) {
                assert!((q - q.round()).abs() < 1e-6, "off-lattice coordinate {}", q);
                assert_eq!(*c, class[0], "mixed offset at {:?}", atom.position);
            }
            seen.insert(class[0]);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_hcp_stays_in_prism() {
        let s = build(CrystalKind::HexagonalClosePacked, Extent::UnitCells(2)).unwrap();
        let a = bond_length(CrystalKind::HexagonalClosePacked);
        let prism = Bound::Hexagonal {
            size_a: 2.0 * a,
            size_c: 2.0 * CrystalKind::hexagonal_c(a),
        };
        for atom in &s.atoms {
            assert!(prism.contains(atom.position));
        }
        // Seed layer is a full hexagon of radius 2a: 1 + 6 + 12 sites
        let seed_layer = s.atoms.iter().filter(|at| at.position[1].abs() < 1.0).count();
        assert_eq!(seed_layer, 19);
    }

    #[test]
    fn test_cubic_output_is_centered() {
        for kind in [CrystalKind::SimpleCubic, CrystalKind::FaceCenteredCubic, CrystalKind::RockSalt] {
            let s = build(kind, Extent::UnitCells(2)).unwrap();
            let (min, max) = bounding_extent(s.atoms.iter().map(|a| &a.position)).unwrap();
            for i in 0..3 {
                assert!((min[i] + max[i]).abs() < 1e-6, "{}: axis {} not centered", kind.name(), i);
            }
        }
    }

    #[test]
    fn test_missing_species() {
        let na = elements::species("Na").unwrap();
        let err = build_with(CrystalKind::RockSalt, &[na], Extent::Layers(1)).unwrap_err();
        assert_eq!(
            err,
            GrowError::MissingSpecies { crystal: "rock-salt".to_string(), needed: 2, given: 1 }
        );
    }

    #[test]
    fn test_custom_species_sets_spacing() {
        let k = elements::species("K").unwrap();
        let br = elements::species("Br").unwrap();
        let s = build_with(CrystalKind::RockSalt, &[k, br], Extent::Layers(1)).unwrap();
        assert_eq!(s.atoms.len(), 7);
        for b in &s.bonds {
            assert!((distance(b.start, b.end) - (138.0 + 196.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_parse_names() {
        for kind in CrystalKind::ALL {
            assert_eq!(kind.name().parse::<CrystalKind>().unwrap(), kind);
        }
        assert_eq!("FCC".parse::<CrystalKind>().unwrap(), CrystalKind::FaceCenteredCubic);
        assert_eq!("rock_salt".parse::<CrystalKind>().unwrap(), CrystalKind::RockSalt);
        assert!(matches!("wurtzite".parse::<CrystalKind>(), Err(GrowError::UnknownCrystal(_))));
    }

    #[test]
    fn test_build_many_matches_sequential() {
        let requests: Vec<CrystalRequest> = CrystalKind::ALL
            .iter()
            .map(|&kind| CrystalRequest { kind, extent: Extent::UnitCells(1), species: None })
            .collect();

        let parallel = build_many(&requests);
        assert_eq!(parallel.len(), requests.len());
        for (r, result) in requests.iter().zip(parallel) {
            assert_eq!(result.unwrap(), build(r.kind, r.extent).unwrap());
        }
    }

    #[test]
    fn test_build_many_uses_request_species() {
        let k = elements::species("K").unwrap();
        let br = elements::species("Br").unwrap();
        let requests = [CrystalRequest {
            kind: CrystalKind::RockSalt,
            extent: Extent::Layers(1),
            species: Some(vec![k, br]),
        }];

        let s = build_many(&requests).remove(0).unwrap();
        assert_eq!(s.formula(), "Br6 K1");
    }
}
