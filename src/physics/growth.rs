// src/physics/growth.rs

use crate::model::structure::{Ball, CrystalStructure, Species, Stick};
use crate::physics::angles::{BondAngle, LatticeTables, Sublattice};
use crate::physics::bounds::Bound;
use crate::utils::geometry::{point_on_sphere, Point3};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::fmt;

// --- 1. SPATIAL KEYS ---

/// Grid unit (pm) positions are snapped to when testing for "same site"
pub const KEY_RESOLUTION: f64 = 10.0;

/// Position snapped to the `KEY_RESOLUTION` grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpatialKey([i64; 3]);

impl SpatialKey {
    pub fn of(p: Point3) -> Self {
        Self(p.map(|c| (c / KEY_RESOLUTION).round() as i64))
    }
}

/// Order-independent key of a bond
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BondKey(SpatialKey, SpatialKey);

impl BondKey {
    pub fn new(a: SpatialKey, b: SpatialKey) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn of(stick: &Stick) -> Self {
        Self::new(SpatialKey::of(stick.start), SpatialKey::of(stick.end))
    }
}

// --- 2. ERROR HANDLING ---

#[derive(Debug, Clone, PartialEq)]
pub enum GrowError {
    InvalidDistance(f64),
    InvalidRadius(f64),
    /// Neither a bound nor a layer cap: growth would never stop
    Unbounded,
    SeedOutOfBounds(Point3),
    MissingSpecies { crystal: String, needed: usize, given: usize },
    UnknownElement(String),
    UnknownCrystal(String),
}

impl fmt::Display for GrowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrowError::InvalidDistance(d) => write!(f, "Bond distance must be positive, got {}", d),
            GrowError::InvalidRadius(r) => write!(f, "Atom radius must be positive, got {}", r),
            GrowError::Unbounded => {
                write!(f, "Growth needs a bound or a layer limit to terminate")
            }
            GrowError::SeedOutOfBounds(p) => write!(
                f,
                "Seed atom at ({:.2}, {:.2}, {:.2}) lies outside the bound",
                p[0], p[1], p[2]
            ),
            GrowError::MissingSpecies { crystal, needed, given } => write!(
                f,
                "{} needs {} species, {} given",
                crystal, needed, given
            ),
            GrowError::UnknownElement(el) => write!(f, "No radius data for element '{}'", el),
            GrowError::UnknownCrystal(name) => write!(f, "Unknown crystal system '{}'", name),
        }
    }
}

impl std::error::Error for GrowError {}

// --- 3. CONFIGURATION ---

/// Everything one growth run needs.
#[derive(Clone, Debug)]
pub struct GrowArgs {
    pub species: Species,
    /// Stamped on sublattice B sites when set (rock salt, zinc blende, ...)
    pub second_species: Option<Species>,
    pub seed_position: Point3,
    /// Bond length (pm)
    pub distance: f64,
    pub bound: Option<Bound>,
    pub tables: LatticeTables,
    /// Sublattice of the seed
    pub initial: Sublattice,
    pub max_layers: Option<u32>,
}

impl GrowArgs {
    pub fn new(species: Species, distance: f64, tables: LatticeTables) -> Self {
        Self {
            species,
            second_species: None,
            seed_position: [0.0, 0.0, 0.0],
            distance,
            bound: None,
            tables,
            initial: Sublattice::A,
            max_layers: None,
        }
    }

    pub fn with_bound(mut self, bound: Bound) -> Self {
        self.bound = Some(bound);
        self
    }

    pub fn with_max_layers(mut self, layers: u32) -> Self {
        self.max_layers = Some(layers);
        self
    }

    pub fn with_second_species(mut self, species: Species) -> Self {
        self.second_species = Some(species);
        self
    }

    pub fn starting_on(mut self, sublattice: Sublattice) -> Self {
        self.initial = sublattice;
        self
    }

    pub fn seed_at(mut self, position: Point3) -> Self {
        self.seed_position = position;
        self
    }

    fn species_for(&self, sub: Sublattice) -> &Species {
        match (sub, &self.second_species) {
            (Sublattice::B, Some(second)) => second,
            _ => &self.species,
        }
    }

    fn validate(&self) -> Result<(), GrowError> {
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(GrowError::InvalidDistance(self.distance));
        }
        for s in std::iter::once(&self.species).chain(&self.second_species) {
            if !s.radius.is_finite() || s.radius <= 0.0 {
                return Err(GrowError::InvalidRadius(s.radius));
            }
        }
        match &self.bound {
            None if self.max_layers.is_none() => return Err(GrowError::Unbounded),
            Some(b) if !b.contains(self.seed_position) => {
                return Err(GrowError::SeedOutOfBounds(self.seed_position))
            }
            _ => {}
        }
        if self.distance < KEY_RESOLUTION {
            warn!(
                "Bond distance {} pm is below the {} pm dedup grid; neighbours may merge",
                self.distance, KEY_RESOLUTION
            );
        }
        Ok(())
    }
}

// --- 4. GROWTH ---

/// Result of following one bond direction from one atom; folded into the
/// working sets straight away.
struct Connection {
    key: SpatialKey,
    atom: Option<Ball>,
    bond: Option<Stick>,
    sublattice: Sublattice,
}

struct Grower<'a> {
    args: &'a GrowArgs,
    atoms: Vec<Ball>,
    bonds: Vec<Stick>,
    sites: HashMap<SpatialKey, usize>,
    bond_keys: HashSet<BondKey>,
}

impl<'a> Grower<'a> {
    fn new(args: &'a GrowArgs) -> Self {
        let seed = args.species_for(args.initial).ball_at(args.seed_position);
        let mut sites = HashMap::new();
        sites.insert(SpatialKey::of(seed.position), 0);

        Self {
            args,
            atoms: vec![seed],
            bonds: Vec::new(),
            sites,
            bond_keys: HashSet::new(),
        }
    }

    /// Follows `angle` from atom `parent`. `None` when the bound rejects the site.
    /// With `allow_new == false` only bonds to already known atoms are produced.
    fn connect(
        &self,
        parent: usize,
        sub: Sublattice,
        angle: &BondAngle,
        allow_new: bool,
    ) -> Option<Connection> {
        let from = self.atoms[parent].position;
        let candidate = point_on_sphere(from, self.args.distance, angle.polar, angle.azimuth);

        if let Some(bound) = &self.args.bound {
            if !bound.contains(candidate) {
                return None;
            }
        }

        let key = SpatialKey::of(candidate);
        let sublattice = (self.args.tables.transition)(sub, angle.polar);

        let (atom, end) = match self.sites.get(&key) {
            Some(&idx) => (None, self.atoms[idx].position),
            None if allow_new => {
                let ball = self.args.species_for(sublattice).ball_at(candidate);
                (Some(ball), candidate)
            }
            None => return None,
        };

        let bond_key = BondKey::new(SpatialKey::of(from), key);
        let bond = (!self.bond_keys.contains(&bond_key)).then_some(Stick { start: from, end });

        Some(Connection { key, atom, bond, sublattice })
    }

    /// Returns the index and sublattice of the atom the connection created, if any
    fn fold(&mut self, c: Connection) -> Option<(usize, Sublattice)> {
        if let Some(bond) = c.bond {
            self.bond_keys.insert(BondKey::of(&bond));
            self.bonds.push(bond);
        }

        let ball = c.atom?;
        let idx = self.atoms.len();
        self.sites.insert(c.key, idx);
        self.atoms.push(ball);
        Some((idx, c.sublattice))
    }

    fn expand(&mut self, frontier: &[(usize, Sublattice)], allow_new: bool) -> Vec<(usize, Sublattice)> {
        let args = self.args;
        let mut next = Vec::new();

        for &(idx, sub) in frontier {
            for angle in args.tables.for_sublattice(sub) {
                if let Some(c) = self.connect(idx, sub, angle, allow_new) {
                    next.extend(self.fold(c));
                }
            }
        }
        next
    }

    fn run(mut self) -> CrystalStructure {
        let mut frontier = vec![(0, self.args.initial)];
        let mut layer = 0u32;

        while !frontier.is_empty() {
            if matches!(self.args.max_layers, Some(max) if layer >= max) {
                break;
            }

            let (atoms_before, bonds_before) = (self.atoms.len(), self.bonds.len());
            frontier = self.expand(&frontier, true);
            layer += 1;

            debug!(
                "layer {}: +{} atoms, +{} bonds",
                layer,
                self.atoms.len() - atoms_before,
                self.bonds.len() - bonds_before
            );
        }

        // Stopped by the layer cap: tie the outer shell to neighbours it already has
        if !frontier.is_empty() {
            let bonds_before = self.bonds.len();
            self.expand(&frontier, false);
            debug!("closing shell: +{} bonds", self.bonds.len() - bonds_before);
        }

        info!(
            "Grew {} atoms and {} bonds in {} layers",
            self.atoms.len(),
            self.bonds.len(),
            layer
        );

        CrystalStructure {
            atoms: self.atoms,
            bonds: self.bonds,
        }
    }
}

/// Grows a crystal breadth-first from the seed.
///
/// # Algorithm
/// 1. Every frontier atom applies the angle table of its sublattice
/// 2. Sites outside the bound are dropped, sites seen before only get a bond
/// 3. New atoms form the next frontier, until none are found or `max_layers` is hit
/// 4. On a layer cap, the last frontier is bonded to known neighbours
///
/// The output is not centered; see `utils::geometry::center`.
pub fn grow(args: &GrowArgs) -> Result<CrystalStructure, GrowError> {
    args.validate()?;
    Ok(Grower::new(args).run())
}
