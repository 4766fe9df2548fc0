// src/physics/mod.rs

pub mod angles;
pub mod bounds;
pub mod growth;
pub mod crystals;

// Re-export commonly used items
pub use angles::{BondAngle, LatticeTables, Sublattice};
pub use bounds::Bound;
pub use growth::{grow, GrowArgs, GrowError, SpatialKey, KEY_RESOLUTION};
pub use crystals::{build, build_many, build_with, default_species, CrystalKind, CrystalRequest, Extent};
