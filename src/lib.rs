// src/lib.rs

//! Crystal lattice growth: atoms and bonds of simple cubic, BCC, FCC, HCP,
//! diamond, zinc blende, rock salt and cesium chloride samples, ready for a
//! ball-and-stick renderer.

pub mod config;
pub mod model;
pub mod physics;
pub mod utils;

pub use model::{Ball, CrystalStructure, Species, Stick};
pub use physics::{build, build_many, build_with, grow, CrystalKind, Extent, GrowArgs, GrowError};
