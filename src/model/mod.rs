//src/model/mod.rs
pub mod structure;
pub mod elements;

// Re-exports for cleaner imports
pub use structure::{Ball, Color, CrystalStructure, Species, Stick};
pub use elements::{get_atom_properties, species};
