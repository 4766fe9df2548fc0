// src/model/elements.rs

use super::structure::{Color, Species};

/// Returns (radius_in_picometers, (r, g, b)) for the elements the crystal
/// assemblies use. Metals carry metallic radii (half the nearest-neighbour
/// distance), ions carry Shannon ionic radii, C/Si/Zn/S covalent radii.
/// Colors are standard CPK.
pub fn get_atom_properties(element: &str) -> Option<(f64, Color)> {
    let props = match element {
        // --- Covalent network formers ---
        "C"  => (77.0, (0.20, 0.20, 0.20)),  // Dark Grey
        "Si" => (117.0, (0.94, 0.78, 0.63)), // Tan
        "Ge" => (122.0, (0.40, 0.56, 0.56)), // Grey-Teal
        "Zn" => (131.0, (0.49, 0.50, 0.69)), // Slate
        "S"  => (102.0, (1.00, 1.00, 0.19)), // Yellow

        // --- Metals (metallic radius) ---
        "Po" => (168.0, (0.67, 0.36, 0.00)), // Brown-Orange; 167.5 would sit on the dedup grid
        "Fe" => (124.1, (0.88, 0.40, 0.20)), // Rust / Orange
        "Cr" => (124.9, (0.54, 0.60, 0.78)), // Blue-Grey
        "Cu" => (127.8, (0.78, 0.50, 0.20)), // Copper
        "Al" => (143.2, (0.75, 0.65, 0.65)), // Silver-Grey
        "Ag" => (144.5, (0.75, 0.75, 0.75)), // Silver
        "Au" => (144.2, (1.00, 0.82, 0.14)), // Gold
        "Mg" => (160.0, (0.54, 1.00, 0.00)), // Forest Green
        "Ti" => (146.2, (0.75, 0.76, 0.78)), // Silver

        // --- Ions (Shannon, CN=6 unless noted) ---
        "Na" => (102.0, (0.67, 0.36, 0.95)), // Violet
        "K"  => (138.0, (0.56, 0.25, 0.83)), // Purple
        "Cs" => (174.0, (0.34, 0.09, 0.56)), // CN=8, Deep Violet
        "Cl" => (181.0, (0.12, 0.94, 0.12)), // Bright Green
        "Br" => (196.0, (0.65, 0.16, 0.16)), // Brown
        "O"  => (140.0, (1.00, 0.05, 0.05)), // Red

        _ => return None,
    };
    Some(props)
}

/// Species template for `element`, `None` for elements outside the table
pub fn species(element: &str) -> Option<Species> {
    get_atom_properties(element).map(|(radius, color)| Species::new(element, radius, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown() {
        let na = species("Na").unwrap();
        assert_eq!(na.element, "Na");
        assert!((na.radius - 102.0).abs() < 1e-12);

        assert!(species("Xx").is_none());
    }

    #[test]
    fn test_rock_salt_spacing_matches_nacl() {
        // NaCl nearest-neighbour distance is about 282 pm
        let (na, _) = get_atom_properties("Na").unwrap();
        let (cl, _) = get_atom_properties("Cl").unwrap();
        assert!((na + cl - 282.0).abs() < 2.0);
    }
}
