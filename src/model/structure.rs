use serde::{Deserialize, Serialize};

/// Display colour (r, g, b) in 0..1. The growth engine only copies it around.
pub type Color = (f64, f64, f64);

/// Template an atom is stamped from: what to draw and how big.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub element: String,
    /// Radius in picometers
    pub radius: f64,
    pub color: Color,
}

impl Species {
    pub fn new(element: &str, radius: f64, color: Color) -> Self {
        Self {
            element: element.to_string(),
            radius,
            color,
        }
    }

    pub fn ball_at(&self, position: [f64; 3]) -> Ball {
        Ball {
            element: self.element.clone(),
            position,
            radius: self.radius,
            color: self.color,
        }
    }
}

/// One atom of the output, positions in picometers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub element: String,
    pub position: [f64; 3],
    pub radius: f64,
    pub color: Color,
}

/// Undirected bond between two atom positions
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stick {
    pub start: [f64; 3],
    pub end: [f64; 3],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrystalStructure {
    // Discovery order, no meaning beyond that
    pub atoms: Vec<Ball>,
    pub bonds: Vec<Stick>,
}

impl CrystalStructure {
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Chemical formula by element counts, e.g. "Cl14 Na13"
    pub fn formula(&self) -> String {
        let mut counts: std::collections::BTreeMap<&str, usize> = Default::default();
        for atom in &self.atoms {
            *counts.entry(atom.element.as_str()).or_default() += 1;
        }
        counts
            .iter()
            .map(|(el, n)| format!("{}{}", el, n))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
