// src/config.rs

use crate::model::structure::{Color, Species};
use crate::physics::crystals::{default_species, CrystalKind, Extent};
use crate::physics::growth::GrowError;
use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LogLevel {
  Error,
  Warn,
  Info,
  Debug,
  Trace,
}

impl LogLevel {
  pub fn to_filter(self) -> LevelFilter {
    match self {
      LogLevel::Error => LevelFilter::Error,
      LogLevel::Warn => LevelFilter::Warn,
      LogLevel::Info => LevelFilter::Info,
      LogLevel::Debug => LevelFilter::Debug,
      LogLevel::Trace => LevelFilter::Trace,
    }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
  pub default_crystal: CrystalKind,

  /// Conventional cells per axis for bounded growth
  #[serde(default = "default_unit_cells")]
  pub unit_cells: u32,

  /// Coordination shells for the unbounded sample
  #[serde(default = "default_sample_layers")]
  pub sample_layers: u32,

  /// Grow `sample_layers` shells around the seed instead of filling cells
  #[serde(default)]
  pub prefer_sample: bool,

  #[serde(default)]
  pub pretty_json: bool,

  #[serde(default = "default_log_level")]
  pub log_level: LogLevel,

  // Overrides the built-in CPK colors, keyed by element symbol
  #[serde(default)]
  pub element_colors: HashMap<String, Color>,
}

fn default_unit_cells() -> u32 {
  2
}

fn default_sample_layers() -> u32 {
  3
}

fn default_log_level() -> LogLevel {
  LogLevel::Info
}

impl Default for Config {
  fn default() -> Self {
    Self {
      default_crystal: CrystalKind::FaceCenteredCubic,
      unit_cells: default_unit_cells(),
      sample_layers: default_sample_layers(),
      prefer_sample: false,
      pretty_json: false,
      log_level: default_log_level(),
      element_colors: HashMap::new(),
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/latticegrow/settings.json)
  pub fn load() -> (Self, String) {
    Self::load_from(&Self::get_path())
  }

  pub fn load_from(path: &Path) -> (Self, String) {
    if path.exists() {
      match File::open(path) {
        Ok(file) => {
          let reader = BufReader::new(file);
          match serde_json::from_reader(reader) {
            Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
            Err(e) => (Self::default(), format!("Error parsing config: {}", e)),
          }
        }
        Err(e) => (Self::default(), format!("Error opening config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> String {
    self.save_to(&Self::get_path())
  }

  pub fn save_to(&self, path: &Path) -> String {
    if let Some(parent) = path.parent() {
      let _ = fs::create_dir_all(parent);
    }

    match File::create(path) {
      Ok(file) => {
        let writer = BufWriter::new(file);
        match serde_json::to_writer_pretty(writer, self) {
          Ok(_) => format!("Config saved to {:?}", path),
          Err(e) => format!("Failed to save config: {}", e),
        }
      }
      Err(e) => format!("Could not create config file: {}", e),
    }
  }

  fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "mavensgroup", "latticegrow") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }

  pub fn extent(&self) -> Extent {
    if self.prefer_sample {
      Extent::Layers(self.sample_layers)
    } else {
      Extent::UnitCells(self.unit_cells)
    }
  }

  /// Built-in species for `kind` with this config's color overrides applied
  pub fn species_for(&self, kind: CrystalKind) -> Result<Vec<Species>, GrowError> {
    let mut species = default_species(kind)?;
    for s in &mut species {
      if let Some(color) = self.element_colors.get(&s.element) {
        s.color = *color;
      }
    }
    Ok(species)
  }
}
