use lattice_grow::config::Config;
use lattice_grow::physics::crystals::{self, CrystalKind, CrystalRequest, Extent};
use lattice_grow::physics::growth::GrowError;
use lattice_grow::utils::logger;
use std::process::ExitCode;

fn main() -> ExitCode {
    let (config, config_msg) = Config::load();
    let _ = logger::init(config.log_level.to_filter());
    log::info!("{}", config_msg);

    // lattice-grow [KIND|all] [N]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let extent = match args.get(1).map(|n| n.parse::<u32>()) {
        None => config.extent(),
        Some(Ok(n)) if config.prefer_sample => Extent::Layers(n),
        Some(Ok(n)) => Extent::UnitCells(n),
        Some(Err(e)) => {
            log::error!("Invalid size '{}': {}", args[1], e);
            return ExitCode::from(2);
        }
    };

    let output = match args.first().map(String::as_str) {
        Some("all") => render_all(&config, extent),
        other => {
            let kind = match other.map(str::parse::<CrystalKind>) {
                None => Ok(config.default_crystal),
                Some(parsed) => parsed,
            };
            match kind {
                Ok(kind) => render_one(&config, kind, extent),
                Err(e) => {
                    log::error!("{}", e);
                    return ExitCode::from(2);
                }
            }
        }
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn render_one(config: &Config, kind: CrystalKind, extent: Extent) -> Result<String, Box<dyn std::error::Error>> {
    let species = config.species_for(kind)?;
    let structure = crystals::build_with(kind, &species, extent)?;
    log::info!(
        "{}: {} ({} atoms, {} bonds)",
        kind.name(),
        structure.formula(),
        structure.atoms.len(),
        structure.bonds.len()
    );
    Ok(structure.to_json(config.pretty_json)?)
}

fn render_all(config: &Config, extent: Extent) -> Result<String, Box<dyn std::error::Error>> {
    let requests = CrystalKind::ALL
        .iter()
        .map(|&kind| {
            Ok(CrystalRequest {
                kind,
                extent,
                species: Some(config.species_for(kind)?),
            })
        })
        .collect::<Result<Vec<_>, GrowError>>()?;

    let mut map = serde_json::Map::new();
    for (req, result) in requests.iter().zip(crystals::build_many(&requests)) {
        let structure = result?;
        log::info!("{}: {}", req.kind.name(), structure.formula());
        map.insert(req.kind.name().to_string(), serde_json::to_value(&structure)?);
    }

    let value = serde_json::Value::Object(map);
    let json = if config.pretty_json {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json)
}
