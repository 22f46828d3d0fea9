//! Command-line terrain generator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p relief-demo` to write `terrain.obj` and `terrain.png`.
//! Run with `cargo run -p relief-demo -- --width 256 --depth 256 --seed 7` for a
//! larger, reproducible map.

use std::process::ExitCode;

use clap::Parser;
use relief_config::{CliArgs, Config};
use relief_generator::{FileSurface, TerrainGenerator};
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("relief")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    if let Err(e) = relief_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config))
    {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!(
        "Grid {}x{}, {} octaves, persistence {}, lacunarity {}",
        config.generation.grid_width,
        config.generation.grid_depth,
        config.generation.octave_count,
        config.generation.persistence,
        config.generation.lacunarity,
    );

    let generator = match TerrainGenerator::new(config.generation.clone()) {
        Ok(generator) => generator,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let terrain = match generator.generate() {
        Ok(terrain) => terrain,
        Err(e) => {
            error!("Generation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.debug.log_vertices {
        for (i, v) in terrain.mesh.vertex_positions().iter().enumerate() {
            debug!(index = i, x = v.x, y = v.y, z = v.z, "vertex");
        }
    }

    let mut surface = FileSurface::from_config(&config);
    if let Err(e) = terrain.publish(&mut surface) {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    info!(
        "Wrote {} and {}",
        surface.mesh_path().display(),
        surface.texture_path().display()
    );
    ExitCode::SUCCESS
}
