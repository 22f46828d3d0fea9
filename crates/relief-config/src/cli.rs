//! Command-line argument parsing for Relief.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Relief command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "relief", about = "Procedural heightmap terrain generator")]
pub struct CliArgs {
    /// Grid width in cells.
    #[arg(long)]
    pub width: Option<u32>,

    /// Grid depth in cells.
    #[arg(long)]
    pub depth: Option<u32>,

    /// Vertical scale of the mesh.
    #[arg(long)]
    pub max_height: Option<f32>,

    /// Sampling scale of the first noise octave.
    #[arg(long)]
    pub noise_scale: Option<f32>,

    /// Number of noise octaves (1-10).
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Amplitude decay per octave (0-1).
    #[arg(long)]
    pub persistence: Option<f32>,

    /// Frequency growth per octave (0-4).
    #[arg(long)]
    pub lacunarity: Option<f32>,

    /// Seed for reproducible terrain.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output directory for the texture and mesh.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let generation = &mut self.generation;
        if let Some(w) = args.width {
            generation.grid_width = w;
        }
        if let Some(d) = args.depth {
            generation.grid_depth = d;
        }
        if let Some(h) = args.max_height {
            generation.max_height = h;
        }
        if let Some(s) = args.noise_scale {
            generation.noise_scale = s;
        }
        if let Some(o) = args.octaves {
            generation.octave_count = o;
        }
        if let Some(p) = args.persistence {
            generation.persistence = p;
        }
        if let Some(l) = args.lacunarity {
            generation.lacunarity = l;
        }
        if let Some(seed) = args.seed {
            generation.seed = Some(seed);
        }
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
