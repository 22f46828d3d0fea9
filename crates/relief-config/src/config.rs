//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use relief_terrain::{KeyframeCurve, TerrainType, default_terrain_types};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain generation parameters.
    pub generation: GenerationConfig,
    /// Where generated assets are written.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Parameters for one terrain generation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid width in cells (vertices along X minus one).
    pub grid_width: u32,
    /// Grid depth in cells (vertices along Z minus one).
    pub grid_depth: u32,
    /// Vertical scale applied after the response curve.
    pub max_height: f32,
    /// Sampling scale of the first noise octave.
    pub noise_scale: f32,
    /// Number of noise octaves (1..=10).
    pub octave_count: u32,
    /// Amplitude decay per octave (0..=1).
    pub persistence: f32,
    /// Frequency growth per octave (0..=4).
    pub lacunarity: f32,
    /// Remaps raw heights before scaling by `max_height`.
    pub response_curve: KeyframeCurve,
    /// Ordered elevation bands; the last entry catches every remaining height.
    pub terrain_types: Vec<TerrainType>,
    /// Fixed seed for the octave offsets. `None` draws from OS entropy so every
    /// run differs.
    pub seed: Option<u64>,
}

/// Output locations for generated assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives the texture and mesh.
    pub directory: PathBuf,
    /// Texture file name (PNG).
    pub texture_file: String,
    /// Mesh file name (Wavefront OBJ).
    pub mesh_file: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log every vertex position after generation.
    pub log_vertices: bool,
}

// --- Default implementations ---

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            grid_width: 100,
            grid_depth: 100,
            max_height: 10.0,
            noise_scale: 4.0,
            octave_count: 7,
            persistence: 0.5,
            lacunarity: 2.0,
            // Flattens everything below the water band, then rises linearly.
            response_curve: KeyframeCurve::linear(&[(0.0, 0.0), (0.8, 0.05), (2.0, 1.0)]),
            terrain_types: default_terrain_types(),
            seed: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("relief-output"),
            texture_file: "terrain.png".to_string(),
            mesh_file: "terrain.obj".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_vertices: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })
    }

    /// Resolve the texture output path.
    pub fn texture_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.texture_file)
    }

    /// Resolve the mesh output path.
    pub fn mesh_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.mesh_file)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
