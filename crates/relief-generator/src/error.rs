//! Generation and export error types.

use std::path::PathBuf;

use relief_mesh::MeshError;
use relief_terrain::TerrainError;

/// A [`GenerationConfig`](relief_config::GenerationConfig) that cannot produce terrain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("terrain-type table is empty")]
    EmptyTerrainTable,

    #[error("grid dimensions must be non-zero (width {width}, depth {depth})")]
    EmptyGrid { width: u32, depth: u32 },

    /// The mesh samples the height field transposed, so width and depth must match.
    #[error("grid must be square (width {width}, depth {depth})")]
    NonSquareGrid { width: u32, depth: u32 },

    #[error("octave count {0} outside 1..=10")]
    OctaveCount(u32),

    #[error("persistence {0} outside 0..=1")]
    Persistence(f32),

    #[error("lacunarity {0} outside 0..=4")]
    Lacunarity(f32),

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
}

/// Errors surfaced by a generation pass.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The configuration was rejected before any buffers were allocated.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Terrain(#[from] TerrainError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// The render surface refused the mesh or texture.
    #[error("failed to publish terrain: {0}")]
    Publish(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors writing generated assets to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
