//! Terrain generation orchestration: validates a [`GenerationConfig`], runs the
//! noise → color map → mesh pipeline, and publishes the results to a
//! [`RenderSurface`].
//!
//! [`GenerationConfig`]: relief_config::GenerationConfig

mod error;
mod export;
mod generator;
mod surface;

pub use error::{ConfigurationError, ExportError, GenerationError};
pub use export::FileSurface;
pub use generator::{GeneratedTerrain, TerrainGenerator};
pub use surface::{MemorySurface, RenderSurface};
