//! Procedural terrain generation: multi-octave noise height fields, elevation-banded
//! terrain classification, color map synthesis, and height response curves.

mod color_map;
mod curve;
mod error;
mod noise_field;
mod terrain_type;

pub use color_map::{FilterMode, Texture, WrapMode, build_color_map};
pub use curve::{IdentityCurve, Keyframe, KeyframeCurve, ResponseCurve};
pub use error::TerrainError;
pub use noise_field::{
    CoherentNoise, HeightField, NoiseFieldParams, OCTAVE_OFFSET_RANGE, OctaveOffsets,
    generate_height_field, generate_height_field_with_offsets,
};
pub use terrain_type::{Rgb, TerrainTable, TerrainType, classify, default_terrain_types};
