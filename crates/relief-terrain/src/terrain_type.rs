//! Elevation-banded terrain types and height classification.

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// An 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

/// A named elevation band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainType {
    /// Display name, e.g. `"water"`.
    pub name: String,
    /// Exclusive upper height bound. Ignored for the last entry of a table.
    pub height: f32,
    /// Color painted into the terrain texture.
    pub color: Rgb,
}

impl TerrainType {
    pub fn new(name: impl Into<String>, height: f32, color: Rgb) -> Self {
        Self {
            name: name.into(),
            height,
            color,
        }
    }
}

/// Default bands, tuned for seven octaves at persistence 0.5 where raw heights
/// cluster around 1.0.
pub fn default_terrain_types() -> Vec<TerrainType> {
    vec![
        TerrainType::new("deep_water", 0.7, Rgb::new(25, 55, 150)),
        TerrainType::new("water", 0.8, Rgb::new(50, 100, 200)),
        TerrainType::new("sand", 0.85, Rgb::new(220, 205, 140)),
        TerrainType::new("grass", 1.05, Rgb::new(85, 160, 50)),
        TerrainType::new("forest", 1.2, Rgb::new(40, 105, 35)),
        TerrainType::new("rock", 1.35, Rgb::new(110, 95, 80)),
        TerrainType::new("snow", 2.0, Rgb::new(245, 245, 250)),
    ]
}

/// Classify `height` against an ordered list of terrain types.
///
/// Returns the first entry whose bound strictly exceeds `height`. Heights at or
/// above every bound fall back to the last entry.
///
/// # Errors
///
/// Returns [`TerrainError::EmptyTerrainTable`] if `types` is empty.
pub fn classify(height: f32, types: &[TerrainType]) -> Result<&TerrainType, TerrainError> {
    types
        .iter()
        .find(|t| height < t.height)
        .or_else(|| types.last())
        .ok_or(TerrainError::EmptyTerrainTable)
}

/// A non-empty, ordered terrain-type table.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainTable {
    types: Vec<TerrainType>,
}

impl TerrainTable {
    /// Wrap an ordered list of terrain types.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::EmptyTerrainTable`] if `types` is empty.
    pub fn new(types: Vec<TerrainType>) -> Result<Self, TerrainError> {
        if types.is_empty() {
            return Err(TerrainError::EmptyTerrainTable);
        }
        Ok(Self { types })
    }

    /// Classify a height. Never fails because the table is non-empty.
    pub fn classify(&self, height: f32) -> &TerrainType {
        self.types
            .iter()
            .find(|t| height < t.height)
            .unwrap_or(&self.types[self.types.len() - 1])
    }

    pub fn types(&self) -> &[TerrainType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
