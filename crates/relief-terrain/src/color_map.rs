//! Terrain color map synthesis.

use crate::noise_field::HeightField;
use crate::terrain_type::{Rgb, TerrainTable};

/// How a renderer should sample outside `[0, 1]` UVs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    #[default]
    Clamp,
    Repeat,
}

/// Texel filtering hint for the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    Point,
    #[default]
    Bilinear,
}

/// A 2D RGB texture stored as row-major pixels.
///
/// Row 0 is the `v = 0` edge, matching the mesh UVs.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    /// Width in pixels (height field columns).
    pub width: u32,
    /// Height in pixels (height field rows).
    pub height: u32,
    /// Pixels, `width * height` entries.
    pub pixels: Vec<Rgb>,
    pub wrap_mode: WrapMode,
    pub filter_mode: FilterMode,
}

impl Texture {
    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Convert to an [`image::RgbImage`] with the `v = 1` row on top, ready to
    /// be written out and mapped by the mesh UVs.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            self.pixel(x, self.height - 1 - y).into()
        })
    }
}

/// Paint one pixel per height field cell with the color of its terrain type.
pub fn build_color_map(field: &HeightField, table: &TerrainTable) -> Texture {
    let pixels = field
        .values()
        .iter()
        .map(|&h| table.classify(h).color)
        .collect();

    Texture {
        width: field.cols() as u32,
        height: field.rows() as u32,
        pixels,
        wrap_mode: WrapMode::Clamp,
        filter_mode: FilterMode::default(),
    }
}
