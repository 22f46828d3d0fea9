//! Multi-octave height field generation.
//!
//! Sums octaves of 2D Perlin noise over a regular grid. Each octave samples the
//! noise at a random offset drawn once per generation, so the same parameters
//! produce a different landscape every run unless the offsets are fixed.

use glam::Vec2;
use noise::{NoiseFn, Perlin};
use rand::Rng;

use crate::error::TerrainError;

/// Octave offsets are drawn per axis from `-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE`.
pub const OCTAVE_OFFSET_RANGE: i32 = 1000;

/// Coherent 2D gradient noise remapped to `[0, 1]`.
///
/// The permutation table is fixed; variation between runs comes entirely from
/// the octave offsets.
#[derive(Clone, Debug)]
pub struct CoherentNoise {
    perlin: Perlin,
}

impl CoherentNoise {
    /// Create a noise source with the default permutation table.
    pub fn new() -> Self {
        Self {
            perlin: Perlin::new(Perlin::DEFAULT_SEED),
        }
    }

    /// Sample the noise at `(x, y)`. Returns a value in `[0, 1]`.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let raw = self.perlin.get([f64::from(x), f64::from(y)]);
        ((raw * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
    }
}

impl Default for CoherentNoise {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for one height field generation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseFieldParams {
    /// Grid depth in cells. The field has `depth + 1` rows.
    pub depth: u32,
    /// Grid width in cells. The field has `width + 1` columns.
    pub width: u32,
    /// Sampling scale of the first octave.
    pub scale: f32,
    /// Number of octaves to sum.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f32,
}

/// Per-octave sampling offsets, shared by every cell of one generation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct OctaveOffsets(Vec<Vec2>);

impl OctaveOffsets {
    /// Draw `count` integer-valued offsets in `[-1000, 1000)` per axis.
    pub fn random<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Self {
        let offsets = (0..count)
            .map(|_| {
                let x = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE);
                let y = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE);
                Vec2::new(x as f32, y as f32)
            })
            .collect();
        Self(offsets)
    }

    /// Use explicit offsets, one per octave.
    pub fn from_vec(offsets: Vec<Vec2>) -> Self {
        Self(offsets)
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A row-major grid of raw summed-octave heights.
///
/// Values are not normalized: with several octaves the sum of amplitudes
/// exceeds 1 and so can the stored heights.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl HeightField {
    /// Create a zero-filled field.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Create a field by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut values = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                values.push(f(row, col));
            }
        }
        Self { rows, cols, values }
    }

    /// Number of rows (grid depth + 1).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (grid width + 1).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flat index of `(row, col)`. Every lookup into the field goes through here.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Height at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) out of bounds");
        self.values[self.index(row, col)]
    }

    /// All heights in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest height, or `None` for an empty field.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Generate a height field, drawing fresh octave offsets from `rng`.
pub fn generate_height_field<R: Rng + ?Sized>(
    params: &NoiseFieldParams,
    rng: &mut R,
) -> Result<HeightField, TerrainError> {
    check_grid(params)?;
    let offsets = OctaveOffsets::random(params.octaves, rng);
    generate_height_field_with_offsets(params, &offsets)
}

/// Generate a height field from fixed octave offsets.
///
/// Cell `(z, x)` accumulates, for each octave, the noise sampled at
/// `offset + (z / depth, x / width) * scale` with the two components passed to
/// the noise in swapped order (`y` first). The swap changes orientation only and
/// is kept so identical offsets keep producing identical terrain.
pub fn generate_height_field_with_offsets(
    params: &NoiseFieldParams,
    offsets: &OctaveOffsets,
) -> Result<HeightField, TerrainError> {
    check_grid(params)?;
    if offsets.len() != params.octaves as usize {
        return Err(TerrainError::OffsetCountMismatch {
            expected: params.octaves,
            actual: offsets.len(),
        });
    }

    let noise = CoherentNoise::new();
    let depth_norm = params.depth as f32;
    let width_norm = params.width as f32;
    let rows = params.depth as usize + 1;
    let cols = params.width as usize + 1;

    let field = HeightField::from_fn(rows, cols, |z, x| {
        let cell = Vec2::new(z as f32 / depth_norm, x as f32 / width_norm);
        let mut scale = params.scale;
        let mut weight = 1.0;
        let mut value = 0.0;

        for offset in offsets.as_slice() {
            let position = *offset + cell * scale;
            value += noise.sample(position.y, position.x) * weight;

            weight *= params.persistence;
            scale *= params.lacunarity;
        }

        value
    });

    Ok(field)
}

fn check_grid(params: &NoiseFieldParams) -> Result<(), TerrainError> {
    if params.width == 0 || params.depth == 0 {
        return Err(TerrainError::EmptyGrid {
            width: params.width,
            depth: params.depth,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_params() -> NoiseFieldParams {
        NoiseFieldParams {
            depth: 16,
            width: 24,
            scale: 3.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }

    #[test]
    fn test_field_dimensions_include_edge_row_and_column() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let field = generate_height_field(&small_params(), &mut rng).unwrap();
        assert_eq!(field.rows(), 17);
        assert_eq!(field.cols(), 25);
        assert_eq!(field.len(), 17 * 25);
    }

    #[test]
    fn test_zero_octaves_yields_all_zero_field() {
        let params = NoiseFieldParams {
            octaves: 0,
            ..small_params()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let field = generate_height_field(&params, &mut rng).unwrap();
        assert!(field.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_unweighted_octave_is_one_noise_sample() {
        let params = NoiseFieldParams {
            depth: 8,
            width: 12,
            scale: 2.5,
            octaves: 1,
            persistence: 1.0,
            lacunarity: 1.0,
        };
        let offset = Vec2::new(-137.0, 412.0);
        let offsets = OctaveOffsets::from_vec(vec![offset]);
        let field = generate_height_field_with_offsets(&params, &offsets).unwrap();

        let noise = CoherentNoise::new();
        for z in 0..field.rows() {
            for x in 0..field.cols() {
                let p = offset + Vec2::new(z as f32 / 8.0, x as f32 / 12.0) * 2.5;
                let expected = noise.sample(p.y, p.x);
                assert_eq!(field.get(z, x), expected, "cell ({z}, {x})");
            }
        }
    }

    #[test]
    fn test_octave_accumulation_matches_weighted_sum() {
        let params = NoiseFieldParams {
            depth: 5,
            width: 5,
            scale: 1.5,
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
        };
        let raw = vec![
            Vec2::new(10.0, -20.0),
            Vec2::new(300.0, 7.0),
            Vec2::new(-999.0, 999.0),
        ];
        let offsets = OctaveOffsets::from_vec(raw.clone());
        let field = generate_height_field_with_offsets(&params, &offsets).unwrap();

        let noise = CoherentNoise::new();
        let (z, x) = (3, 4);
        let cell = Vec2::new(z as f32 / 5.0, x as f32 / 5.0);
        let mut expected = 0.0;
        let mut scale = 1.5;
        let mut weight = 1.0;
        for offset in &raw {
            let p = *offset + cell * scale;
            expected += noise.sample(p.y, p.x) * weight;
            weight *= 0.5;
            scale *= 2.0;
        }
        assert_eq!(field.get(z, x), expected);
    }

    #[test]
    fn test_same_offsets_produce_identical_fields() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let offsets = OctaveOffsets::random(4, &mut rng);
        let a = generate_height_field_with_offsets(&small_params(), &offsets).unwrap();
        let b = generate_height_field_with_offsets(&small_params(), &offsets).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_independent_offsets_produce_different_fields() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(1);
        let mut rng_b = ChaCha8Rng::seed_from_u64(2);
        let a = generate_height_field(&small_params(), &mut rng_a).unwrap();
        let b = generate_height_field(&small_params(), &mut rng_b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_offsets_are_integers_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let offsets = OctaveOffsets::random(10, &mut rng);
        assert_eq!(offsets.len(), 10);
        for o in offsets.as_slice() {
            for c in [o.x, o.y] {
                assert_eq!(c.fract(), 0.0);
                assert!((-1000.0..1000.0).contains(&c), "offset component {c} out of range");
            }
        }
    }

    #[test]
    fn test_summed_octaves_are_not_normalized() {
        let params = NoiseFieldParams {
            octaves: 6,
            persistence: 1.0,
            ..small_params()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let field = generate_height_field(&params, &mut rng).unwrap();
        let (_, max) = field.min_max().unwrap();
        assert!(max > 1.0, "six full-weight octaves should exceed 1, max was {max}");
    }

    #[test]
    fn test_zero_grid_dimension_is_rejected() {
        let params = NoiseFieldParams {
            width: 0,
            ..small_params()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            generate_height_field(&params, &mut rng),
            Err(TerrainError::EmptyGrid { width: 0, depth: 16 })
        );
    }

    #[test]
    fn test_offset_count_must_match_octaves() {
        let offsets = OctaveOffsets::from_vec(vec![Vec2::ZERO; 2]);
        let err = generate_height_field_with_offsets(&small_params(), &offsets).unwrap_err();
        assert_eq!(
            err,
            TerrainError::OffsetCountMismatch {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn test_noise_sample_stays_in_unit_range() {
        let noise = CoherentNoise::new();
        for i in 0..2000 {
            let v = noise.sample(i as f32 * 0.173 - 150.0, i as f32 * 0.061 + 20.0);
            assert!((0.0..=1.0).contains(&v), "sample {v} outside [0, 1]");
        }
    }

    #[test]
    fn test_min_max_of_constant_field() {
        let field = HeightField::from_fn(3, 4, |_, _| 0.25);
        assert_eq!(field.min_max(), Some((0.25, 0.25)));
        assert_eq!(HeightField::new(0, 0).min_max(), None);
    }

    #[test]
    fn test_index_is_row_major() {
        let field = HeightField::from_fn(3, 5, |row, col| (row * 10 + col) as f32);
        assert_eq!(field.index(2, 3), 13);
        assert_eq!(field.values()[field.index(2, 3)], 23.0);
        assert_eq!(field.get(1, 4), 14.0);
    }
}
