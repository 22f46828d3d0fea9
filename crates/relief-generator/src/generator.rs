//! The generation pass: config validation, noise, color map, mesh, publish.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use relief_config::GenerationConfig;
use relief_mesh::{TerrainMesh, build_mesh};
use relief_terrain::{
    HeightField, NoiseFieldParams, OctaveOffsets, TerrainTable, Texture, build_color_map,
    generate_height_field_with_offsets,
};
use tracing::{debug, info, info_span};

use crate::error::{ConfigurationError, GenerationError};
use crate::surface::RenderSurface;

/// Octave counts accepted by [`TerrainGenerator::new`].
const OCTAVE_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// Everything one generation pass produces.
#[derive(Clone, Debug)]
pub struct GeneratedTerrain {
    /// The offsets the pass sampled with; feeding them back reproduces it.
    pub offsets: OctaveOffsets,
    pub height_field: HeightField,
    pub texture: Texture,
    pub mesh: TerrainMesh,
}

impl GeneratedTerrain {
    /// Hand the mesh and texture to `surface`, replacing what it showed before.
    ///
    /// See [`RenderSurface::publish`] for what a failed publish leaves behind.
    pub fn publish<S: RenderSurface>(self, surface: &mut S) -> Result<(), GenerationError> {
        surface
            .publish(self.mesh, self.texture)
            .map_err(|e| GenerationError::Publish(Box::new(e)))
    }
}

/// Owns a validated [`GenerationConfig`] and runs generation passes from it.
///
/// Every pass rebuilds the height field, texture and mesh from scratch; nothing
/// carries over between passes.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    config: GenerationConfig,
    table: TerrainTable,
}

impl TerrainGenerator {
    /// Validate `config` and build a generator.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Configuration`] for an empty terrain table, a
    /// zero or non-square grid, or parameters outside their ranges.
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        validate(&config)?;
        let table = TerrainTable::new(config.terrain_types.clone())?;
        Ok(Self { config, table })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn terrain_table(&self) -> &TerrainTable {
        &self.table
    }

    /// Noise parameters derived from the config.
    pub fn noise_params(&self) -> NoiseFieldParams {
        NoiseFieldParams {
            depth: self.config.grid_depth,
            width: self.config.grid_width,
            scale: self.config.noise_scale,
            octaves: self.config.octave_count,
            persistence: self.config.persistence,
            lacunarity: self.config.lacunarity,
        }
    }

    /// Run one pass with the configured seed, or a thread-RNG seed if there is none.
    pub fn generate(&self) -> Result<GeneratedTerrain, GenerationError> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        self.generate_with_rng(&mut rng)
    }

    /// Run one pass, drawing the octave offsets from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<GeneratedTerrain, GenerationError> {
        let offsets = OctaveOffsets::random(self.config.octave_count, rng);
        self.generate_with_offsets(offsets)
    }

    /// Run one pass with fixed octave offsets.
    pub fn generate_with_offsets(
        &self,
        offsets: OctaveOffsets,
    ) -> Result<GeneratedTerrain, GenerationError> {
        let cfg = &self.config;
        let _span = info_span!(
            "generate",
            width = cfg.grid_width,
            depth = cfg.grid_depth,
            octaves = cfg.octave_count
        )
        .entered();

        let params = self.noise_params();
        let height_field = generate_height_field_with_offsets(&params, &offsets)?;
        if let Some((min, max)) = height_field.min_max() {
            debug!(min, max, "height field generated");
        }

        let texture = build_color_map(&height_field, &self.table);
        debug!(
            width = texture.width,
            height = texture.height,
            "color map built"
        );

        let mesh = build_mesh(
            &height_field,
            &cfg.response_curve,
            cfg.max_height,
            cfg.grid_width,
            cfg.grid_depth,
        )?;
        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "terrain generated"
        );

        Ok(GeneratedTerrain {
            offsets,
            height_field,
            texture,
            mesh,
        })
    }

    /// Run one pass and publish it to `surface`.
    pub fn generate_into<S: RenderSurface>(&self, surface: &mut S) -> Result<(), GenerationError> {
        self.generate()?.publish(surface)
    }
}

fn validate(config: &GenerationConfig) -> Result<(), ConfigurationError> {
    if config.terrain_types.is_empty() {
        return Err(ConfigurationError::EmptyTerrainTable);
    }
    if config.grid_width == 0 || config.grid_depth == 0 {
        return Err(ConfigurationError::EmptyGrid {
            width: config.grid_width,
            depth: config.grid_depth,
        });
    }
    if config.grid_width != config.grid_depth {
        return Err(ConfigurationError::NonSquareGrid {
            width: config.grid_width,
            depth: config.grid_depth,
        });
    }
    if !OCTAVE_RANGE.contains(&config.octave_count) {
        return Err(ConfigurationError::OctaveCount(config.octave_count));
    }
    if !(0.0..=1.0).contains(&config.persistence) {
        return Err(ConfigurationError::Persistence(config.persistence));
    }
    if !(0.0..=4.0).contains(&config.lacunarity) {
        return Err(ConfigurationError::Lacunarity(config.lacunarity));
    }
    for (name, value) in [
        ("noise_scale", config.noise_scale),
        ("max_height", config.max_height),
    ] {
        if !value.is_finite() {
            return Err(ConfigurationError::NonFinite { name, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use glam::Vec2;
    use relief_terrain::{IdentityCurve, Rgb, TerrainType, classify};

    fn small_config() -> GenerationConfig {
        GenerationConfig {
            grid_width: 12,
            grid_depth: 12,
            octave_count: 4,
            seed: Some(2024),
            ..GenerationConfig::default()
        }
    }

    /// Accepts meshes but refuses every texture.
    #[derive(Default)]
    struct RefusingSurface {
        inner: MemorySurface,
    }

    impl RenderSurface for RefusingSurface {
        type Error = std::io::Error;

        fn set_mesh(&mut self, mesh: TerrainMesh) -> Result<(), Self::Error> {
            let _ = self.inner.set_mesh(mesh);
            Ok(())
        }

        fn set_main_texture(&mut self, _texture: Texture) -> Result<(), Self::Error> {
            Err(std::io::Error::other("texture refused"))
        }
    }

    fn config_error(config: GenerationConfig) -> ConfigurationError {
        match TerrainGenerator::new(config) {
            Err(GenerationError::Configuration(e)) => e,
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_pass_produces_consistent_buffers() {
        let generator = TerrainGenerator::new(small_config()).unwrap();
        let terrain = generator.generate().unwrap();
        assert_eq!(terrain.offsets.len(), 4);
        assert_eq!(terrain.height_field.rows(), 13);
        assert_eq!(terrain.height_field.cols(), 13);
        assert_eq!(terrain.texture.pixels.len(), 13 * 13);
        assert_eq!(terrain.mesh.vertex_count(), 13 * 13);
        assert_eq!(terrain.mesh.triangle_count(), 12 * 12 * 2);
    }

    #[test]
    fn test_texture_colors_follow_terrain_table() {
        let generator = TerrainGenerator::new(small_config()).unwrap();
        let terrain = generator.generate().unwrap();
        let types = &generator.config().terrain_types;
        for (i, &h) in terrain.height_field.values().iter().enumerate() {
            assert_eq!(terrain.texture.pixels[i], classify(h, types).unwrap().color);
        }
    }

    #[test]
    fn test_configured_seed_is_reproducible() {
        let generator = TerrainGenerator::new(small_config()).unwrap();
        let a = generator.generate().unwrap();
        let b = generator.generate().unwrap();
        assert_eq!(a.offsets, b.offsets);
        assert_eq!(a.height_field, b.height_field);
        assert_eq!(a.mesh, b.mesh);
    }

    #[test]
    fn test_unseeded_passes_differ() {
        let config = GenerationConfig {
            seed: None,
            ..small_config()
        };
        let generator = TerrainGenerator::new(config).unwrap();
        let a = generator.generate().unwrap();
        let b = generator.generate().unwrap();
        assert_ne!(a.height_field, b.height_field);
    }

    #[test]
    fn test_fixed_offsets_reproduce_pass() {
        let generator = TerrainGenerator::new(small_config()).unwrap();
        let first = generator.generate().unwrap();
        let replay = generator.generate_with_offsets(first.offsets.clone()).unwrap();
        assert_eq!(first.height_field, replay.height_field);
        assert_eq!(first.texture, replay.texture);
    }

    #[test]
    fn test_mesh_heights_follow_response_curve() {
        let config = GenerationConfig {
            max_height: 3.0,
            response_curve: relief_terrain::KeyframeCurve::linear(&[(0.0, 0.0), (10.0, 10.0)]),
            ..small_config()
        };
        let generator = TerrainGenerator::new(config).unwrap();
        let offsets = OctaveOffsets::from_vec(vec![Vec2::new(3.0, -8.0); 4]);
        let terrain = generator.generate_with_offsets(offsets).unwrap();
        let expected = build_mesh(&terrain.height_field, &IdentityCurve, 3.0, 12, 12).unwrap();
        for (got, want) in terrain.mesh.vertices.iter().zip(&expected.vertices) {
            assert!((got.y - want.y).abs() < 1e-4, "{got} vs {want}");
        }
    }

    #[test]
    fn test_generate_into_replaces_previous_output() {
        let generator = TerrainGenerator::new(small_config()).unwrap();
        let mut surface = MemorySurface::new();
        generator.generate_into(&mut surface).unwrap();
        generator.generate_into(&mut surface).unwrap();
        assert_eq!(surface.mesh_updates(), 2);
        assert_eq!(surface.texture_updates(), 2);
        assert_eq!(surface.mesh().unwrap().vertex_count(), 13 * 13);
        assert_eq!(surface.texture().unwrap().dimensions(), (13, 13));
    }

    #[test]
    fn test_empty_terrain_table_is_rejected() {
        let config = GenerationConfig {
            terrain_types: Vec::new(),
            ..small_config()
        };
        assert_eq!(config_error(config), ConfigurationError::EmptyTerrainTable);
    }

    #[test]
    fn test_zero_grid_is_rejected() {
        let config = GenerationConfig {
            grid_depth: 0,
            ..small_config()
        };
        assert_eq!(
            config_error(config),
            ConfigurationError::EmptyGrid {
                width: 12,
                depth: 0
            }
        );
    }

    #[test]
    fn test_non_square_grid_is_rejected() {
        let config = GenerationConfig {
            grid_width: 8,
            grid_depth: 2,
            ..small_config()
        };
        assert_eq!(
            config_error(config),
            ConfigurationError::NonSquareGrid { width: 8, depth: 2 }
        );
    }

    #[test]
    fn test_failed_publish_leaves_surface_untouched() {
        let generator = TerrainGenerator::new(small_config()).unwrap();
        let mut surface = RefusingSurface::default();
        let err = generator.generate_into(&mut surface).unwrap_err();
        assert!(matches!(err, GenerationError::Publish(_)));
        assert!(surface.inner.mesh().is_none());
        assert!(surface.inner.texture().is_none());
    }

    #[test]
    fn test_parameter_ranges_are_enforced() {
        let zero_octaves = GenerationConfig {
            octave_count: 0,
            ..small_config()
        };
        assert_eq!(config_error(zero_octaves), ConfigurationError::OctaveCount(0));

        let many_octaves = GenerationConfig {
            octave_count: 11,
            ..small_config()
        };
        assert_eq!(config_error(many_octaves), ConfigurationError::OctaveCount(11));

        let persistence = GenerationConfig {
            persistence: 1.5,
            ..small_config()
        };
        assert_eq!(config_error(persistence), ConfigurationError::Persistence(1.5));

        let lacunarity = GenerationConfig {
            lacunarity: -0.5,
            ..small_config()
        };
        assert_eq!(config_error(lacunarity), ConfigurationError::Lacunarity(-0.5));
    }

    #[test]
    fn test_non_finite_scale_is_rejected() {
        let config = GenerationConfig {
            noise_scale: f32::INFINITY,
            ..small_config()
        };
        assert!(matches!(
            config_error(config),
            ConfigurationError::NonFinite {
                name: "noise_scale",
                ..
            }
        ));
    }

    #[test]
    fn test_range_boundaries_are_accepted() {
        let config = GenerationConfig {
            octave_count: 10,
            persistence: 0.0,
            lacunarity: 4.0,
            terrain_types: vec![TerrainType::new("flat", 1.0, Rgb::new(1, 2, 3))],
            ..small_config()
        };
        let generator = TerrainGenerator::new(config).unwrap();
        assert_eq!(generator.terrain_table().len(), 1);
        let terrain = generator.generate().unwrap();
        assert!(terrain.texture.pixels.iter().all(|&p| p == Rgb::new(1, 2, 3)));
    }
}
