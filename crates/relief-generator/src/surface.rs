//! Rendering surfaces that receive generated terrain.

use std::convert::Infallible;

use relief_mesh::TerrainMesh;
use relief_terrain::Texture;

/// Something that displays a terrain mesh with a primary texture.
///
/// Each publish hands over ownership and replaces whatever the surface held
/// before.
pub trait RenderSurface {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Replace the surface's mesh.
    fn set_mesh(&mut self, mesh: TerrainMesh) -> Result<(), Self::Error>;

    /// Replace the primary texture of the surface's material.
    fn set_main_texture(&mut self, texture: Texture) -> Result<(), Self::Error>;

    /// Replace mesh and texture together.
    ///
    /// The default sets the texture first, so a refused texture leaves the
    /// previous mesh and texture in place. A refused mesh after an accepted
    /// texture still leaves the new texture on the old mesh; surfaces that can
    /// stage both should override this.
    fn publish(&mut self, mesh: TerrainMesh, texture: Texture) -> Result<(), Self::Error> {
        self.set_main_texture(texture)?;
        self.set_mesh(mesh)
    }
}

/// Keeps the most recently published mesh and texture in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    mesh: Option<TerrainMesh>,
    texture: Option<Texture>,
    mesh_updates: usize,
    texture_updates: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self) -> Option<&TerrainMesh> {
        self.mesh.as_ref()
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Number of times a mesh has been set.
    pub fn mesh_updates(&self) -> usize {
        self.mesh_updates
    }

    /// Number of times a texture has been set.
    pub fn texture_updates(&self) -> usize {
        self.texture_updates
    }
}

impl RenderSurface for MemorySurface {
    type Error = Infallible;

    fn set_mesh(&mut self, mesh: TerrainMesh) -> Result<(), Self::Error> {
        self.mesh = Some(mesh);
        self.mesh_updates += 1;
        Ok(())
    }

    fn set_main_texture(&mut self, texture: Texture) -> Result<(), Self::Error> {
        self.texture = Some(texture);
        self.texture_updates += 1;
        Ok(())
    }
}
