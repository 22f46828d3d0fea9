//! Terrain mesh data structure holding the vertex, index, UV and normal buffers.

use glam::{Vec2, Vec3};

/// The output of a meshing pass, ready to hand to a renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    /// Vertex positions.
    pub vertices: Vec<Vec3>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
    /// Texture coordinates, parallel to `vertices`.
    pub uvs: Vec<Vec2>,
    /// Per-vertex normals, parallel to `vertices`.
    pub normals: Vec<Vec3>,
}

impl TerrainMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only vertex positions, for debug overlays that mark every vertex.
    pub fn vertex_positions(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}
