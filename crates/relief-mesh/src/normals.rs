//! Per-vertex normal recalculation from triangle geometry.

use glam::Vec3;

/// Recompute per-vertex normals as the normalized sum of adjacent face normals.
///
/// Face normals are left unnormalized before summing, so larger triangles weigh
/// more. Vertices with no usable adjacent face get `+Y`.
///
/// # Panics
///
/// Panics if an index is out of range for `vertices`.
pub fn recalculate_normals(vertices: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let (v0, v1, v2) = (vertices[i0], vertices[i1], vertices[i2]);
        let face = (v1 - v0).cross(v2 - v0);
        normals[i0] += face;
        normals[i1] += face;
        normals[i2] += face;
    }

    for n in &mut normals {
        *n = n.try_normalize().unwrap_or(Vec3::Y);
    }
    normals
}
