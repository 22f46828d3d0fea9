//! Grid mesh construction from a height field.
//!
//! The grid has `(width + 1) * (depth + 1)` vertices laid out row by row along
//! +Z, each row running along +X. Every grid cell becomes a quad of two
//! triangles.
//!
//! ## Height lookup
//!
//! Vertex `(x, y)` reads its height from field cell `(row = x, col = y)`, the
//! transpose of the field's `(z, x)` generation order. UVs follow the same
//! transposed convention, `(y / depth, x / width)`. Vertex positions are not
//! transposed. The mapping is isolated in [`vertex_field_cell`]; changing it
//! rotates the terrain relative to its texture. Because of the transpose the
//! field needs at least `width + 1` rows and `depth + 1` columns, which a field
//! generated for the same grid only has when the grid is square.

use glam::{Vec2, Vec3};
use relief_terrain::{HeightField, ResponseCurve};

use crate::mesh::TerrainMesh;
use crate::normals::recalculate_normals;

/// Errors that can occur when building a terrain mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A zero grid dimension leaves nothing to triangulate and would divide by
    /// zero in the UVs.
    #[error("grid dimensions must be non-zero (width {width}, depth {depth})")]
    EmptyGrid {
        /// Grid width in cells.
        width: u32,
        /// Grid depth in cells.
        depth: u32,
    },

    /// The transposed lookup would read past the height field.
    #[error(
        "height field is {rows}x{cols} but the grid reads {required_rows}x{required_cols} cells"
    )]
    FieldTooSmall {
        /// Field rows.
        rows: usize,
        /// Field columns.
        cols: usize,
        /// Rows read by the grid (`width + 1`).
        required_rows: usize,
        /// Columns read by the grid (`depth + 1`).
        required_cols: usize,
    },
}

/// Height field cell `(row, col)` read by grid vertex `(x, y)`.
///
/// The vertex column selects the field row and the vertex row selects the
/// field column.
#[inline]
pub fn vertex_field_cell(x: usize, y: usize) -> (usize, usize) {
    (x, y)
}

/// Build a terrain mesh from `field`.
///
/// Vertex `(x, y)` sits at `(x, curve(h) * max_height, y)` where `h` is the
/// height at [`vertex_field_cell`]. Quad `(x, y)` with lower-left vertex `vi`
/// emits triangles `(vi, vi + w + 1, vi + 1)` and `(vi + 1, vi + w + 1,
/// vi + w + 2)`. Normals are recalculated from the finished triangles.
///
/// # Errors
///
/// Returns [`MeshError::EmptyGrid`] if `width` or `depth` is zero and
/// [`MeshError::FieldTooSmall`] if the transposed lookup would overrun the
/// field. Both are checked before any buffer is allocated.
pub fn build_mesh(
    field: &HeightField,
    curve: &impl ResponseCurve,
    max_height: f32,
    width: u32,
    depth: u32,
) -> Result<TerrainMesh, MeshError> {
    if width == 0 || depth == 0 {
        return Err(MeshError::EmptyGrid { width, depth });
    }
    let w = width as usize;
    let d = depth as usize;
    if field.rows() <= w || field.cols() <= d {
        return Err(MeshError::FieldTooSmall {
            rows: field.rows(),
            cols: field.cols(),
            required_rows: w + 1,
            required_cols: d + 1,
        });
    }
    let vertex_count = (w + 1) * (d + 1);

    let mut vertices = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for y in 0..=d {
        for x in 0..=w {
            let (row, col) = vertex_field_cell(x, y);
            let height = curve.evaluate(field.get(row, col)) * max_height;
            vertices.push(Vec3::new(x as f32, height, y as f32));
            uvs.push(Vec2::new(y as f32 / depth as f32, x as f32 / width as f32));
        }
    }

    let mut indices = vec![0u32; w * d * 6];
    let row_stride = width + 1;
    let mut ti = 0;
    let mut vi = 0u32;
    for _ in 0..d {
        for _ in 0..w {
            indices[ti] = vi;
            indices[ti + 1] = vi + row_stride;
            indices[ti + 2] = vi + 1;
            indices[ti + 3] = vi + 1;
            indices[ti + 4] = vi + row_stride;
            indices[ti + 5] = vi + row_stride + 1;
            ti += 6;
            vi += 1;
        }
        // Skip the last vertex of the row; it only closes the final quad.
        vi += 1;
    }

    let normals = recalculate_normals(&vertices, &indices);

    Ok(TerrainMesh {
        vertices,
        indices,
        uvs,
        normals,
    })
}
