//! Wavefront OBJ output.

use std::io::{self, Write};

use crate::mesh::TerrainMesh;

/// Write `mesh` as a Wavefront OBJ with positions, UVs and normals.
///
/// Faces reference all three attributes with the same 1-based index, so the
/// output loads into any OBJ viewer next to the exported texture.
pub fn write_obj<W: Write>(mesh: &TerrainMesh, mut out: W) -> io::Result<()> {
    writeln!(out, "# relief terrain mesh")?;
    writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;

    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(out, "vt {} {}", uv.x, uv.y)?;
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }

    out.flush()
}
