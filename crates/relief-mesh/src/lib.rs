//! Height field meshing: vertex/index/UV buffer construction, normal recalculation,
//! and Wavefront OBJ output.

pub mod builder;
pub mod mesh;
pub mod normals;
pub mod obj;

pub use builder::{MeshError, build_mesh, vertex_field_cell};
pub use mesh::TerrainMesh;
pub use normals::recalculate_normals;
pub use obj::write_obj;
