//! A render surface that writes the published terrain to disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use relief_config::Config;
use relief_mesh::{TerrainMesh, write_obj};
use relief_terrain::Texture;
use tracing::{info, warn};

use crate::error::ExportError;
use crate::surface::RenderSurface;

/// Writes the mesh as Wavefront OBJ and the texture as PNG.
///
/// Every publish overwrites the previous files. [`RenderSurface::publish`]
/// writes both to `.partial` siblings first and only renames them into place
/// once both are complete, so a failed publish keeps the previous pair.
#[derive(Clone, Debug)]
pub struct FileSurface {
    mesh_path: PathBuf,
    texture_path: PathBuf,
}

impl FileSurface {
    pub fn new(mesh_path: impl Into<PathBuf>, texture_path: impl Into<PathBuf>) -> Self {
        Self {
            mesh_path: mesh_path.into(),
            texture_path: texture_path.into(),
        }
    }

    /// Surface writing to the paths named in `config.output`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mesh_path(), config.texture_path())
    }

    pub fn mesh_path(&self) -> &Path {
        &self.mesh_path
    }

    pub fn texture_path(&self) -> &Path {
        &self.texture_path
    }
}

/// `terrain.obj` -> `terrain.obj.partial`, next to the target.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn write_mesh(mesh: &TerrainMesh, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    write_obj(mesh, BufWriter::new(file)).map_err(io_err)
}

fn write_texture(texture: &Texture, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;
    texture
        .to_rgb_image()
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| ExportError::Image {
            path: path.to_path_buf(),
            source,
        })
}

fn rename(from: &Path, to: &Path) -> Result<(), ExportError> {
    std::fs::rename(from, to).map_err(|source| ExportError::Io {
        path: to.to_path_buf(),
        source,
    })
}

fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

impl RenderSurface for FileSurface {
    type Error = ExportError;

    fn set_mesh(&mut self, mesh: TerrainMesh) -> Result<(), Self::Error> {
        write_mesh(&mesh, &self.mesh_path)?;
        info!(path = %self.mesh_path.display(), "mesh written");
        Ok(())
    }

    fn set_main_texture(&mut self, texture: Texture) -> Result<(), Self::Error> {
        write_texture(&texture, &self.texture_path)?;
        info!(path = %self.texture_path.display(), "texture written");
        Ok(())
    }

    fn publish(&mut self, mesh: TerrainMesh, texture: Texture) -> Result<(), Self::Error> {
        let staged_mesh = staging_path(&self.mesh_path);
        let staged_texture = staging_path(&self.texture_path);

        let staged = write_mesh(&mesh, &staged_mesh)
            .and_then(|()| write_texture(&texture, &staged_texture));
        if let Err(e) = staged {
            let _ = std::fs::remove_file(&staged_mesh);
            let _ = std::fs::remove_file(&staged_texture);
            warn!(error = %e, "publish aborted, previous output kept");
            return Err(e);
        }

        // Both files are complete here; only the renames can still fail.
        rename(&staged_texture, &self.texture_path)?;
        rename(&staged_mesh, &self.mesh_path)?;
        info!(
            mesh = %self.mesh_path.display(),
            texture = %self.texture_path.display(),
            "terrain published"
        );
        Ok(())
    }
}
