use std::path::Path;

use crate::{data_structures::scene_graph::Scene, error::ImportError};

/**
 * This module contains all logic for turning model files into a [`Scene`].
 *
 * The format is picked by file extension. Whatever the format, the result has
 * triangulated faces, normals on every vertex and no duplicate vertices.
 */
pub mod gltf_import;
pub mod obj_import;
pub mod postprocess;

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["gltf", "glb", "obj"];

pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, ImportError> {
    let path = path.as_ref();
    let io_error = |source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = std::fs::metadata(path).map_err(io_error)?;
    if !metadata.is_file() {
        return Err(io_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let root_name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("root");

    let scene = match extension.as_str() {
        "gltf" | "glb" => gltf_import::load_gltf(path, root_name)?,
        "obj" => obj_import::load_obj(path, root_name)?,
        _ => {
            return Err(ImportError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            });
        }
    };
    scene.validate()?;

    log::info!(
        "loaded {:?}: {} meshes, {} nodes, {} triangles",
        path,
        scene.mesh_count(),
        scene.node_count(),
        scene.triangle_count()
    );
    Ok(scene)
}
