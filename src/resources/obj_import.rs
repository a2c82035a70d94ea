use std::path::Path;

use cgmath::SquareMatrix;

use crate::{
    data_structures::scene_graph::{Node, Scene},
    error::ImportError,
    resources::postprocess::{Topology, build_mesh},
};

/**
 * Loads Wavefront `.obj` files.
 *
 * OBJ has no hierarchy, so the scene is a root with one child per object or
 * group, each drawing its own mesh. Objects without faces are skipped, so a
 * file with no triangles at all fails with [`ImportError::NoMeshes`].
 * Materials are not used by the viewer and a missing `.mtl` file is not an
 * error.
 */
pub fn load_obj(path: &Path, root_name: &str) -> Result<Scene, ImportError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        },
    )?;
    if let Err(e) = materials {
        log::debug!("ignoring materials of {:?}: {}", path, e);
    }

    let mut root = Node::new(root_name, cgmath::Matrix4::identity());
    let mut meshes = Vec::with_capacity(models.len());
    for model in models {
        let mesh = model.mesh;
        let name = model.name;
        let positions: Vec<[f32; 3]> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();
        let normals = if mesh.normals.is_empty() {
            None
        } else {
            Some(
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| [n[0], n[1], n[2]])
                    .collect(),
            )
        };

        let built = build_mesh(name.clone(), positions, normals, mesh.indices, Topology::Triangles);
        // tobj reports a trailing object even for files without faces
        if built.indices.is_empty() {
            log::warn!("skipping object {:?} of {:?}: no triangles", name, path);
            continue;
        }
        root.add_child(Node::new(name, cgmath::Matrix4::identity()).with_meshes(vec![meshes.len()]));
        meshes.push(built);
    }

    if meshes.is_empty() {
        return Err(ImportError::NoMeshes(path.to_path_buf()));
    }

    Ok(Scene::new(meshes, root))
}
