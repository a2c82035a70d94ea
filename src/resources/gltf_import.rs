use std::path::Path;

use cgmath::SquareMatrix;

use crate::{
    data_structures::{
        model::Mesh,
        scene_graph::{Node, Scene},
    },
    error::ImportError,
    resources::postprocess::{Topology, build_mesh},
};

/**
 * Loads `.gltf` and `.glb` files.
 *
 * Every triangle-like primitive becomes its own entry in the flat mesh list.
 * Primitives that yield no triangles are left out. A node that uses a glTF
 * mesh references all entries produced from that mesh's primitives.
 */
pub fn load_gltf(path: &Path, root_name: &str) -> Result<Scene, ImportError> {
    let gltf::Gltf { document, blob } = gltf::Gltf::open(path)?;
    let buffers = gltf::import_buffers(&document, path.parent(), blob)?;

    let mut meshes: Vec<Mesh> = Vec::new();
    // glTF mesh index -> indices into `meshes`
    let mut primitive_map: Vec<Vec<usize>> = Vec::new();
    for mesh in document.meshes() {
        let mesh_name = mesh
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("mesh{}", mesh.index()));
        let mut entries = Vec::new();
        for (primitive_idx, primitive) in mesh.primitives().enumerate() {
            let topology = match primitive.mode() {
                gltf::mesh::Mode::Triangles => Topology::Triangles,
                gltf::mesh::Mode::TriangleStrip => Topology::TriangleStrip,
                gltf::mesh::Mode::TriangleFan => Topology::TriangleFan,
                mode => {
                    log::warn!(
                        "skipping primitive {} of mesh {:?}: {:?} cannot be triangulated",
                        primitive_idx,
                        mesh_name,
                        mode
                    );
                    continue;
                }
            };
            let reader = primitive.reader(|buffer| Some(buffers[buffer.index()].0.as_slice()));
            let positions: Vec<[f32; 3]> = match reader.read_positions() {
                Some(positions) => positions.collect(),
                None => {
                    log::warn!(
                        "skipping primitive {} of mesh {:?}: no positions",
                        primitive_idx,
                        mesh_name
                    );
                    continue;
                }
            };
            let normals = reader.read_normals().map(|normals| normals.collect());
            let indices = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let built = build_mesh(
                format!("{}[{}]", mesh_name, primitive_idx),
                positions,
                normals,
                indices,
                topology,
            );
            if built.indices.is_empty() {
                log::warn!("skipping primitive {} of mesh {:?}: no triangles", primitive_idx, mesh_name);
                continue;
            }
            entries.push(meshes.len());
            meshes.push(built);
        }
        primitive_map.push(entries);
    }

    if meshes.is_empty() {
        return Err(ImportError::NoMeshes(path.to_path_buf()));
    }

    let mut root = Node::new(root_name, cgmath::Matrix4::identity());
    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                root.add_child(to_node(node, &primitive_map));
            }
        }
        None => log::warn!("{:?} defines meshes but no scene", path),
    }

    Ok(Scene::new(meshes, root))
}

fn to_node(node: gltf::Node, primitive_map: &[Vec<usize>]) -> Node {
    let name = node
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("node{}", node.index()));
    // column-major, same as cgmath
    let transform = cgmath::Matrix4::from(node.transform().matrix());
    let mesh_indices = node
        .mesh()
        .map(|mesh| primitive_map[mesh.index()].clone())
        .unwrap_or_default();
    let children = node
        .children()
        .map(|child| to_node(child, primitive_map))
        .collect();

    Node {
        name,
        transform,
        mesh_indices,
        children,
    }
}
