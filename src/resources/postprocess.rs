//! Mesh clean-up applied to every imported mesh.
//!
//! The steps run in a fixed order: triangulate, generate flat normals when the
//! source has none, then join identical vertices. There are no switches; every
//! importer gets the same treatment.

use std::collections::HashMap;

use cgmath::InnerSpace;

use crate::data_structures::model::{Mesh, ModelVertex};

/// How an index list is to be read before triangulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Turn `indices` into a plain triangle list.
///
/// Strips alternate their winding so every triangle faces the same way. A
/// triangle list whose length is not a multiple of three loses its tail.
pub fn triangulate(topology: Topology, indices: &[u32]) -> Vec<u32> {
    match topology {
        Topology::Triangles => {
            let whole = indices.len() - indices.len() % 3;
            if whole != indices.len() {
                log::warn!(
                    "dropping {} trailing indices that do not form a triangle",
                    indices.len() - whole
                );
            }
            indices[..whole].to_vec()
        }
        Topology::TriangleStrip => indices
            .windows(3)
            .enumerate()
            .flat_map(|(i, w)| {
                if i % 2 == 0 {
                    [w[0], w[1], w[2]]
                } else {
                    [w[0], w[2], w[1]]
                }
            })
            .collect(),
        Topology::TriangleFan => match indices.split_first() {
            Some((&center, rest)) => rest
                .windows(2)
                .flat_map(|w| [center, w[0], w[1]])
                .collect(),
            None => Vec::new(),
        },
    }
}

/// Give every face its own three vertices, all carrying the face normal.
///
/// Degenerate faces get a zero normal.
pub fn generate_flat_normals(positions: &[[f32; 3]], indices: &[u32]) -> (Vec<ModelVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(indices.len());
    for face in indices.chunks_exact(3) {
        let p0: cgmath::Vector3<f32> = positions[face[0] as usize].into();
        let p1: cgmath::Vector3<f32> = positions[face[1] as usize].into();
        let p2: cgmath::Vector3<f32> = positions[face[2] as usize].into();
        let cross = (p1 - p0).cross(p2 - p0);
        let normal = if cross.magnitude2() > 0.0 {
            cross.normalize()
        } else {
            cgmath::Vector3::new(0.0, 0.0, 0.0)
        };
        for p in [p0, p1, p2] {
            vertices.push(ModelVertex::new(p.into(), normal.into()));
        }
    }
    let indices = (0..vertices.len() as u32).collect();
    (vertices, indices)
}

// -0.0 and 0.0 compare equal but have different bits
fn vertex_key(vertex: &ModelVertex) -> [u32; 6] {
    let p = vertex.position;
    let n = vertex.normal;
    [p[0], p[1], p[2], n[0], n[1], n[2]].map(|f| (f + 0.0).to_bits())
}

/// Merge vertices with identical position and normal and rewrite `indices`.
///
/// Surviving vertices keep the order of their first occurrence in `vertices`.
/// Vertices that no index refers to are dropped.
pub fn join_identical_vertices(vertices: &[ModelVertex], indices: &[u32]) -> (Vec<ModelVertex>, Vec<u32>) {
    let mut unique: Vec<ModelVertex> = Vec::with_capacity(vertices.len());
    let mut seen: HashMap<[u32; 6], u32> = HashMap::with_capacity(vertices.len());
    let mut remap: Vec<Option<u32>> = vec![None; vertices.len()];

    let mut joined = Vec::with_capacity(indices.len());
    for &index in indices {
        let slot = &mut remap[index as usize];
        let new_index = match slot {
            Some(new_index) => *new_index,
            None => {
                let vertex = vertices[index as usize];
                let new_index = *seen.entry(vertex_key(&vertex)).or_insert_with(|| {
                    unique.push(vertex);
                    unique.len() as u32 - 1
                });
                *slot = Some(new_index);
                new_index
            }
        };
        joined.push(new_index);
    }
    (unique, joined)
}

/**
 * Build a clean [`Mesh`] from raw importer output.
 *
 * `normals` is ignored unless it has one entry per position. Triangles that
 * reference a vertex past the end of `positions` are dropped.
 */
pub fn build_mesh(
    name: impl Into<String>,
    positions: Vec<[f32; 3]>,
    normals: Option<Vec<[f32; 3]>>,
    indices: Vec<u32>,
    topology: Topology,
) -> Mesh {
    let name = name.into();
    let triangles = triangulate(topology, &indices);

    let vertex_count = positions.len() as u32;
    let in_range: Vec<u32> = triangles
        .chunks_exact(3)
        .filter(|face| face.iter().all(|&i| i < vertex_count))
        .flatten()
        .copied()
        .collect();
    if in_range.len() != triangles.len() {
        log::warn!(
            "mesh {:?}: dropped {} triangles with out of range indices",
            name,
            (triangles.len() - in_range.len()) / 3
        );
    }

    let (vertices, indices) = match normals {
        Some(normals) if normals.len() == positions.len() => {
            let vertices: Vec<ModelVertex> = positions
                .into_iter()
                .zip(normals)
                .map(|(position, normal)| ModelVertex::new(position, normal))
                .collect();
            (vertices, in_range)
        }
        normals => {
            if let Some(normals) = normals {
                log::warn!(
                    "mesh {:?}: {} normals for {} positions, regenerating",
                    name,
                    normals.len(),
                    positions.len()
                );
            }
            generate_flat_normals(&positions, &in_range)
        }
    };

    let (vertices, indices) = join_identical_vertices(&vertices, &indices);
    Mesh {
        name,
        vertices,
        indices,
    }
}
