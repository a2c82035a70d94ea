//! Scene graph and its traversal.
//!
//! A [`Scene`] owns a flat list of meshes and a tree of [`Node`]s. Nodes refer
//! to meshes by index, so one mesh can be drawn from several places in the
//! hierarchy. Children are owned by their parent, which rules out cycles.

use std::path::Path;

use cgmath::SquareMatrix;

use crate::{data_structures::model::Mesh, error::ImportError, resources};

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub name: String,
    /// Transform relative to the parent node.
    pub transform: cgmath::Matrix4<f32>,
    pub mesh_indices: Vec<usize>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>, transform: cgmath::Matrix4<f32>) -> Self {
        Self {
            name: name.into(),
            transform,
            mesh_indices: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_meshes(mut self, mesh_indices: Vec<usize>) -> Self {
        self.mesh_indices = mesh_indices;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /**
     * Depth-first, pre-order walk of this subtree.
     *
     * `visit` is called with every node and its world transform, i.e.
     * `parent_world * node.transform`. Children are visited in list order, so
     * the whole subtree of a child is done before its next sibling starts.
     */
    pub fn traverse<F>(&self, parent_world: &cgmath::Matrix4<f32>, visit: &mut F)
    where
        F: FnMut(&Node, &cgmath::Matrix4<f32>),
    {
        let world = parent_world * self.transform;
        visit(self, &world);
        for child in &self.children {
            child.traverse(&world, visit);
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Number of mesh references in this subtree, i.e. draws per frame.
    pub fn mesh_reference_count(&self) -> usize {
        self.mesh_indices.len()
            + self
                .children
                .iter()
                .map(Node::mesh_reference_count)
                .sum::<usize>()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("root", cgmath::Matrix4::identity())
    }
}

/// One draw issued by the renderer: which mesh, and where.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub mesh: usize,
    pub world: cgmath::Matrix4<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub root: Node,
}

impl Scene {
    pub fn new(meshes: Vec<Mesh>, root: Node) -> Self {
        Self { meshes, root }
    }

    /// Import `path` and replace `self` with it.
    ///
    /// On failure `self` is left exactly as it was.
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<(), ImportError> {
        *self = resources::load_scene(path)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn draw_count(&self) -> usize {
        self.root.mesh_reference_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// Check that every node only references meshes that exist.
    pub fn validate(&self) -> Result<(), ImportError> {
        let count = self.meshes.len();
        let mut invalid = None;
        self.root.traverse(&cgmath::Matrix4::identity(), &mut |node, _| {
            if invalid.is_some() {
                return;
            }
            if let Some(&index) = node.mesh_indices.iter().find(|&&i| i >= count) {
                invalid = Some(ImportError::InvalidMeshIndex {
                    node: node.name.clone(),
                    index,
                    count,
                });
            }
        });
        match invalid {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Flatten the tree into draws, in traversal order.
    pub fn draw_list(&self, root_transform: &cgmath::Matrix4<f32>) -> Vec<DrawCommand> {
        let mut draws = Vec::with_capacity(self.draw_count());
        self.collect_draws(root_transform, &mut draws);
        draws
    }

    /// Like [`Scene::draw_list`] but reuses `draws` to avoid a per-frame allocation.
    pub fn collect_draws(&self, root_transform: &cgmath::Matrix4<f32>, draws: &mut Vec<DrawCommand>) {
        draws.clear();
        self.root.traverse(root_transform, &mut |node, world| {
            draws.extend(node.mesh_indices.iter().map(|&mesh| DrawCommand {
                mesh,
                world: *world,
            }));
        });
    }
}
