//! Viewer data structures: meshes, the scene graph and per-draw data.
//!
//! - `model` contains the vertex format, CPU meshes and their GPU counterparts
//! - `scene_graph` holds the node hierarchy and its traversal
//! - `instance` is the per-draw world transform as stored on the GPU
//! - `texture` wraps the depth buffer

pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
