//! orbit-viewer
//!
//! A minimal model viewer: import a glTF or OBJ file into an owned scene
//! graph, upload its meshes once, and draw it every frame from an orbit camera
//! controlled with the mouse.
//!
//! High-level modules
//! - `camera`: orbit camera, projection, input controller and uniforms
//! - `config`: viewer settings from defaults, a RON file and the command line
//! - `context`: central GPU and window context that owns device/queue/pipeline
//! - `data_structures`: meshes, the scene graph and per-draw transforms
//! - `error`: import failures
//! - `flow`: the winit event loop
//! - `pipelines`: the model render pipeline and its colour uniform
//! - `resources`: model import and mesh post-processing
//! - `render`: scene traversal into draw calls
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;

pub use data_structures::scene_graph::{DrawCommand, Node, Scene};
pub use error::ImportError;
pub use resources::load_scene;
