//! Import failures.
//!
//! Loading a model is the only operation the viewer treats as recoverable at
//! the API level: callers get an [`ImportError`] and decide what to do. The
//! binary treats every variant as fatal.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported model format {extension:?} for {path:?}")]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("{0:?} contains no meshes")]
    NoMeshes(PathBuf),
    #[error("node {node:?} references mesh {index}, but the scene only has {count} meshes")]
    InvalidMeshIndex {
        node: String,
        index: usize,
        count: usize,
    },
}
