/// Error types for mesh loading and validation
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors raised while reading or constructing a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recognised record contains a malformed token.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Loading a file failed; carries the path of the offending file.
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: Box<MeshError>,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidVertexIndex {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    /// A face corner references a normal that does not exist.
    #[error("face {face} references normal {index}, but the mesh has {normal_count} normals")]
    InvalidNormalIndex {
        face: usize,
        index: usize,
        normal_count: usize,
    },
}

impl MeshError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        MeshError::Parse {
            line,
            message: message.into(),
        }
    }
}
