//! Error types for mesh reading, writing and processing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Malformed mesh file content.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A face refers to a vertex that does not exist.
    #[error("Face {face} of '{object}' references vertex {index}, but only {vertex_count} exist")]
    IndexOutOfRange {
        object: String,
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    /// The file extension is not a supported mesh format.
    #[error("Unsupported mesh format for {path} (expected .obj or .off)")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to read a mesh file.
    #[error("Failed to read mesh file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a mesh file.
    #[error("Failed to write mesh file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error on a stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Creates a new parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            MeshError::Parse { .. } => "MESH_001",
            MeshError::IndexOutOfRange { .. } => "MESH_002",
            MeshError::UnsupportedFormat { .. } => "MESH_003",
            MeshError::ReadFailed { .. } => "MESH_004",
            MeshError::WriteFailed { .. } => "MESH_005",
            MeshError::Io(_) => "MESH_006",
        }
    }
}
