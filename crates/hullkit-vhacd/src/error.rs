//! Error types for the V-HACD backend.

use std::path::PathBuf;

use hullkit_mesh::MeshError;
use thiserror::Error;

/// Result type for V-HACD backend operations.
pub type VhacdResult<T> = Result<T, VhacdError>;

/// Errors that can occur during V-HACD backend operations.
#[derive(Debug, Error)]
pub enum VhacdError {
    /// No executable configured and none found in the environment or PATH.
    #[error("V-HACD executable not found. Set the executable path in the preferences, pass --executable, or set VHACD_PATH")]
    ExecutableNotFound,

    /// The configured executable path does not exist.
    #[error("Cannot find V-HACD executable at specified path: {path}")]
    ExecutableMissing { path: PathBuf },

    /// The data directory does not exist.
    #[error("Invalid data directory: {path}")]
    InvalidDataDir { path: PathBuf },

    /// A decomposition parameter is out of range.
    #[error("Invalid V-HACD parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Failed to spawn the V-HACD process.
    #[error("Failed to spawn V-HACD process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// V-HACD process timed out.
    #[error("V-HACD process timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// V-HACD process exited with non-zero status.
    #[error("V-HACD process exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// V-HACD finished without writing its output mesh.
    #[error("Expected V-HACD output file not found: {path}")]
    OutputNotFound { path: PathBuf },

    /// A requested object is not in the scene.
    #[error("Object '{name}' not found in scene")]
    ObjectNotFound { name: String },

    /// Failed to read a parameter preset file.
    #[error("Failed to read parameter preset {path}: {source}")]
    ReadParamsFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a parameter preset file.
    #[error("Failed to parse parameter preset: {0}")]
    ParseParamsFailed(#[source] serde_json::Error),

    /// Mesh export or import failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VhacdError {
    /// Creates a new process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Creates a new invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            VhacdError::ExecutableNotFound => "VHACD_001",
            VhacdError::ExecutableMissing { .. } => "VHACD_002",
            VhacdError::InvalidDataDir { .. } => "VHACD_003",
            VhacdError::InvalidParameter { .. } => "VHACD_004",
            VhacdError::SpawnFailed(_) => "VHACD_005",
            VhacdError::Timeout { .. } => "VHACD_006",
            VhacdError::ProcessFailed { .. } => "VHACD_007",
            VhacdError::OutputNotFound { .. } => "VHACD_008",
            VhacdError::ObjectNotFound { .. } => "VHACD_009",
            VhacdError::ReadParamsFailed { .. } => "VHACD_010",
            VhacdError::ParseParamsFailed(_) => "VHACD_011",
            VhacdError::Mesh(e) => e.code(),
            VhacdError::Io(_) => "VHACD_012",
        }
    }
}
