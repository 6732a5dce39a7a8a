//! Error types for profile documentation and validation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to load crate from {path}: {reason}")]
    LoadError { path: String, reason: String },

    #[error("Invalid crate structure: {0}")]
    InvalidStructure(String),

    #[error("Crate document has no @graph array")]
    MissingGraph,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
}
