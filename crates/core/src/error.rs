//! Error types for the ctxpack domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. The assembler itself
//! never fails; errors only arise at the edges where files and session
//! state are loaded from disk.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all ctxpack operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Session state errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Source loading errors ---
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Session has no epics; at least one epic is required")]
    NoEpics,

    #[error("Invalid session manifest at {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Path traversal detected in '{path}'")]
    PathTraversal { path: String },

    #[error("Path '{path}' must be relative to the project root")]
    AbsolutePath { path: String },

    #[error("Failed to read '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("File '{path}' is {size} bytes, limit is {limit}")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("File '{path}' is not valid UTF-8")]
    NotUtf8 { path: String },
}
