//! File records, the unit of content the assembler renders.

use serde::{Deserialize, Serialize};

/// A single project file handed to the assembler.
///
/// The caller owns the record; the assembler only reads it. The path is
/// kept exactly as supplied (no normalization) because region membership
/// is decided by substring matching on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Project-relative path, `/`-separated.
    pub path: String,

    /// Full text content.
    pub content: String,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}
