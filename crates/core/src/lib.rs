//! # ctxpack Core
//!
//! Domain types and error definitions for the ctxpack context assembler.
//! This crate has **no framework dependencies**. It defines the domain model
//! the assembler, configuration, and CLI crates are written against.

pub mod error;
pub mod file;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result, SessionError, SourceError};
pub use file::FileRecord;
pub use session::{Epic, SessionManifest, SessionState};
