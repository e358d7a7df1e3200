//! Deterministic context assembly for code-aware consumers.
//!
//! Given the files relevant to a task and a little session state, the
//! assembler:
//!
//! 1. **Selects** files per region using pure path predicates
//! 2. **Groups** them into frontend/backend regions, or one flat region
//! 3. **Renders** each file as a path + line-count header and a fenced block
//!
//! Loading files from disk is handled by [`source`]; the assembler itself
//! does no I/O.

pub mod assembler;
pub mod lines;
pub mod region;
pub mod source;

pub use assembler::{
    AssembledContext, AssemblyInput, AssemblyMetadata, ContextAssembler, FENCE, OmissionReason,
    OmittedFile, RegionStats, render,
};
pub use lines::line_count;
pub use region::{Region, RenderMode};
pub use source::{SourceOptions, load_file, load_files};
