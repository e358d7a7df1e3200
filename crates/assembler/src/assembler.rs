//! Context assembly: turns relevant files plus session state into one
//! framed text document.
//!
//! Two layouts, chosen by [`SessionState::has_frontend`]:
//!
//! 1. **Dual**: a frontend region (`client/` files, UI primitives dropped
//!    when there is more than one epic) followed by a backend region
//!    (`server/` files). Anything else is left out.
//! 2. **Flat**: a single region with every file, unfiltered.
//!
//! Every included file is rendered as a header line with its path and line
//! count, then its content inside a triple-backtick fence:
//!
//! ~~~text
//! **`server/index.js`** (2 lines of code):
//! ```
//! const app = express();
//! app.listen(3000);
//! ```
//!
//! ~~~
//!
//! # Determinism
//!
//! Assembly is a pure function of the files and the session state. Files
//! keep their input order inside each region; nothing is sorted, merged, or
//! normalized, and no time-dependent data is involved.

use crate::lines;
use crate::region::{CLIENT_DIR, Region, RenderMode};
use ctxpack_core::{FileRecord, SessionState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fence wrapped around each file's content.
pub const FENCE: &str = "```";

// ── Types ─────────────────────────────────────────────────────────────────

/// All inputs required for a single render.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInput<'a> {
    /// Relevant files, in the order they should appear.
    pub files: &'a [FileRecord],
    /// Session flags steering the layout.
    pub state: &'a SessionState,
}

/// The rendered document together with what went into it.
#[derive(Debug, Clone)]
pub struct AssembledContext {
    pub text: String,
    pub metadata: AssemblyMetadata,
}

/// Describes which files landed where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyMetadata {
    pub mode: RenderMode,
    /// Number of input files.
    pub files_total: usize,
    /// Per-region statistics, in output order.
    pub regions: Vec<RegionStats>,
    /// Files that appear in no region.
    pub omitted: Vec<OmittedFile>,
}

/// Statistics for a single region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStats {
    pub region: Region,
    /// Files rendered into the region.
    pub files_included: usize,
    /// Files whose path matched the region before epic-based suppression.
    pub candidates: usize,
    /// Lines rendered across all included files.
    pub lines: usize,
    /// Included paths, in output order.
    pub paths: Vec<String>,
}

impl RegionStats {
    fn empty(region: Region) -> Self {
        Self {
            region,
            files_included: 0,
            candidates: 0,
            lines: 0,
            paths: Vec::new(),
        }
    }
}

/// A file left out of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmittedFile {
    pub path: String,
    pub reason: OmissionReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OmissionReason {
    /// UI primitive under `client/src/components/ui` with more than one epic.
    UiComponentSuppressed,
    /// Neither `client/` nor `server/` in dual mode.
    UnownedPath,
}

impl OmissionReason {
    /// Reason for a dual-mode file that matched no region.
    fn for_unplaced(path: &str) -> Self {
        if path.contains(CLIENT_DIR) {
            Self::UiComponentSuppressed
        } else {
            Self::UnownedPath
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::UiComponentSuppressed => "UI component suppressed (multiple epics)",
            Self::UnownedPath => "neither client/ nor server/",
        }
    }
}

// ── Assembler ─────────────────────────────────────────────────────────────

/// The context assembler. Stateless; create one and reuse it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Render the files and describe the result.
    ///
    /// # Algorithm
    ///
    /// 1. Pick the layout from `has_frontend`
    /// 2. For each region in layout order, emit the start marker, every file
    ///    the region admits (input order), then the end marker
    /// 3. Record files that no region admitted
    pub fn assemble(&self, input: &AssemblyInput<'_>) -> AssembledContext {
        let mode = RenderMode::for_state(input.state);
        let epic_count = input.state.epic_count;

        let content_len: usize = input.files.iter().map(|f| f.content.len()).sum();
        let mut text = String::with_capacity(content_len + 128 * (input.files.len() + 2));
        let mut placed = vec![false; input.files.len()];
        let mut regions = Vec::with_capacity(mode.regions().len());

        for &region in mode.regions() {
            text.push_str(region.start_marker());
            text.push('\n');

            let mut stats = RegionStats::empty(region);
            for (file, placed) in input.files.iter().zip(placed.iter_mut()) {
                if !region.is_candidate(&file.path) {
                    continue;
                }
                stats.candidates += 1;
                if !region.admits(&file.path, epic_count) {
                    continue;
                }

                stats.lines += Self::render_file(&mut text, file);
                stats.files_included += 1;
                stats.paths.push(file.path.clone());
                *placed = true;
            }

            text.push_str(region.end_marker());
            text.push('\n');

            debug!(
                region = region.name(),
                candidates = stats.candidates,
                included = stats.files_included,
                lines = stats.lines,
                "Region assembled"
            );
            regions.push(stats);
        }

        let omitted: Vec<OmittedFile> = input
            .files
            .iter()
            .zip(&placed)
            .filter(|(_, placed)| !**placed)
            .map(|(file, _)| OmittedFile {
                path: file.path.clone(),
                reason: OmissionReason::for_unplaced(&file.path),
            })
            .collect();

        debug!(
            mode = ?mode,
            files = input.files.len(),
            omitted = omitted.len(),
            bytes = text.len(),
            "Context assembled"
        );

        AssembledContext {
            text,
            metadata: AssemblyMetadata {
                mode,
                files_total: input.files.len(),
                regions,
                omitted,
            },
        }
    }

    /// Render only the text.
    pub fn render(&self, files: &[FileRecord], state: &SessionState) -> String {
        self.assemble(&AssemblyInput { files, state }).text
    }

    /// Append one file block and return its line count.
    fn render_file(out: &mut String, file: &FileRecord) -> usize {
        let line_count = lines::line_count(&file.content);

        out.push_str(&format!(
            "**`{}`** ({} lines of code):\n",
            file.path, line_count
        ));
        out.push_str(FENCE);
        out.push('\n');
        out.push_str(&file.content);
        if !file.content.is_empty() && !file.content.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(FENCE);
        out.push_str("\n\n");

        line_count
    }
}

/// Render `files` under `state` with a default assembler.
pub fn render(files: &[FileRecord], state: &SessionState) -> String {
    ContextAssembler::new().render(files, state)
}
