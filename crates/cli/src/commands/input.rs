//! Shared inputs for `render` and `inspect`: which files, and under which
//! session state.
//!
//! Precedence: command-line flags, then the session manifest, then
//! defaults (flat layout, one epic).

use clap::Args;
use ctxpack_assembler::{SourceOptions, load_files};
use ctxpack_config::AppConfig;
use ctxpack_core::{FileRecord, SessionManifest, SessionState};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Default, Args)]
pub struct InputArgs {
    /// Files to include, relative to --root (defaults to the manifest's relevant_files)
    pub paths: Vec<String>,

    /// Project root the paths are relative to
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Session manifest (JSON) with epics and relevant files
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Force the frontend/backend layout
    #[arg(long, conflicts_with = "no_frontend")]
    pub frontend: bool,

    /// Force the flat layout
    #[arg(long)]
    pub no_frontend: bool,

    /// Override the epic count
    #[arg(short, long)]
    pub epics: Option<usize>,
}

impl InputArgs {
    /// Load the files and derive the session state.
    pub fn resolve(
        &self,
        config: &AppConfig,
    ) -> Result<(Vec<FileRecord>, SessionState), ctxpack_core::Error> {
        let manifest = match &self.manifest {
            Some(path) => Some(SessionManifest::load_from(path)?),
            None => None,
        };

        let has_frontend = if self.frontend {
            true
        } else if self.no_frontend {
            false
        } else {
            manifest.as_ref().is_some_and(SessionManifest::has_frontend)
        };

        let epic_count = match (self.epics, &manifest) {
            (Some(n), _) => n,
            (None, Some(m)) => m.epics.len(),
            (None, None) => 1,
        };
        let state = SessionState::try_new(has_frontend, epic_count)?;

        let paths: Vec<String> = if !self.paths.is_empty() {
            self.paths.clone()
        } else {
            manifest
                .map(|m| m.relevant_files)
                .unwrap_or_default()
        };

        let files = load_files(&self.root, &paths, &SourceOptions::from(&config.source))?;

        debug!(
            files = files.len(),
            has_frontend = state.has_frontend,
            epic_count = state.epic_count.get(),
            "Resolved render input"
        );
        Ok((files, state))
    }
}
