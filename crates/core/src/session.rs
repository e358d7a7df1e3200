//! Session state: the small amount of per-request state that steers assembly.
//!
//! The assembler takes an explicit, immutable [`SessionState`]. Callers that
//! track a richer session (epics, relevant file lists) can describe it in a
//! [`SessionManifest`] and derive the state from there.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::debug;

/// Epic source tag that marks a session as having a frontend.
pub const FRONTEND_EPIC_SOURCE: &str = "frontend";

/// Read-only inputs to a single render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Whether the project has a frontend; selects dual-group layout.
    pub has_frontend: bool,

    /// Number of top-level work units in the session. Never zero.
    pub epic_count: NonZeroUsize,
}

impl SessionState {
    pub fn new(has_frontend: bool, epic_count: NonZeroUsize) -> Self {
        Self {
            has_frontend,
            epic_count,
        }
    }

    /// Build a state from a raw epic count, rejecting zero.
    pub fn try_new(has_frontend: bool, epic_count: usize) -> Result<Self, SessionError> {
        let epic_count = NonZeroUsize::new(epic_count).ok_or(SessionError::NoEpics)?;
        Ok(Self::new(has_frontend, epic_count))
    }

    /// True when exactly one epic exists.
    pub fn single_epic(&self) -> bool {
        self.epic_count.get() == 1
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            has_frontend: false,
            epic_count: NonZeroUsize::MIN,
        }
    }
}

/// A top-level unit of work in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
    #[serde(default)]
    pub name: String,

    /// Where the epic came from (e.g. `app`, `frontend`, `feature`).
    #[serde(default)]
    pub source: String,
}

impl Epic {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// On-disk description of a session, as written by an orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionManifest {
    #[serde(default)]
    pub epics: Vec<Epic>,

    /// Project-relative paths of the files relevant to the current task.
    #[serde(default)]
    pub relevant_files: Vec<String>,

    /// Explicit frontend flag. Derived from the epics when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_frontend: Option<bool>,
}

impl SessionManifest {
    /// Load a manifest from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self, SessionError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SessionError::InvalidManifest {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        serde_json::from_str(&content).map_err(|e| SessionError::InvalidManifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Whether the session has a frontend: the explicit flag if set,
    /// otherwise whether any epic originates from the frontend.
    pub fn has_frontend(&self) -> bool {
        self.has_frontend.unwrap_or_else(|| {
            self.epics
                .iter()
                .any(|epic| epic.source == FRONTEND_EPIC_SOURCE)
        })
    }

    /// Derive the render state. Fails when the manifest lists no epics.
    pub fn session_state(&self) -> Result<SessionState, SessionError> {
        let state = SessionState::try_new(self.has_frontend(), self.epics.len())?;
        debug!(
            has_frontend = state.has_frontend,
            epic_count = state.epic_count.get(),
            "Derived session state from manifest"
        );
        Ok(state)
    }
}
