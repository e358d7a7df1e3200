//! Regions and the inclusion rules that populate them.
//!
//! Inclusion is a pure predicate over `(path, epic_count)`, kept apart from
//! rendering so each rule can be checked on its own.
//!
//! | Mode | Region   | Candidates          | Included when                                      |
//! |------|----------|---------------------|----------------------------------------------------|
//! | Dual | Frontend | path has `client/`  | one epic, or path lacks `client/src/components/ui` |
//! | Dual | Backend  | path has `server/`  | always                                             |
//! | Flat | Files    | every file          | always                                             |
//!
//! In dual mode a path matching neither `client/` nor `server/` belongs to
//! no region and is dropped.

use ctxpack_core::SessionState;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Path fragment that marks client-owned files.
pub const CLIENT_DIR: &str = "client/";

/// Path fragment that marks server-owned files.
pub const SERVER_DIR: &str = "server/";

/// Path fragment of UI primitive components, suppressed with multiple epics.
pub const UI_COMPONENTS_DIR: &str = "client/src/components/ui";

/// A demarcated block of the output.
///
/// Serializes as [`Region::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "frontend_api_files")]
    Frontend,
    #[serde(rename = "backend_files")]
    Backend,
    #[serde(rename = "files")]
    Flat,
}

impl Region {
    /// Stable name used in metadata and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Frontend => "frontend_api_files",
            Self::Backend => "backend_files",
            Self::Flat => "files",
        }
    }

    pub fn start_marker(self) -> &'static str {
        match self {
            Self::Frontend => "---START_OF_FRONTEND_API_FILES---",
            Self::Backend => "---START_OF_BACKEND_FILES---",
            Self::Flat => "---START_OF_FILES---",
        }
    }

    pub fn end_marker(self) -> &'static str {
        match self {
            Self::Frontend => "---END_OF_FRONTEND_API_FILES---",
            Self::Backend => "---END_OF_BACKEND_FILES---",
            Self::Flat => "---END_OF_FILES---",
        }
    }

    /// Whether the path belongs to this region at all, before any
    /// epic-dependent suppression.
    pub fn is_candidate(self, path: &str) -> bool {
        match self {
            Self::Frontend => path.contains(CLIENT_DIR),
            Self::Backend => path.contains(SERVER_DIR),
            Self::Flat => true,
        }
    }

    /// Whether a file at `path` is rendered in this region.
    pub fn admits(self, path: &str, epic_count: NonZeroUsize) -> bool {
        match self {
            Self::Frontend => {
                self.is_candidate(path)
                    && (epic_count.get() == 1 || !path.contains(UI_COMPONENTS_DIR))
            }
            Self::Backend | Self::Flat => self.is_candidate(path),
        }
    }
}

/// Top-level layout, chosen by whether the session has a frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Frontend region followed by backend region.
    Dual,
    /// One region with every file.
    Flat,
}

impl RenderMode {
    pub fn for_state(state: &SessionState) -> Self {
        if state.has_frontend {
            Self::Dual
        } else {
            Self::Flat
        }
    }

    /// Regions emitted by this mode, in output order.
    pub fn regions(self) -> &'static [Region] {
        match self {
            Self::Dual => &[Region::Frontend, Region::Backend],
            Self::Flat => &[Region::Flat],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epics(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    const BUTTON: &str = "client/src/components/ui/Button.tsx";
    const APP: &str = "client/src/App.tsx";

    #[test]
    fn ui_components_kept_with_single_epic() {
        assert!(Region::Frontend.admits(BUTTON, epics(1)));
        assert!(Region::Frontend.admits(APP, epics(1)));
    }

    #[test]
    fn ui_components_suppressed_with_multiple_epics() {
        assert!(!Region::Frontend.admits(BUTTON, epics(2)));
        assert!(!Region::Frontend.admits(BUTTON, epics(7)));
        assert!(Region::Frontend.admits(APP, epics(2)));
    }

    #[test]
    fn frontend_rejects_non_client_paths() {
        assert!(!Region::Frontend.admits("server/index.js", epics(1)));
        assert!(!Region::Frontend.admits("src/components/ui/Button.tsx", epics(1)));
    }

    #[test]
    fn backend_admits_any_server_path() {
        assert!(Region::Backend.admits("server/index.js", epics(1)));
        assert!(Region::Backend.admits("server/routes/api.js", epics(3)));
        assert!(Region::Backend.admits("apps/server/db.ts", epics(3)));
        assert!(!Region::Backend.admits(APP, epics(1)));
    }

    #[test]
    fn matching_is_substring_not_prefix() {
        assert!(Region::Frontend.is_candidate("packages/client/index.ts"));
        assert!(Region::Frontend.is_candidate("webclient/main.ts"));
        assert!(!Region::Frontend.is_candidate("client.ts"));
    }

    #[test]
    fn shared_paths_belong_to_no_dual_region() {
        for region in RenderMode::Dual.regions() {
            assert!(!region.admits("shared/utils.ts", epics(1)));
        }
    }

    #[test]
    fn flat_admits_everything() {
        assert!(Region::Flat.admits("shared/utils.ts", epics(4)));
        assert!(Region::Flat.admits(BUTTON, epics(4)));
        assert!(Region::Flat.admits("", epics(1)));
    }

    #[test]
    fn mode_follows_frontend_flag() {
        let dual = SessionState::new(true, epics(1));
        let flat = SessionState::new(false, epics(1));
        assert_eq!(RenderMode::for_state(&dual), RenderMode::Dual);
        assert_eq!(RenderMode::for_state(&flat), RenderMode::Flat);
        assert_eq!(
            RenderMode::Dual.regions(),
            &[Region::Frontend, Region::Backend]
        );
    }

    #[test]
    fn markers_are_distinct() {
        let regions = [Region::Frontend, Region::Backend, Region::Flat];
        for a in regions {
            assert_ne!(a.start_marker(), a.end_marker());
            for b in regions {
                if a != b {
                    assert_ne!(a.start_marker(), b.start_marker());
                }
            }
        }
    }
}
