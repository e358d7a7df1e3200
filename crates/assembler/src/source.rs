//! Source loading: reads relevant files from a project root into
//! [`FileRecord`]s.
//!
//! Paths must be relative to the root and may not climb out of it, either
//! textually (`..`, absolute paths) or through symlinks. The stored path is the caller's path with `\` turned into `/`, so region
//! matching sees the same form on every platform.

use ctxpack_config::SourceConfig;
use ctxpack_core::{FileRecord, SourceError};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Limits applied while reading files.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    pub max_file_bytes: u64,
    /// Skip files that cannot be read, are too large, or are not UTF-8.
    /// Path validation failures are never skipped.
    pub skip_unreadable: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        SourceConfig::default().into()
    }
}

impl From<&SourceConfig> for SourceOptions {
    fn from(config: &SourceConfig) -> Self {
        Self {
            max_file_bytes: config.max_file_bytes,
            skip_unreadable: config.skip_unreadable,
        }
    }
}

impl From<SourceConfig> for SourceOptions {
    fn from(config: SourceConfig) -> Self {
        Self::from(&config)
    }
}

/// Validate a project-relative path and return it `/`-separated.
pub fn validate_relative(path: &str) -> Result<String, SourceError> {
    let normalized = path.replace('\\', "/");

    let as_path = Path::new(&normalized);
    if normalized.starts_with('/') || as_path.is_absolute() || has_drive_prefix(&normalized) {
        return Err(SourceError::AbsolutePath { path: path.into() });
    }

    if as_path
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(SourceError::PathTraversal { path: path.into() });
    }

    Ok(normalized)
}

/// `C:` style prefixes, which are not absolute on Unix but are never
/// project-relative either.
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Resolve `relative` below `root` with symlinks followed, rejecting
/// anything that resolves outside the canonical root.
fn resolve_within(root: &Path, relative: &str) -> Result<PathBuf, SourceError> {
    let read_failed = |e: std::io::Error| SourceError::ReadFailed {
        path: relative.into(),
        reason: e.to_string(),
    };

    let canonical_root = root.canonicalize().map_err(read_failed)?;
    let canonical = root.join(relative).canonicalize().map_err(read_failed)?;

    if !canonical.starts_with(&canonical_root) {
        warn!(
            file = %relative,
            resolved = %canonical.display(),
            "Source path resolves outside the project root"
        );
        return Err(SourceError::PathTraversal {
            path: relative.into(),
        });
    }

    Ok(canonical)
}

/// Read one file below `root`.
pub fn load_file(
    root: &Path,
    path: &str,
    options: &SourceOptions,
) -> Result<FileRecord, SourceError> {
    let relative = validate_relative(path)?;
    let full = resolve_within(root, &relative)?;

    let size = std::fs::metadata(&full)
        .map_err(|e| SourceError::ReadFailed {
            path: relative.clone(),
            reason: e.to_string(),
        })?
        .len();
    if size > options.max_file_bytes {
        return Err(SourceError::TooLarge {
            path: relative,
            size,
            limit: options.max_file_bytes,
        });
    }

    let bytes = std::fs::read(&full).map_err(|e| SourceError::ReadFailed {
        path: relative.clone(),
        reason: e.to_string(),
    })?;
    let content =
        String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8 { path: relative.clone() })?;

    debug!(file = %relative, bytes = size, "Loaded source file");
    Ok(FileRecord::new(relative, content))
}

/// Read `paths` below `root`, keeping their order.
pub fn load_files(
    root: &Path,
    paths: &[String],
    options: &SourceOptions,
) -> Result<Vec<FileRecord>, SourceError> {
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        match load_file(root, path, options) {
            Ok(file) => files.push(file),
            Err(e @ (SourceError::PathTraversal { .. } | SourceError::AbsolutePath { .. })) => {
                return Err(e);
            }
            Err(e) if options.skip_unreadable => {
                warn!(file = %path, error = %e, "Skipping unreadable source file");
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        requested = paths.len(),
        loaded = files.len(),
        root = %root.display(),
        "Source files loaded"
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("client/src")).unwrap();
        std::fs::create_dir_all(dir.path().join("server")).unwrap();
        std::fs::write(dir.path().join("client/src/App.tsx"), "app\n").unwrap();
        std::fs::write(dir.path().join("server/index.js"), "srv\n").unwrap();
        dir
    }

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn relative_paths_accepted() {
        assert_eq!(validate_relative("client/src/App.tsx").unwrap(), "client/src/App.tsx");
        assert_eq!(validate_relative("./server/a.js").unwrap(), "./server/a.js");
    }

    #[test]
    fn backslashes_normalized() {
        assert_eq!(
            validate_relative("client\\src\\App.tsx").unwrap(),
            "client/src/App.tsx"
        );
    }

    #[test]
    fn traversal_rejected() {
        assert!(matches!(
            validate_relative("../etc/passwd"),
            Err(SourceError::PathTraversal { .. })
        ));
        assert!(matches!(
            validate_relative("client/../../secret"),
            Err(SourceError::PathTraversal { .. })
        ));
        assert!(matches!(
            validate_relative("client\\..\\..\\secret"),
            Err(SourceError::PathTraversal { .. })
        ));
    }

    #[test]
    fn absolute_rejected() {
        assert!(matches!(
            validate_relative("/etc/passwd"),
            Err(SourceError::AbsolutePath { .. })
        ));
        assert!(matches!(
            validate_relative("C:\\Windows\\system.ini"),
            Err(SourceError::AbsolutePath { .. })
        ));
    }

    #[test]
    fn dotdot_inside_a_name_is_fine() {
        assert!(validate_relative("client/src/a..b.ts").is_ok());
    }

    #[test]
    fn loads_in_requested_order() {
        let dir = project();
        let files = load_files(
            dir.path(),
            &paths(&["server/index.js", "client/src/App.tsx"]),
            &SourceOptions::default(),
        )
        .unwrap();
        assert_eq!(files[0], FileRecord::new("server/index.js", "srv\n"));
        assert_eq!(files[1], FileRecord::new("client/src/App.tsx", "app\n"));
    }

    #[test]
    fn missing_file_fails_by_default() {
        let dir = project();
        let err = load_files(
            dir.path(),
            &paths(&["server/missing.js"]),
            &SourceOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SourceError::ReadFailed { .. }));
    }

    #[test]
    fn missing_file_skipped_when_configured() {
        let dir = project();
        let options = SourceOptions {
            skip_unreadable: true,
            ..SourceOptions::default()
        };
        let files = load_files(
            dir.path(),
            &paths(&["server/missing.js", "server/index.js"]),
            &options,
        )
        .unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "server/index.js");
    }

    #[test]
    fn traversal_never_skipped() {
        let dir = project();
        let options = SourceOptions {
            skip_unreadable: true,
            ..SourceOptions::default()
        };
        let err = load_files(dir.path(), &paths(&["../outside.txt"]), &options).unwrap_err();
        assert!(matches!(err, SourceError::PathTraversal { .. }));
    }

    #[test]
    fn oversized_file_rejected() {
        let dir = project();
        let options = SourceOptions {
            max_file_bytes: 2,
            skip_unreadable: false,
        };
        let err = load_file(dir.path(), "server/index.js", &options).unwrap_err();
        assert!(matches!(err, SourceError::TooLarge { size: 4, limit: 2, .. }));
    }

    #[test]
    fn binary_file_rejected() {
        let dir = project();
        std::fs::write(dir.path().join("server/logo.png"), [0xff, 0xfe, 0x00]).unwrap();
        let err =
            load_file(dir.path(), "server/logo.png", &SourceOptions::default()).unwrap_err();
        assert!(matches!(err, SourceError::NotUtf8 { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_out_of_root_rejected() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.txt"), "TOP SECRET\n").unwrap();

        let root = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), root.path().join("client")).unwrap();

        let err =
            load_file(root.path(), "client/secret.txt", &SourceOptions::default()).unwrap_err();
        assert!(matches!(err, SourceError::PathTraversal { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escape_never_skipped() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("id_rsa"), "key\n").unwrap();

        let dir = project();
        std::os::unix::fs::symlink(
            outside.path().join("id_rsa"),
            dir.path().join("server/key.js"),
        )
        .unwrap();

        let options = SourceOptions {
            skip_unreadable: true,
            ..SourceOptions::default()
        };
        let err = load_files(
            dir.path(),
            &paths(&["server/index.js", "server/key.js"]),
            &options,
        )
        .unwrap_err();
        assert!(matches!(err, SourceError::PathTraversal { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_inside_root_followed() {
        let dir = project();
        std::os::unix::fs::symlink(
            dir.path().join("server"),
            dir.path().join("client/api"),
        )
        .unwrap();

        let file = load_file(dir.path(), "client/api/index.js", &SourceOptions::default()).unwrap();
        assert_eq!(file, FileRecord::new("client/api/index.js", "srv\n"));
    }

    #[test]
    fn root_given_relatively_still_contains() {
        let dir = project();
        let nested = dir.path().join("server");
        let relative_root = nested.join("..");
        let file = load_file(&relative_root, "client/src/App.tsx", &SourceOptions::default())
            .unwrap();
        assert_eq!(file.content, "app\n");
    }

    #[test]
    fn options_follow_config() {
        let config = SourceConfig {
            max_file_bytes: 10,
            skip_unreadable: true,
        };
        let options = SourceOptions::from(&config);
        assert_eq!(options.max_file_bytes, 10);
        assert!(options.skip_unreadable);
    }
}
