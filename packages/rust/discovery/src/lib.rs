//! Source file discovery.
//!
//! Enumerates the files under a root directory that match a glob pattern,
//! optionally descending into subdirectories. Results are sorted by path so
//! that grouping and output numbering are reproducible between runs.

mod pattern;

use std::path::Path;

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use mdtoolkit_shared::{DiscoveredFile, MdToolkitError, Result};

pub use pattern::FilePattern;

/// Pattern used by the HTML conversion pipeline.
pub const HTML_PATTERN: &str = "*.html";

// ---------------------------------------------------------------------------
// Discovery options
// ---------------------------------------------------------------------------

/// Configuration for a discovery pass.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Filename glob, e.g. `*.md`.
    pub pattern: String,
}

impl DiscoveryOptions {
    pub fn new(pattern: impl Into<String>, recursive: bool) -> Self {
        Self {
            recursive,
            pattern: pattern.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Discover files under `root` matching `opts.pattern`.
///
/// An empty result is not an error. Entries that cannot be read during the
/// walk are logged and skipped. Symlinks are not followed.
#[instrument(skip_all, fields(root = %root.display(), recursive = opts.recursive, pattern = %opts.pattern))]
pub fn discover(root: &Path, opts: &DiscoveryOptions) -> Result<Vec<DiscoveredFile>> {
    let pattern = FilePattern::new(&opts.pattern)?;

    if !root.is_dir() {
        return Err(MdToolkitError::invalid_input(root, "a directory"));
    }

    let max_depth = if opts.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if !pattern.matches(relative) {
            continue;
        }

        debug!(path = %entry.path().display(), "matched");
        files.push(DiscoveredFile {
            relative: relative.to_path_buf(),
            path: entry.into_path(),
        });
    }

    files.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));

    debug!(count = files.len(), "discovery complete");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mdt-discovery-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "x").unwrap();
    }

    fn relatives(files: &[DiscoveredFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.relative.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    fn tree() -> PathBuf {
        let root = temp_dir();
        touch(&root, "c.html");
        touch(&root, "a.html");
        touch(&root, "b.md");
        touch(&root, "guide/z.html");
        touch(&root, "guide/deep/y.html");
        root
    }

    #[test]
    fn flat_discovery_only_sees_root() {
        let root = tree();
        let files = discover(&root, &DiscoveryOptions::new(HTML_PATTERN, false)).unwrap();
        assert_eq!(relatives(&files), vec!["a.html", "c.html"]);
        assert_eq!(files[0].path, root.join("a.html"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn recursive_discovery_keeps_relative_paths() {
        let root = tree();
        let files = discover(&root, &DiscoveryOptions::new(HTML_PATTERN, true)).unwrap();
        assert_eq!(
            relatives(&files),
            vec!["a.html", "c.html", "guide/deep/y.html", "guide/z.html"]
        );
        assert_eq!(files[2].relative_dir(), Path::new("guide").join("deep"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn discovery_is_deterministic() {
        let root = tree();
        for recursive in [false, true] {
            let opts = DiscoveryOptions::new(HTML_PATTERN, recursive);
            let first = discover(&root, &opts).unwrap();
            let second = discover(&root, &opts).unwrap();
            assert_eq!(first, second);
        }

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let root = temp_dir();
        touch(&root, "notes.txt");
        let files = discover(&root, &DiscoveryOptions::new("*.md", true)).unwrap();
        assert!(files.is_empty());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn directories_matching_pattern_are_skipped() {
        let root = temp_dir();
        std::fs::create_dir_all(root.join("archive.md")).unwrap();
        touch(&root, "real.md");
        let files = discover(&root, &DiscoveryOptions::new("*.md", false)).unwrap();
        assert_eq!(relatives(&files), vec!["real.md"]);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_root_is_invalid_input() {
        let root = temp_dir().join("does-not-exist");
        let err = discover(&root, &DiscoveryOptions::new("*.md", false)).unwrap_err();
        assert!(matches!(err, MdToolkitError::InvalidInputKind { .. }));
    }

    #[test]
    fn bad_pattern_fails_before_walking() {
        let root = temp_dir();
        let err = discover(&root, &DiscoveryOptions::new("[", false)).unwrap_err();
        assert!(matches!(err, MdToolkitError::InvalidPattern { .. }));

        let _ = std::fs::remove_dir_all(&root);
    }
}
