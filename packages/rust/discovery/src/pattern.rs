//! Filename glob patterns.

use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

use mdtoolkit_shared::{MdToolkitError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled shell glob such as `*.md` or `notes/**/*.md`.
///
/// Patterns without a `/` are matched against the file name only, so `*.md`
/// selects Markdown files at any depth of a recursive walk. Patterns with a
/// `/` are matched against the `/`-separated path relative to the root.
#[derive(Debug, Clone)]
pub struct FilePattern {
    raw: String,
    compiled: Pattern,
    match_relative_path: bool,
}

impl FilePattern {
    pub fn new(raw: &str) -> Result<Self> {
        let compiled = Pattern::new(raw).map_err(|e| MdToolkitError::InvalidPattern {
            pattern: raw.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            raw: raw.to_string(),
            compiled,
            match_relative_path: raw.contains('/'),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether matching files can live below the root, i.e. the pattern
    /// names a path (`guide/*.md`) or a recursive wildcard (`**`).
    pub fn descends(&self) -> bool {
        self.match_relative_path || self.raw.contains("**")
    }

    /// Test a root-relative path against the pattern.
    pub fn matches(&self, relative: &Path) -> bool {
        if self.match_relative_path {
            return self
                .compiled
                .matches_with(&slash_path(relative), MATCH_OPTIONS);
        }
        relative
            .file_name()
            .is_some_and(|name| self.compiled.matches_with(&name.to_string_lossy(), MATCH_OPTIONS))
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_pattern_ignores_directories() {
        let pattern = FilePattern::new("*.md").unwrap();
        assert!(pattern.matches(Path::new("a.md")));
        assert!(pattern.matches(Path::new("nested/deeper/b.md")));
        assert!(!pattern.matches(Path::new("c.markdown")));
        assert!(!pattern.descends());
    }

    #[test]
    fn path_pattern_respects_separators() {
        let pattern = FilePattern::new("guide/*.md").unwrap();
        assert!(pattern.matches(Path::new("guide/intro.md")));
        assert!(!pattern.matches(Path::new("guide/deep/intro.md")));
        assert!(!pattern.matches(Path::new("intro.md")));
        assert!(pattern.descends());
    }

    #[test]
    fn double_star_descends() {
        let pattern = FilePattern::new("**/*.md").unwrap();
        assert!(pattern.descends());
        assert!(pattern.matches(Path::new("a/b/c.md")));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = FilePattern::new("[md").unwrap_err();
        assert!(matches!(err, MdToolkitError::InvalidPattern { .. }));
        assert!(err.to_string().contains("[md"));
    }
}
