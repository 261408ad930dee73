//! Core domain types shared by the conversion and merge pipelines.

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// InputMode / WorkRoot
// ---------------------------------------------------------------------------

/// How the user-supplied input path is interpreted, decided once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// A single source file.
    SingleFile(PathBuf),
    /// A directory whose matching files are processed.
    Directory(PathBuf),
}

impl InputMode {
    /// The input path regardless of mode.
    pub fn path(&self) -> &Path {
        match self {
            Self::SingleFile(path) | Self::Directory(path) => path,
        }
    }
}

/// Resolved input mode plus the effective output target.
///
/// In [`InputMode::Directory`] mode `output` is a directory; in
/// [`InputMode::SingleFile`] mode it is the destination file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRoot {
    pub mode: InputMode,
    pub output: PathBuf,
}

// ---------------------------------------------------------------------------
// DiscoveredFile / FileGroup
// ---------------------------------------------------------------------------

/// A source file found under a discovery root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// Path relative to the discovery root (just the file name for a flat walk).
    pub relative: PathBuf,
}

impl DiscoveredFile {
    /// File name without its extension, used for headers and output names.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory part of the relative path (empty for files at the root).
    pub fn relative_dir(&self) -> &Path {
        self.relative.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// An ordered, non-empty bucket of discovered files destined for one output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// 1-based position of the group in the run.
    pub index: usize,
    pub members: Vec<DiscoveredFile>,
}

impl FileGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ConversionUnit
// ---------------------------------------------------------------------------

/// Convert one source file into one destination file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUnit {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Concatenate a group of files into one destination file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupUnit {
    pub group: FileGroup,
    pub destination: PathBuf,
}

/// One indivisible piece of work yielding one output artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionUnit {
    Single(FileUnit),
    Group(GroupUnit),
}

impl ConversionUnit {
    pub fn destination(&self) -> &Path {
        match self {
            Self::Single(unit) => &unit.destination,
            Self::Group(unit) => &unit.destination,
        }
    }
}

impl From<FileUnit> for ConversionUnit {
    fn from(unit: FileUnit) -> Self {
        Self::Single(unit)
    }
}

impl From<GroupUnit> for ConversionUnit {
    fn from(unit: GroupUnit) -> Self {
        Self::Group(unit)
    }
}

impl fmt::Display for ConversionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(unit) => write!(
                f,
                "{} -> {}",
                unit.source.display(),
                unit.destination.display()
            ),
            Self::Group(unit) => write!(
                f,
                "group {} ({} files) -> {}",
                unit.group.index,
                unit.group.len(),
                unit.destination.display()
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// OutcomeTally
// ---------------------------------------------------------------------------

/// Success/failure counts accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub succeeded: usize,
    pub failed: usize,
}

impl OutcomeTally {
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// True when at least one unit failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovered_file_stem_and_dir() {
        let file = DiscoveredFile {
            path: PathBuf::from("/docs/guide/intro.page.html"),
            relative: PathBuf::from("guide/intro.page.html"),
        };
        assert_eq!(file.stem(), "intro.page");
        assert_eq!(file.relative_dir(), Path::new("guide"));

        let flat = DiscoveredFile {
            path: PathBuf::from("/docs/index.html"),
            relative: PathBuf::from("index.html"),
        };
        assert_eq!(flat.relative_dir(), Path::new(""));
    }

    #[test]
    fn tally_counts() {
        let mut tally = OutcomeTally::default();
        tally.record_success();
        tally.record_failure();
        tally.record_success();
        assert_eq!(tally.succeeded, 2);
        assert_eq!(tally.failed, 1);
        assert_eq!(tally.total(), 3);
        assert!(tally.has_failures());
    }

    #[test]
    fn unit_display() {
        let unit = ConversionUnit::from(FileUnit {
            source: PathBuf::from("a.html"),
            destination: PathBuf::from("a.md"),
        });
        assert_eq!(unit.to_string(), "a.html -> a.md");
        assert_eq!(unit.destination(), Path::new("a.md"));

        let group = ConversionUnit::from(GroupUnit {
            group: FileGroup {
                index: 2,
                members: vec![DiscoveredFile {
                    path: PathBuf::from("/in/x.md"),
                    relative: PathBuf::from("x.md"),
                }],
            },
            destination: PathBuf::from("merged_20990101_2.md"),
        });
        assert_eq!(group.to_string(), "group 2 (1 files) -> merged_20990101_2.md");
    }
}
