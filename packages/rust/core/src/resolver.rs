//! Input/output path resolution.
//!
//! Decides once per run whether the input is a single file or a directory,
//! fixes the effective output target, and derives per-unit destination paths.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use mdtoolkit_shared::{DiscoveredFile, InputMode, MdToolkitError, Result, WorkRoot};

/// Extension of files accepted by the conversion pipeline in single-file mode.
const HTML_EXTENSION: &str = "html";

/// Extension of every produced Markdown file.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Resolve the work root of the HTML conversion pipeline.
///
/// - Directory input: output is `output` or `<input>/<output_dir_name>`, created if absent.
/// - `.html` file input: output defaults to the input with a `.md` extension. An
///   existing directory (or a path without a file name) receives
///   `<stem>.md`; anything else is the literal destination file.
///
/// Nothing is created when the input is of neither kind.
#[instrument(skip_all, fields(input = %input.display()))]
pub fn resolve_convert_root(
    input: &Path,
    output: Option<&Path>,
    output_dir_name: &str,
) -> Result<WorkRoot> {
    if input.is_dir() {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input.join(output_dir_name));
        ensure_dir(&output)?;
        debug!(output = %output.display(), "directory mode");
        return Ok(WorkRoot {
            mode: InputMode::Directory(input.to_path_buf()),
            output,
        });
    }

    if !(input.is_file() && has_extension(input, HTML_EXTENSION)) {
        return Err(MdToolkitError::invalid_input(
            input,
            "an HTML file or a directory",
        ));
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension(MARKDOWN_EXTENSION));

    let destination = if output.is_dir() || output.file_name().is_none() {
        ensure_dir(&output)?;
        output.join(markdown_file_name(input))
    } else {
        if let Some(parent) = output.parent() {
            ensure_dir(parent)?;
        }
        output
    };

    debug!(output = %destination.display(), "single-file mode");
    Ok(WorkRoot {
        mode: InputMode::SingleFile(input.to_path_buf()),
        output: destination,
    })
}

/// Resolve the work root of the merge pipeline, which only accepts directories.
///
/// A supplied output directory is created if absent; otherwise merged files
/// are written next to their sources.
#[instrument(skip_all, fields(input = %input.display()))]
pub fn resolve_merge_root(input: &Path, output: Option<&Path>) -> Result<WorkRoot> {
    if !input.is_dir() {
        return Err(MdToolkitError::invalid_input(input, "an existing directory"));
    }

    let output = match output {
        Some(dir) => {
            ensure_dir(dir)?;
            dir.to_path_buf()
        }
        None => input.to_path_buf(),
    };

    Ok(WorkRoot {
        mode: InputMode::Directory(input.to_path_buf()),
        output,
    })
}

/// Destination of a converted file, mirroring its position under the input root.
pub fn markdown_destination(output_dir: &Path, file: &DiscoveredFile) -> PathBuf {
    output_dir
        .join(file.relative_dir())
        .join(markdown_file_name(&file.path))
}

/// Destination of a merged group: `{prefix}_{date}_{index}.md`.
pub fn merged_destination(output_dir: &Path, prefix: &str, date: &str, index: usize) -> PathBuf {
    output_dir.join(format!("{prefix}_{date}_{index}.{MARKDOWN_EXTENSION}"))
}

/// Create a directory and its parents; succeeds if it already exists.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| MdToolkitError::io(dir, e))
}

fn markdown_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.{MARKDOWN_EXTENSION}")
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(expected))
}
