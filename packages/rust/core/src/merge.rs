//! Markdown merge pipeline: resolve → discover → group → concatenate → tally.
//!
//! Each group of `group_size` files becomes `{prefix}_{YYYYMMDD}_{index}.md`.
//! Existing files with the same name are overwritten.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, instrument};

use mdtoolkit_discovery::{DiscoveryOptions, FilePattern, discover};
use mdtoolkit_shared::{
    ConversionError, FileGroup, GroupUnit, MdToolkitError, MergeSettings, OutcomeTally, Result,
};

use crate::grouping::group_files;
use crate::pipeline::{ProgressReporter, execute_units};
use crate::resolver::{merged_destination, resolve_merge_root};

/// Configuration for the merge pipeline.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Directory holding the files to merge.
    pub input: PathBuf,
    /// Output directory; defaults to `input`.
    pub output: Option<PathBuf>,
    /// Files per merged output (at least 1).
    pub group_size: usize,
    /// Glob selecting the files to merge. A `/` or `**` makes the walk
    /// descend into subdirectories.
    pub pattern: String,
    /// Separator written between two files.
    pub delimiter: String,
    /// Output file name prefix.
    pub prefix: String,
    /// Write `# <stem>` before each file.
    pub include_header: bool,
    /// Date stamp for output names; today's local date (`YYYYMMDD`) when unset.
    pub date: Option<String>,
}

impl MergeConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self::from_settings(input, &MergeSettings::default())
    }

    pub fn from_settings(input: impl Into<PathBuf>, settings: &MergeSettings) -> Self {
        Self {
            input: input.into(),
            output: None,
            group_size: settings.group_size,
            pattern: settings.pattern.clone(),
            delimiter: settings.delimiter.clone(),
            prefix: settings.prefix.clone(),
            include_header: settings.include_header,
            date: None,
        }
    }
}

/// Result of a merge run.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Number of files matching the pattern.
    pub discovered: usize,
    /// One entry per group.
    pub tally: OutcomeTally,
    /// Merged files written, in group order.
    pub created: Vec<PathBuf>,
}

/// Today's local date as `YYYYMMDD`.
pub fn date_stamp() -> String {
    Local::now().format("%Y%m%d").to_string()
}

/// Run the full merge pipeline.
///
/// Group size and pattern are validated before anything touches the disk.
/// A group that cannot be written is counted as failed and later groups
/// still run.
#[instrument(skip_all, fields(input = %config.input.display(), group_size = config.group_size, pattern = %config.pattern))]
pub fn run_merge(config: &MergeConfig, progress: &dyn ProgressReporter) -> Result<MergeOutcome> {
    if config.group_size < 1 {
        return Err(MdToolkitError::InvalidGroupSize(config.group_size));
    }
    let pattern = FilePattern::new(&config.pattern)?;

    let root = resolve_merge_root(&config.input, config.output.as_deref())?;
    let input_dir = root.mode.path();

    let files = discover(
        input_dir,
        &DiscoveryOptions::new(pattern.as_str(), pattern.descends()),
    )?;
    progress.files_discovered(input_dir, files.len());

    if files.is_empty() {
        info!("no files match the pattern");
        return Ok(MergeOutcome::default());
    }

    let groups = group_files(&files, config.group_size)?;
    let date = config.date.clone().unwrap_or_else(date_stamp);

    let units: Vec<GroupUnit> = groups
        .into_iter()
        .map(|group| {
            let destination =
                merged_destination(&root.output, &config.prefix, &date, group.index);
            GroupUnit { group, destination }
        })
        .collect();

    info!(
        files = files.len(),
        groups = units.len(),
        output = %root.output.display(),
        "merging"
    );

    let execution = execute_units(&units, progress, |unit| {
        merge_group(&unit.group, &unit.destination, config)
    });

    info!(
        succeeded = execution.tally.succeeded,
        failed = execution.tally.failed,
        "merge finished"
    );

    Ok(MergeOutcome {
        discovered: files.len(),
        tally: execution.tally,
        created: execution.produced,
    })
}

/// Concatenate one group into `destination`.
///
/// Members are read as UTF-8 and written verbatim, optionally preceded by a
/// `# <stem>` heading and a blank line. Consecutive members are separated by
/// a blank line, the delimiter, and another blank line. On error the partially
/// written destination is left in place.
pub fn merge_group(
    group: &FileGroup,
    destination: &Path,
    config: &MergeConfig,
) -> std::result::Result<(), ConversionError> {
    let file = File::create(destination).map_err(|e| ConversionError::io(destination, e))?;
    let mut out = BufWriter::new(file);
    let write_err = |e: std::io::Error| ConversionError::io(destination, e);

    let last = group.members.len().saturating_sub(1);
    for (i, member) in group.members.iter().enumerate() {
        if config.include_header {
            write!(out, "# {}\n\n", member.stem()).map_err(write_err)?;
        }

        let content = std::fs::read_to_string(&member.path)
            .map_err(|e| ConversionError::io(&member.path, e))?;
        out.write_all(content.as_bytes()).map_err(write_err)?;

        if i < last {
            write!(out, "\n\n{}\n\n", config.delimiter).map_err(write_err)?;
        }
        debug!(member = %member.path.display(), "appended");
    }

    out.flush().map_err(write_err)
}
