//! HTML → Markdown pipeline: resolve → discover → plan → convert → tally.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use mdtoolkit_converter::Converter;
use mdtoolkit_discovery::{DiscoveryOptions, HTML_PATTERN, discover};
use mdtoolkit_shared::{
    ConversionError, ConvertSettings, DiscoveredFile, FileUnit, InputMode, OutcomeTally, Result,
    WorkRoot,
};

use crate::pipeline::{ProgressReporter, execute_units};
use crate::resolver::{markdown_destination, resolve_convert_root};

/// Configuration for the conversion pipeline.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Input directory or `.html` file.
    pub input: PathBuf,
    /// Output directory or file; defaults depend on the input kind.
    pub output: Option<PathBuf>,
    /// Descend into subdirectories, mirroring them under the output directory.
    pub recursive: bool,
    /// Name of the default output subdirectory for directory input.
    pub output_dir_name: String,
}

impl ConvertConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self::from_settings(input, &ConvertSettings::default())
    }

    pub fn from_settings(input: impl Into<PathBuf>, settings: &ConvertSettings) -> Self {
        Self {
            input: input.into(),
            output: None,
            recursive: false,
            output_dir_name: settings.output_dir_name.clone(),
        }
    }
}

/// Result of a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOutcome {
    /// Number of HTML files found (1 in single-file mode).
    pub discovered: usize,
    pub tally: OutcomeTally,
    /// Markdown files written successfully, in processing order.
    pub outputs: Vec<PathBuf>,
}

/// Run the full conversion pipeline.
///
/// Fails only on run-level errors (invalid input, unusable output location).
/// Per-file failures, including an unavailable converter, are counted in the
/// returned tally and the remaining files are still attempted.
#[instrument(skip_all, fields(input = %config.input.display(), recursive = config.recursive, converter = converter.name()))]
pub fn run_convert(
    config: &ConvertConfig,
    converter: &dyn Converter,
    progress: &dyn ProgressReporter,
) -> Result<ConvertOutcome> {
    let root = resolve_convert_root(
        &config.input,
        config.output.as_deref(),
        &config.output_dir_name,
    )?;

    let units = plan_units(&root, config.recursive)?;
    progress.files_discovered(root.mode.path(), units.len());

    if units.is_empty() {
        info!("no HTML files found");
        return Ok(ConvertOutcome::default());
    }

    info!(files = units.len(), output = %root.output.display(), "converting");

    let execution = execute_units(&units, progress, |unit| convert_unit(converter, unit));

    info!(
        succeeded = execution.tally.succeeded,
        failed = execution.tally.failed,
        "conversion finished"
    );

    Ok(ConvertOutcome {
        discovered: units.len(),
        tally: execution.tally,
        outputs: execution.produced,
    })
}

/// Map the resolved root to one (source, destination) unit per HTML file.
pub fn plan_units(root: &WorkRoot, recursive: bool) -> Result<Vec<FileUnit>> {
    match &root.mode {
        InputMode::SingleFile(source) => Ok(vec![FileUnit {
            source: source.clone(),
            destination: root.output.clone(),
        }]),
        InputMode::Directory(dir) => {
            let files = discover(dir, &DiscoveryOptions::new(HTML_PATTERN, recursive))?;
            Ok(files
                .iter()
                .map(|file| file_unit(&root.output, file))
                .collect())
        }
    }
}

fn file_unit(output_dir: &Path, file: &DiscoveredFile) -> FileUnit {
    FileUnit {
        source: file.path.clone(),
        destination: markdown_destination(output_dir, file),
    }
}

fn convert_unit(
    converter: &dyn Converter,
    unit: &FileUnit,
) -> std::result::Result<(), ConversionError> {
    // Mirrored subdirectories only exist once a file needs them.
    if let Some(parent) = unit.destination.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConversionError::io(parent, e))?;
    }

    converter.convert(&unit.source, &unit.destination)
}
