//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use mdtoolkit_converter::{BuiltinConverter, Converter, ExternalConverter};
use mdtoolkit_core::convert::{ConvertConfig, run_convert};
use mdtoolkit_core::merge::{MergeConfig, run_merge};
use mdtoolkit_core::report::Summary;
use mdtoolkit_shared::{
    AppConfig, ConverterBackend, OutcomeTally, init_config, load_config, load_config_from,
};
use tracing::info;

use crate::progress::CliProgress;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// HTML to Markdown conversion and Markdown merging.
#[derive(Parser)]
#[command(
    name = "mdtoolkit",
    version,
    about = "Batch-convert HTML to Markdown and merge Markdown files into fixed-size bundles.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.mdtoolkit/mdtoolkit.toml.
    #[arg(long, global = true, env = "MDTOOLKIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert an HTML file, or every HTML file in a directory, to Markdown.
    Convert {
        /// Input directory or HTML file.
        input: PathBuf,

        /// Output directory or file (defaults to <input>/markdown for directories,
        /// <input>.md for files).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also convert HTML files in subdirectories, mirroring the layout.
        #[arg(short, long)]
        recursive: bool,

        /// External converter executable (defaults to `markitdown`).
        #[arg(long, conflicts_with = "builtin")]
        program: Option<String>,

        /// Convert in-process instead of running an external program.
        #[arg(long)]
        builtin: bool,

        /// Exit with an error status if any file failed.
        #[arg(long)]
        strict: bool,
    },

    /// Merge the Markdown files of a directory, N files per output.
    Merge {
        /// Input directory.
        input: PathBuf,

        /// Output directory (defaults to the input directory).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of files per merged output (default: 10).
        #[arg(short = 'n', long = "group-size")]
        group_size: Option<usize>,

        /// Glob selecting files to merge (default: "*.md").
        #[arg(short, long)]
        pattern: Option<String>,

        /// Separator written between files (default: "___").
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Output file name prefix (default: "merged").
        #[arg(long)]
        prefix: Option<String>,

        /// Precede each file with a `# <name>` heading.
        #[arg(long)]
        header: bool,

        /// Suppress progress messages.
        #[arg(short, long)]
        quiet: bool,

        /// Exit with an error status if any group failed.
        #[arg(long)]
        strict: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "mdtoolkit=error",
        1 => "mdtoolkit=info",
        2 => "mdtoolkit=debug",
        _ => "mdtoolkit=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Convert {
            input,
            output,
            recursive,
            program,
            builtin,
            strict,
        } => {
            let app = app_config(config_path)?;
            let mut config = ConvertConfig::from_settings(input, &app.convert);
            config.output = output;
            config.recursive = recursive;

            let backend = if builtin {
                ConverterBackend::Builtin
            } else {
                app.convert.backend
            };
            let converter: Box<dyn Converter> = match backend {
                ConverterBackend::External => Box::new(ExternalConverter::new(
                    program.unwrap_or(app.convert.program),
                    app.convert.output_flag,
                )),
                ConverterBackend::Builtin => Box::new(BuiltinConverter),
            };

            cmd_convert(&config, converter.as_ref(), strict)
        }
        Command::Merge {
            input,
            output,
            group_size,
            pattern,
            delimiter,
            prefix,
            header,
            quiet,
            strict,
        } => {
            let app = app_config(config_path)?;
            let mut config = MergeConfig::from_settings(input, &app.merge);
            config.output = output;
            if let Some(n) = group_size {
                config.group_size = n;
            }
            if let Some(pattern) = pattern {
                config.pattern = pattern;
            }
            if let Some(delimiter) = delimiter {
                config.delimiter = delimiter;
            }
            if let Some(prefix) = prefix {
                config.prefix = prefix;
            }
            config.include_header |= header;

            cmd_merge(&config, quiet, strict)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn app_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_convert(config: &ConvertConfig, converter: &dyn Converter, strict: bool) -> Result<()> {
    info!(
        input = %config.input.display(),
        recursive = config.recursive,
        converter = converter.name(),
        "converting HTML to Markdown"
    );

    let progress = CliProgress::new(false);
    let outcome = run_convert(config, converter, &progress)?;

    println!();
    println!("{}", Summary::new(outcome.tally, "files"));

    check_strict(strict, &outcome.tally)
}

fn cmd_merge(config: &MergeConfig, quiet: bool, strict: bool) -> Result<()> {
    info!(
        input = %config.input.display(),
        group_size = config.group_size,
        pattern = %config.pattern,
        "merging Markdown files"
    );

    let progress = CliProgress::new(quiet);
    let outcome = run_merge(config, &progress)?;

    if !quiet && !outcome.created.is_empty() {
        println!("Created {} merged file(s) in total.", outcome.created.len());
    }
    println!();
    println!("{}", Summary::new(outcome.tally, "merged files"));

    check_strict(strict, &outcome.tally)
}

/// Per-unit failures only affect the exit status with `--strict`.
fn check_strict(strict: bool, tally: &OutcomeTally) -> Result<()> {
    if strict && tally.has_failures() {
        return Err(eyre!(
            "{} of {} unit(s) failed",
            tally.failed,
            tally.total()
        ));
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = app_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
