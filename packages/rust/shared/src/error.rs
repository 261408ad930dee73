//! Error types for mdtoolkit.
//!
//! Library crates use [`MdToolkitError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Run-level errors (bad input path, bad group size, bad pattern) abort a run.
//! [`ConversionError`] describes a single conversion unit and is recorded
//! against that unit only.

use std::path::PathBuf;

/// Top-level error type for all mdtoolkit operations.
#[derive(Debug, thiserror::Error)]
pub enum MdToolkitError {
    /// Input path is neither an existing directory nor a file of the expected kind.
    #[error("invalid input: '{}' is not {expected}", path.display())]
    InvalidInputKind { path: PathBuf, expected: String },

    /// Group size below one.
    #[error("invalid group size {0}: must be at least 1")]
    InvalidGroupSize(usize),

    /// Filename pattern that does not parse as a glob.
    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File content is not valid UTF-8.
    #[error("{path:?} is not valid UTF-8 text")]
    Encoding { path: PathBuf },

    /// A conversion unit could not be produced.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Failure of a single conversion unit.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The external converter could not be started at all.
    #[error("converter '{program}' is not available: {source}")]
    Unavailable {
        program: String,
        source: std::io::Error,
    },

    /// The external converter ran and exited unsuccessfully.
    #[error("converter '{program}' exited with {}{}", exit_label(*code), stderr_suffix(stderr))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Reading a source or writing a destination failed.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A source file is not valid UTF-8.
    #[error("{path:?} is not valid UTF-8 text")]
    Encoding { path: PathBuf },

    /// The in-process backend rejected the input.
    #[error("conversion backend error: {0}")]
    Backend(String),
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MdToolkitError>;

impl MdToolkitError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Input path of the wrong kind; `expected` names what was acceptable.
    pub fn invalid_input(path: impl Into<PathBuf>, expected: impl Into<String>) -> Self {
        Self::InvalidInputKind {
            path: path.into(),
            expected: expected.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error aborts a whole run rather than a single unit.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Conversion(_))
    }
}

impl ConversionError {
    /// Wrap a `std::io::Error` with a path for context.
    ///
    /// `InvalidData` from a UTF-8 read is reported as [`ConversionError::Encoding`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::InvalidData {
            Self::Encoding { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// True when the converter executable could not be invoked.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
