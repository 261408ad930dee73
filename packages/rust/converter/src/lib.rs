//! HTML-to-Markdown converter backends.
//!
//! The conversion pipeline only depends on the [`Converter`] trait. Two
//! implementations ship with the crate:
//! - [`ExternalConverter`] runs a command-line converter once per file
//! - [`BuiltinConverter`] converts in-process with the `htmd` crate

mod builtin;
mod external;

use std::path::Path;

use mdtoolkit_shared::ConversionError;

pub use builtin::BuiltinConverter;
pub use external::ExternalConverter;

/// Converts one source file into one destination file.
pub trait Converter {
    /// Short name used in logs and messages.
    fn name(&self) -> &str;

    /// Produce `destination` from `source`. The destination's parent directory
    /// already exists when this is called.
    fn convert(&self, source: &Path, destination: &Path) -> Result<(), ConversionError>;
}
