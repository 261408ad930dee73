//! Shared types, error model, and configuration for mdtoolkit.
//!
//! This crate is the foundation depended on by all other mdtoolkit crates.
//! It provides:
//! - [`MdToolkitError`] and [`ConversionError`]: the error taxonomy
//! - Domain types ([`InputMode`], [`WorkRoot`], [`DiscoveredFile`], [`FileGroup`],
//!   [`ConversionUnit`], [`OutcomeTally`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ConvertSettings, ConverterBackend, MergeSettings, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{ConversionError, MdToolkitError, Result};
pub use types::{
    ConversionUnit, DiscoveredFile, FileGroup, FileUnit, GroupUnit, InputMode, OutcomeTally,
    WorkRoot,
};
