//! Application configuration for mdtoolkit.
//!
//! User config lives at `~/.mdtoolkit/mdtoolkit.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MdToolkitError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "mdtoolkit.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".mdtoolkit";

// ---------------------------------------------------------------------------
// Config structs (matching mdtoolkit.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTML → Markdown conversion settings.
    #[serde(default)]
    pub convert: ConvertSettings,

    /// Markdown merge settings.
    #[serde(default)]
    pub merge: MergeSettings,
}

/// Which converter implementation the `convert` command uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterBackend {
    /// Run an external program once per file.
    #[default]
    External,
    /// Convert in-process.
    Builtin,
}

/// `[convert]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertSettings {
    /// External converter executable.
    #[serde(default = "default_program")]
    pub program: String,

    /// Flag placed between the source and destination arguments.
    #[serde(default = "default_output_flag")]
    pub output_flag: String,

    /// Subdirectory of the input directory used when no output is given.
    #[serde(default = "default_output_dir_name")]
    pub output_dir_name: String,

    /// Converter backend.
    #[serde(default)]
    pub backend: ConverterBackend,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            output_flag: default_output_flag(),
            output_dir_name: default_output_dir_name(),
            backend: ConverterBackend::default(),
        }
    }
}

fn default_program() -> String {
    "markitdown".into()
}
fn default_output_flag() -> String {
    "-o".into()
}
fn default_output_dir_name() -> String {
    "markdown".into()
}

/// `[merge]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSettings {
    /// Files per merged output.
    #[serde(default = "default_group_size")]
    pub group_size: usize,

    /// Glob selecting the files to merge.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Separator written between two merged files.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Output file name prefix.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Write a `# <name>` heading before each file.
    #[serde(default)]
    pub include_header: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            group_size: default_group_size(),
            pattern: default_pattern(),
            delimiter: default_delimiter(),
            prefix: default_prefix(),
            include_header: false,
        }
    }
}

fn default_group_size() -> usize {
    10
}
fn default_pattern() -> String {
    "*.md".into()
}
fn default_delimiter() -> String {
    "___".into()
}
fn default_prefix() -> String {
    "merged".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.mdtoolkit/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MdToolkitError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.mdtoolkit/mdtoolkit.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MdToolkitError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        MdToolkitError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| MdToolkitError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    write_default_config(&path)?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| MdToolkitError::config(e.to_string()))?;
    std::fs::write(path, content).map_err(|e| MdToolkitError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("markitdown"));
        assert!(toml_str.contains("group_size = 10"));
        assert!(toml_str.contains("backend = \"external\""));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml_str = r#"
[merge]
group_size = 3
delimiter = "<!-- next -->"

[convert]
backend = "builtin"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.merge.group_size, 3);
        assert_eq!(config.merge.delimiter, "<!-- next -->");
        assert_eq!(config.merge.pattern, "*.md");
        assert_eq!(config.merge.prefix, "merged");
        assert!(!config.merge.include_header);
        assert_eq!(config.convert.backend, ConverterBackend::Builtin);
        assert_eq!(config.convert.program, "markitdown");
        assert_eq!(config.convert.output_dir_name, "markdown");
    }

    #[test]
    fn load_from_written_default() {
        let dir = std::env::temp_dir().join(format!("mdt-config-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);

        write_default_config(&path).unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.merge.group_size, 10);
        assert_eq!(config.convert.output_flag, "-o");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_config_is_config_error() {
        let dir = std::env::temp_dir().join(format!("mdt-config-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[merge]\ngroup_size = \"many\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, MdToolkitError::Config { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
