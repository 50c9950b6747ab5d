//! Application configuration for eodb.
//!
//! User config lives at `~/.eodb/eodb.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EodbError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "eodb.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".eodb";

// ---------------------------------------------------------------------------
// Config structs (matching eodb.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data source locations and load policy.
    #[serde(default)]
    pub data: DataConfig,
}

/// `[data]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the CSV exports.
    #[serde(default = "default_data_dir")]
    pub dir: String,

    /// Executive orders table, relative to `dir`.
    #[serde(default = "default_executive_orders_file")]
    pub executive_orders_file: String,

    /// Timelines table, relative to `dir`.
    #[serde(default = "default_timelines_file")]
    pub timelines_file: String,

    /// Fail the load when two orders share a document number.
    /// When false, the first occurrence wins lookups.
    #[serde(default)]
    pub reject_duplicate_document_numbers: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            executive_orders_file: default_executive_orders_file(),
            timelines_file: default_timelines_file(),
            reject_duplicate_document_numbers: false,
        }
    }
}

fn default_data_dir() -> String {
    "data".into()
}
fn default_executive_orders_file() -> String {
    "EO_Agency_Classification.csv".into()
}
fn default_timelines_file() -> String {
    "EO_Timelines_v2.csv".into()
}

// ---------------------------------------------------------------------------
// Data sources (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Resolved source paths and load policy.
#[derive(Debug, Clone)]
pub struct DataSources {
    /// Full path to the executive orders CSV.
    pub executive_orders: PathBuf,
    /// Full path to the timelines CSV.
    pub timelines: PathBuf,
    /// See [`DataConfig::reject_duplicate_document_numbers`].
    pub reject_duplicates: bool,
}

impl DataSources {
    /// Resolve sources against an explicit data directory.
    pub fn in_dir(dir: impl AsRef<Path>, data: &DataConfig) -> Self {
        let dir = dir.as_ref();
        Self {
            executive_orders: dir.join(&data.executive_orders_file),
            timelines: dir.join(&data.timelines_file),
            reject_duplicates: data.reject_duplicate_document_numbers,
        }
    }
}

impl From<&AppConfig> for DataSources {
    fn from(config: &AppConfig) -> Self {
        Self::in_dir(&config.data.dir, &config.data)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.eodb/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| EodbError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.eodb/eodb.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| EodbError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| EodbError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| EodbError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content = toml::to_string_pretty(&config).map_err(|e| EodbError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| EodbError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("EO_Timelines_v2.csv"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[data]
dir = "/srv/eo"
reject_duplicate_document_numbers = true
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.data.dir, "/srv/eo");
        assert_eq!(config.data.executive_orders_file, "EO_Agency_Classification.csv");
        assert!(config.data.reject_duplicate_document_numbers);
    }

    #[test]
    fn data_sources_from_app_config() {
        let app = AppConfig::default();
        let sources = DataSources::from(&app);
        assert_eq!(
            sources.executive_orders,
            Path::new("data").join("EO_Agency_Classification.csv")
        );
        assert_eq!(sources.timelines, Path::new("data").join("EO_Timelines_v2.csv"));
        assert!(!sources.reject_duplicates);
    }

    #[test]
    fn explicit_dir_overrides_config_dir() {
        let app = AppConfig::default();
        let sources = DataSources::in_dir("/tmp/override", &app.data);
        assert!(sources.timelines.starts_with("/tmp/override"));
    }

    #[test]
    fn unreadable_config_is_io_error() {
        let missing = std::env::temp_dir().join("eodb-test-missing-config.toml");
        let err = load_config_from(&missing).expect_err("missing file");
        assert!(matches!(err, EodbError::Io { .. }));
    }
}
