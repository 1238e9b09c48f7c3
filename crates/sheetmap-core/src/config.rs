//! User configuration (`config.toml`).
//!
//! Looked up in the platform config directory unless a path is given:
//!
//! ```toml
//! schema = "mappings/v7.json"   # relative to this file
//! sheet = "Report"
//! pretty = true
//! max_file_bytes = 10485760
//! ```

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, SheetmapError};
use crate::storage::{DEFAULT_MAX_FILE_BYTES, LoadOptions, check_size};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Default mapping schema.
    pub schema: Option<PathBuf>,
    /// Default workbook sheet.
    pub sheet: Option<String>,
    /// Pretty-print the JSON output.
    pub pretty: bool,
    /// Refuse input files larger than this.
    pub max_file_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema: None,
            sheet: None,
            pretty: false,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl Config {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            sheet: self.sheet.clone(),
            max_file_bytes: self.max_file_bytes,
        }
    }

    /// Parse config text. Relative paths are resolved against `base_dir`.
    pub fn parse(content: &str, base_dir: Option<&Path>) -> std::result::Result<Config, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        if let (Some(schema), Some(base)) = (config.schema.as_mut(), base_dir)
            && schema.is_relative()
        {
            *schema = base.join(&*schema);
        }
        Ok(config)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("me", "shoryuken", "sheetmap")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load the config from `explicit`, or from the default location.
///
/// A missing default file yields the defaults; a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) if !path.exists() => {
            return Err(SheetmapError::ConfigNotFound(path.to_path_buf()));
        }
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.is_file() => path,
            _ => {
                log::debug!("no config file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    check_size(&path, MAX_CONFIG_FILE_BYTES)?;
    let content = std::fs::read_to_string(&path)?;
    let config = Config::parse(&content, path.parent()).map_err(|source| SheetmapError::Config {
        path: path.clone(),
        source,
    })?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}
