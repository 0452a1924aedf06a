//! Configuration loading and parsing.
//!
//! Reads `hew.toml` from the working directory, falling back to the
//! platform config dir (`<config>/hew/hew.toml`). Missing files and parse
//! errors both resolve to defaults so a broken config never blocks
//! startup; unknown fields are ignored for forward evolution.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
pub struct IndentConfig {
    /// When set, the indent key and autoindent emit spaces up to the next
    /// tab stop instead of tab bytes.
    #[serde(default = "IndentConfig::default_as_spaces")]
    pub as_spaces: bool,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            as_spaces: Self::default_as_spaces(),
        }
    }
}

impl IndentConfig {
    const fn default_as_spaces() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub indent: IndentConfig,
}

#[derive(Debug, Default, Clone)]
pub struct Config {
    pub file: ConfigFile,
}

/// Best-effort config path: working directory first, then the platform
/// config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("hew.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("hew").join("hew.toml");
    }
    PathBuf::from("hew.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                info!(target: "config", file = %path.display(), "config_loaded");
                Ok(Config { file })
            }
            Err(e) => {
                info!(target: "config", file = %path.display(), %e, "config_parse_error_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}
