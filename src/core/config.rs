use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_adb_bin")]
    pub adb_bin: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Serial to use when the command line does not pass one.
    #[serde(default)]
    pub device: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            adb_bin: default_adb_bin(),
            timeout_ms: default_timeout_ms(),
            device: None,
        }
    }
}

impl Settings {
    /// Load settings from TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse config file")
    }
}

fn default_adb_bin() -> String {
    "adb".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}
