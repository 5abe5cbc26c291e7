//! User preferences persisted alongside the ledger data.
//!
//! The core never reads these values; they are stored so front-ends can
//! restore the last selected theme and view between sessions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Result;
use crate::utils::{app_data_dir, ensure_dir};

const CONFIG_FILE_NAME: &str = "config.json";

/// Color scheme preference.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Last selected screen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Budgets,
    Transactions,
    Settings,
}

/// Persisted preference record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub view: View,
}

/// Loads and saves the preference record under the data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager rooted at `base`, defaulting to the application data
    /// directory. The directory is created when missing.
    pub fn new(base: Option<PathBuf>) -> Result<Self> {
        let base = base.unwrap_or_else(app_data_dir);
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored preferences, falling back to defaults when the file
    /// does not exist yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!("saved preferences to {}", self.path.display());
        Ok(())
    }
}
