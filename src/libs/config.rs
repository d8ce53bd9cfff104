//! Configuration file handling.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). Every section is optional; a missing file or section
//! means the built-in defaults are used.
//!
//! ```json
//! {
//!   "defaults": {
//!     "repeat_type": "NONE",
//!     "repeat_duration": 0,
//!     "priority": 0,
//!     "long_term": false
//!   },
//!   "clock": { "utc_offset_minutes": 330 }
//! }
//! ```

use super::clock::ClockConfig;
use super::data_storage::DataStorage;
use super::messages::Message;
use super::task::TaskDefaults;
use crate::msg_error_anyhow;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Values for attributes left out when a task is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<TaskDefaults>,

    /// Reference time zone for completion stamps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock: Option<ClockConfig>,
}

impl Config {
    /// Loads the configuration from the data directory.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        serde_json::from_str(&config_str)
            .map_err(|e| msg_error_anyhow!(format!("{} {}: {}", Message::ConfigParseError, path.display(), e)))
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Configuration with every section filled in with its defaults.
    pub fn with_defaults() -> Self {
        Config {
            defaults: Some(TaskDefaults::default()),
            clock: Some(ClockConfig::default()),
        }
    }

    /// Removes the configuration file, if any.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }
}
