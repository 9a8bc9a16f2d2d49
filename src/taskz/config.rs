use crate::error::{Result, TaskzError};
use crate::model::Priority;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for taskz, stored as config.json beside the task data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskzConfig {
    /// Priority assigned by `add` when none is given on the command line
    #[serde(default)]
    pub default_priority: Priority,

    /// Whether `list` hides completed tasks unless asked for them
    #[serde(default)]
    pub hide_done: bool,
}

impl Default for TaskzConfig {
    fn default() -> Self {
        Self {
            default_priority: Priority::default(),
            hide_done: false,
        }
    }
}

impl TaskzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TaskzError::Io)?;
        let config: TaskzConfig =
            serde_json::from_str(&content).map_err(TaskzError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TaskzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TaskzError::Serialization)?;
        fs::write(config_path, content).map_err(TaskzError::Io)?;
        Ok(())
    }
}
