//! Application settings, read once at startup.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::{Result, WorkoutError};

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "workout_log.json";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: PathBuf,
    /// Workouts listed under "Recent Workouts" on the dashboard.
    pub recent_count: usize,
    /// Previous sessions shown per exercise on the track view.
    pub history_preview: usize,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_file: PathBuf::from("workouts.json"),
            recent_count: 3,
            history_preview: 3,
            window_size: [1280.0, 800.0],
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
            Err(source) => {
                return Err(WorkoutError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: AppConfig =
            serde_json::from_str(&contents).map_err(|source| WorkoutError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), data_file = %config.data_file.display(), "loaded settings");
        Ok(config)
    }
}
