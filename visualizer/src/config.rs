//! Visualizer settings.

use std::fs;
use std::path::{Path, PathBuf};

use pathviz_core::AnimationSpeed;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for a [`Visualizer`](crate::Visualizer) session.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualizerConfig {
    /// Grid columns.
    pub width: i32,
    /// Grid rows.
    pub height: i32,
    /// Weight given to cells painted as weights.
    pub weight: i32,
    pub speed: AnimationSpeed,
    /// Number of runs kept in the history.
    pub history_limit: usize,
    /// Maze coordinates are animated in chunks of this many cells.
    pub maze_chunk_size: usize,
    /// Namespace prefix for persisted keys.
    pub storage_prefix: String,
    /// Directory holding persisted keys.
    pub storage_dir: PathBuf,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            width: 55,
            height: 25,
            weight: 15,
            speed: AnimationSpeed::Normal,
            history_limit: 15,
            maze_chunk_size: 500,
            storage_prefix: "algo-visualizer".to_string(),
            storage_dir: PathBuf::from(".pathviz"),
        }
    }
}

impl VisualizerConfig {
    /// Load a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::config(path, e))?;
        serde_json::from_str(&text).map_err(|e| Error::config(path, e))
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = VisualizerConfig::default();
        assert_eq!((c.width, c.height, c.weight), (55, 25, 15));
        assert_eq!(c.speed.millis(), 50);
        assert_eq!(c.history_limit, 15);
        assert_eq!(c.maze_chunk_size, 500);
        assert_eq!(c.storage_prefix, "algo-visualizer");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c: VisualizerConfig =
            serde_json::from_str(r#"{"width": 30, "speed": "Fast", "historyLimit": 5}"#).unwrap();
        assert_eq!(c.width, 30);
        assert_eq!(c.speed, AnimationSpeed::Fast);
        assert_eq!(c.history_limit, 5);
        assert_eq!(c.height, 25);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = VisualizerConfig::from_path("/nonexistent/pathviz.json").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(VisualizerConfig::load(None).unwrap(), VisualizerConfig::default());
    }
}
