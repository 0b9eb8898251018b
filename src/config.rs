use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::stroke::DEFAULT_LINE_WIDTH;

pub const DEFAULT_BOARD_NAME: &str = "Untitled Whiteboard";

/// Board settings, read from a JSON file.
///
/// Every field is optional in the file; missing ones take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old files
pub struct Config {
    /// Where saved whiteboards live
    pub storage_dir: PathBuf,
    /// Where exported SVG and PNG files are written
    pub export_dir: PathBuf,
    /// Name given to a fresh board
    pub default_name: String,
    /// Pen width for new strokes
    pub line_width: f32,
    /// Canvas size used before the window reports one, and for headless exports
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("whiteboards"),
            export_dir: PathBuf::from("."),
            default_name: DEFAULT_BOARD_NAME.to_owned(),
            line_width: DEFAULT_LINE_WIDTH,
            canvas_width: 1280,
            canvas_height: 720,
        }
    }
}

impl Config {
    /// Read a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Read a config file if one is given and exists, otherwise use defaults.
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => {
                log::info!("Loading config from {}", path.display());
                Self::load(path)
            }
            Some(path) => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "line_width": 4.0 }"#).unwrap();
        assert_eq!(config.line_width, 4.0);
        assert_eq!(config.default_name, DEFAULT_BOARD_NAME);
        assert_eq!(config.canvas_width, 1280);
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(Config::load_or_default(Some(&missing)).unwrap(), Config::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            Config::load_or_default(Some(&broken)),
            Err(ConfigError::Parse { .. })
        ));

        let good = dir.path().join("good.json");
        fs::write(&good, r#"{ "storage_dir": "/tmp/boards", "canvas_height": 600 }"#).unwrap();
        let config = Config::load_or_default(Some(&good)).unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/boards"));
        assert_eq!(config.canvas_height, 600);
    }
}
