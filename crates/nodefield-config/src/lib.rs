//! Configuration for the nodefield terminal animation.
//!
//! Settings live in `config.toml` under the platform config directory (for
//! example `~/.config/nodefield/config.toml` on Linux). A missing file means
//! defaults; every key is optional.
//!
//! ```toml
//! node_count = 60
//! link_distance = 120.0
//! fps = 60
//! theme = "aws"
//! cell_width = 8.0
//! cell_height = 16.0
//! # seed = 42
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use nodefield_core::ColorTheme;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";

/// Largest accepted particle count.
pub const MAX_NODE_COUNT: usize = 2000;

/// Largest accepted frame rate.
pub const MAX_FPS: u32 = 240;

/// Errors raised while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("could not determine a config directory for this platform")]
    NoConfigDir,
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of particles in the field.
    pub node_count: usize,
    /// Distance under which particles are linked, in pixels.
    pub link_distance: f64,
    /// Target frames per second.
    pub fps: u32,
    /// Colour theme for nodes and links.
    pub theme: ColorTheme,
    /// Pixel width of one terminal cell.
    pub cell_width: f64,
    /// Pixel height of one terminal cell.
    pub cell_height: f64,
    /// Fixed random seed; a fresh field every run when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_count: 60,
            link_distance: 120.0,
            fps: 60,
            theme: ColorTheme::default(),
            cell_width: 8.0,
            cell_height: 16.0,
            seed: None,
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "nodefield").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location. Defaults when there is no file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. Defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_count == 0 || self.node_count > MAX_NODE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "node_count must be between 1 and {MAX_NODE_COUNT}, got {}",
                self.node_count
            )));
        }
        if !(self.link_distance.is_finite() && self.link_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "link_distance must be positive, got {}",
                self.link_distance
            )));
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::Invalid(format!(
                "fps must be between 1 and {MAX_FPS}, got {}",
                self.fps
            )));
        }
        // A cell narrower than a pixel makes every braille dot sub-pixel.
        let at_least_one = |v: f64| v.is_finite() && v >= 1.0;
        if !at_least_one(self.cell_width) || !at_least_one(self.cell_height) {
            return Err(ConfigError::Invalid(format!(
                "cell size must be at least 1x1 pixels, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hero_animation() {
        let config = Config::default();
        assert_eq!(config.node_count, 60);
        assert_eq!(config.link_distance, 120.0);
        assert_eq!(config.theme, ColorTheme::Aws);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "node_count = 90\ntheme = \"cyan\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.node_count, 90);
        assert_eq!(config.theme, ColorTheme::Cyan);
        assert_eq!(config.fps, 60);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            theme: ColorTheme::Magenta,
            seed: Some(7),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "node_count = \"lots\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let bad = [
            Config {
                node_count: 0,
                ..Default::default()
            },
            Config {
                link_distance: -1.0,
                ..Default::default()
            },
            Config {
                fps: 1000,
                ..Default::default()
            },
            Config {
                cell_height: 0.0,
                ..Default::default()
            },
            Config {
                cell_width: 0.5,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_validate_accepts_one_pixel_cells() {
        let config = Config {
            cell_width: 1.0,
            cell_height: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "fps = 0").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid(_))
        ));
    }
}
