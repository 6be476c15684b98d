use folio_engine::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// How passages and the table of contents are printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Short title used in attributions, e.g. `(Lr. 1.1.1-5)`.
    pub abbreviation: String,
    /// Column the attribution is right-aligned to.
    pub width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            abbreviation: "Lr.".into(),
            width: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The play's HTML document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_path: Option<PathBuf>,
    /// Where scene files are written and read back from.
    #[serde(default = "default_scenes_dir")]
    pub scenes_dir: PathBuf,
    #[serde(default)]
    pub parsing: ParseOptions,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_scenes_dir() -> PathBuf {
    PathBuf::from("scenes")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            play_path: None,
            scenes_dir: default_scenes_dir(),
            parsing: ParseOptions::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.play_path = config
            .play_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));
        config.scenes_dir = Self::expand_path(&config.scenes_dir).unwrap_or(config.scenes_dir);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/folio");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
