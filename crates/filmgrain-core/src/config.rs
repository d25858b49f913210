use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const APP_NAME: &str = "filmgrain";

/// Overrides the application directory, mainly so tests can run hermetically.
pub const CONFIG_DIR_ENV: &str = "FGRN_CONFIG_DIR";

const CONFIG_FILE: &str = "config.json";
const DATABASE_FILE: &str = "database.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No user configuration directory available")]
    NoConfigDir,

    #[error("Failed to create {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write config {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Invalid config {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode config: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Per-user settings. `author` and `country` are defaults merged into write
/// operations; `exiftool` names the binary, as a bare command or a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub author: Option<String>,
    pub country: Option<String>,
    pub exiftool: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            author: None,
            country: None,
            exiftool: "exiftool".to_string(),
        }
    }
}

impl Config {
    /// Reads the config file, writing and returning the default when the
    /// file does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| ConfigError::Decode {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let config = Config::default();
                config.save(path)?;
                tracing::debug!("Created default config at {}", path.display());
                Ok(config)
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self).map_err(ConfigError::Encode)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the configured tool name to a binary path: `~` expansion,
    /// then a `PATH` lookup. An unresolvable name is returned as written and
    /// the engine reports it missing at spawn time.
    #[must_use]
    pub fn exiftool_binary(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.exiftool);
        which::which(expanded.as_ref()).unwrap_or_else(|_| PathBuf::from(expanded.as_ref()))
    }
}

/// The per-user application directory, created if needed.
pub fn app_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join(APP_NAME),
    };
    fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

#[must_use]
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

#[must_use]
pub fn database_path(dir: &Path) -> PathBuf {
    dir.join(DATABASE_FILE)
}
