use std::path::PathBuf;

use anyhow::{Context as _, Result};
use filmgrain_core::config::{self, Config};
use filmgrain_core::{Database, ExifTool};

/// Application directory and configuration, resolved once per invocation.
pub struct AppContext {
    pub dir: PathBuf,
    pub config: Config,
}

impl AppContext {
    pub fn resolve() -> Result<AppContext> {
        let dir = config::app_dir().context("failed to resolve the application directory")?;
        let config_path = config::config_path(&dir);
        let config = Config::load_or_create(&config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?;
        tracing::debug!("Using application directory {}", dir.display());
        Ok(AppContext { dir, config })
    }

    pub fn database(&self) -> Result<Database> {
        let path = config::database_path(&self.dir);
        Database::open(&path).with_context(|| format!("failed to open {}", path.display()))
    }

    #[must_use]
    pub fn exiftool(&self) -> ExifTool {
        ExifTool::new(self.config.exiftool_binary())
    }
}
