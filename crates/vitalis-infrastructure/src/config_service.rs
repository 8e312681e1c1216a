//! Loads `config.toml`, creating it with defaults on first run.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::info;
use vitalis_core::config::AppConfig;
use vitalis_core::error::{Result, VitalisError};

use crate::storage::{AtomicFile, FileFormat};

/// Loads and caches the application configuration.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicFile<AppConfig>>,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::new(path, FileFormat::Toml)),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configuration, reading the file on first access.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|e| VitalisError::internal(format!("config cache poisoned: {e}")))?;
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_or_create()?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|e| VitalisError::internal(format!("config cache poisoned: {e}")))?;
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    fn load_or_create(&self) -> Result<AppConfig> {
        let path = self.file.path().display().to_string();
        match self.file.load() {
            Ok(Some(config)) => Ok(config),
            Ok(None) => {
                let config = AppConfig::default();
                self.file.save(&config)?;
                info!(path = %path, "wrote default configuration");
                Ok(config)
            }
            Err(VitalisError::Serialization { message, .. }) => Err(VitalisError::config(
                format!("Failed to parse {path}: {message}"),
            )),
            Err(other) => Err(other),
        }
    }
}
