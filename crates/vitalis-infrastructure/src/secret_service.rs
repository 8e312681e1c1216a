//! Secret service implementation.
//!
//! Reads `secret.json` once and caches it. `GEMINI_API_KEY`, then `API_KEY`,
//! override the key stored in the file.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::debug;
use vitalis_core::config::{GeminiConfig, SecretConfig};
use vitalis_core::error::{Result, VitalisError};
use vitalis_core::secret::SecretService;

use crate::storage::{AtomicFile, FileFormat};

pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

type EnvLookup = fn(&str) -> Option<String>;

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[derive(Clone)]
pub struct SecretServiceImpl {
    file: Arc<AtomicFile<SecretConfig>>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
    env: EnvLookup,
}

impl SecretServiceImpl {
    pub fn new(path: PathBuf) -> Self {
        Self::with_env(path, process_env)
    }

    /// Uses `env` instead of the process environment for key overrides.
    pub fn with_env(path: PathBuf, env: EnvLookup) -> Self {
        Self {
            file: Arc::new(AtomicFile::new(path, FileFormat::Json)),
            secrets: Arc::new(RwLock::new(None)),
            env,
        }
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig> {
        {
            let read_lock = self
                .secrets
                .read()
                .map_err(|e| VitalisError::internal(format!("secret cache poisoned: {e}")))?;
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self
            .file
            .load()
            .map_err(|e| match e {
                // serde messages can quote input, so only the path is reported
                VitalisError::Serialization { .. } => VitalisError::config(format!(
                    "Failed to parse {}",
                    self.file.path().display()
                )),
                other => other,
            })?
            .unwrap_or_default();

        if let Some((name, key)) = API_KEY_ENV_VARS
            .iter()
            .find_map(|name| (self.env)(name).filter(|v| !v.trim().is_empty()).map(|v| (*name, v)))
        {
            debug!(source = name, "API key taken from environment");
            let model_name = loaded.gemini.take().and_then(|g| g.model_name);
            loaded.gemini = Some(GeminiConfig {
                api_key: key,
                model_name,
            });
        }

        let mut write_lock = self
            .secrets
            .write()
            .map_err(|e| VitalisError::internal(format!("secret cache poisoned: {e}")))?;
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_secrets_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.file.path().exists()
    }
}
