//! Unified path management for vitalis configuration and data files.
//!
//! ```text
//! ~/.config/vitalis/           # Config directory (or --home / VITALIS_HOME)
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API keys
//! ├── store.json               # Persisted key-value store
//! └── logs/                    # Application logs
//!     └── vitalis.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

use vitalis_core::config::{GeminiConfig, SecretConfig};
use vitalis_core::error::{Result, VitalisError};

/// Environment variable that relocates the whole config directory.
pub const HOME_ENV: &str = "VITALIS_HOME";

const APP_DIR: &str = "vitalis";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VitalisPaths {
    config_dir: PathBuf,
}

impl VitalisPaths {
    /// Resolves the config directory.
    ///
    /// Precedence: explicit `base`, then `VITALIS_HOME`, then the platform
    /// config directory joined with `vitalis`.
    pub fn resolve(base: Option<&Path>) -> Result<Self> {
        if let Some(base) = base {
            return Ok(Self::with_base(base));
        }
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_base(PathBuf::from(home)));
        }
        let config_dir = dirs::config_dir()
            .ok_or_else(|| VitalisError::config("Cannot find home directory"))?;
        Ok(Self::with_base(config_dir.join(APP_DIR)))
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: base.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    pub fn store_file(&self) -> PathBuf {
        self.config_dir.join("store.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    /// Creates the config and logs directories if needed.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    /// Ensures the secret file exists, writing an empty template if it doesn't.
    ///
    /// On Unix the file is created with mode 600.
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        let secret_path = self.secret_file();
        if secret_path.exists() {
            return Ok(secret_path);
        }

        std::fs::create_dir_all(&self.config_dir)?;

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: None,
            }),
        };
        std::fs::write(&secret_path, serde_json::to_string_pretty(&template)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&secret_path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::info!(path = %secret_path.display(), "created secret template");
        Ok(secret_path)
    }
}
