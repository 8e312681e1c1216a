use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};
use vitalis_application::Pipelines;
use vitalis_core::clock::{Clock, SystemClock};
use vitalis_core::config::AppConfig;
use vitalis_core::generation::ContentGenerator;
use vitalis_core::session::{SessionContext, SessionController};
use vitalis_infrastructure::{ConfigService, FileStore, SecretServiceImpl, VitalisPaths};
use vitalis_interaction::GeminiClient;

pub const NOT_LOGGED_IN: &str = "Not logged in. Run `vitalis login`.";

/// Everything a command needs: resolved paths, config and the restored
/// session.
pub struct App {
    pub paths: VitalisPaths,
    pub config: AppConfig,
    pub session: SessionController,
    clock: Arc<dyn Clock>,
}

impl App {
    /// Resolves the data directory and loads `config.toml`, creating both on
    /// first run.
    pub fn prepare(home: Option<&Path>) -> Result<(VitalisPaths, AppConfig)> {
        let paths = VitalisPaths::resolve(home).context("Failed to resolve data directory")?;
        paths.ensure_dirs().context("Failed to create data directory")?;
        paths
            .ensure_secret_file()
            .context("Failed to create secret file")?;

        let config = ConfigService::new(paths.config_file())
            .get_config()
            .context("Failed to load config.toml")?;
        Ok((paths, config))
    }

    /// Opens the store and restores the previous session, if any.
    pub fn open(paths: VitalisPaths, config: AppConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = Arc::new(FileStore::new(paths.store_file()));
        let mut session = SessionController::new(store, clock.clone());

        if let Err(err) = session.restore() {
            warn!(error = %err, "session could not be restored");
        }
        debug!(logged_in = session.state().is_logged_in(), "session restored");

        Self {
            paths,
            config,
            session,
            clock,
        }
    }

    pub fn require_session(&self) -> Result<&SessionContext> {
        match self.session.context() {
            Some(context) => Ok(context),
            None => bail!(NOT_LOGGED_IN),
        }
    }

    /// Builds the Gemini client from `secret.json` and the environment.
    pub async fn generator(&self) -> vitalis_core::Result<Arc<dyn ContentGenerator>> {
        let secrets = SecretServiceImpl::new(self.paths.secret_file());
        let client = GeminiClient::from_secrets(&secrets, &self.config.model).await?;
        debug!(model = client.model(), "generation client ready");
        Ok(Arc::new(client))
    }

    /// Builds the generation pipelines. Fails with a configuration error
    /// when no API key is available.
    pub async fn pipelines(&self) -> Result<Pipelines> {
        let generator = self.generator().await?;
        self.pipelines_with(generator)
    }

    pub fn pipelines_with(&self, generator: Arc<dyn ContentGenerator>) -> Result<Pipelines> {
        Ok(Pipelines::new(generator, self.clock.clone())?)
    }
}
