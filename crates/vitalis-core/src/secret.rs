//! Secret management service trait.

use crate::config::SecretConfig;
use crate::error::Result;

/// Loads API keys and other sensitive configuration.
///
/// Implementations must never log secret values or put them in error
/// messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    async fn load_secrets(&self) -> Result<SecretConfig>;

    async fn secret_file_exists(&self) -> bool;

    /// Returns the API key or a `Config` error naming where to put one.
    async fn require_api_key(&self) -> Result<String> {
        let secrets = self.load_secrets().await?;
        secrets.api_key().map(str::to_string).ok_or_else(|| {
            crate::error::VitalisError::config(
                "No Gemini API key configured. Set GEMINI_API_KEY or add it to secret.json.",
            )
        })
    }
}
