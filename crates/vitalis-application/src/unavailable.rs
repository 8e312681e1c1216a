//! Stand-in generator used when no service client can be built.

use async_trait::async_trait;
use vitalis_core::error::{Result, VitalisError};
use vitalis_core::generation::{ContentGenerator, GenerationRequest};

/// Fails every request with the error that prevented building a client.
pub struct UnavailableGenerator {
    reason: VitalisError,
}

impl UnavailableGenerator {
    pub fn new(reason: VitalisError) -> Self {
        Self { reason }
    }
}

#[async_trait]
impl ContentGenerator for UnavailableGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String> {
        Err(self.reason.clone())
    }
}
