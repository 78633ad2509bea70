use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;

/// Seam to the external text-generation collaborator. Implementations wrap
/// whatever model endpoint is configured; failures surface as
/// `Error::UpstreamUnavailable`.
#[async_trait]
pub trait TextGeneratorTrait: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Trait for assistant service operations
#[async_trait]
pub trait AssistantServiceTrait: Send + Sync {
    /// Asks the generator for a category matching the description. Degrades
    /// to the default category on any upstream failure or unusable answer.
    async fn categorize(&self, description: &str) -> String;

    /// Free-form insight generation over the user's financial snapshot.
    /// Unlike categorization, an upstream failure is surfaced to the caller.
    async fn generate_insights(&self, user_id: &str, as_of: NaiveDate) -> Result<String>;
}
