use async_trait::async_trait;
use cxaudit_core::Result;

/// Seam between the synthesizer and the generative model provider.
///
/// Implementations send the prompt under a forced single tool invocation
/// and return the raw tool input; shape validation happens in the
/// synthesizer, not here.
#[async_trait]
pub trait AuditModel: Send + Sync {
    /// Returns the `submit_audit` tool input as raw JSON.
    async fn generate_audit(&self, prompt: &str) -> Result<serde_json::Value>;

    fn model_name(&self) -> &str;
}
