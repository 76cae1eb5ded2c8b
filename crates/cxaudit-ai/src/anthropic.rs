use crate::model::AuditModel;
use crate::schema::{audit_tool, AUDIT_TOOL_NAME};
use async_trait::async_trait;
use cxaudit_core::{CxAuditError, ModelConfig, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic Claude provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for Anthropic.
    pub api_key: String,
    /// Model to use (e.g., "claude-sonnet-4-5-20250929").
    pub model: String,
    pub max_tokens: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl AnthropicConfig {
    pub fn from_model_config(config: &ModelConfig) -> Self {
        Self {
            api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
        }
    }
}

/// Anthropic Claude provider. Every request carries the `submit_audit`
/// tool and forces its invocation; free-form text replies are rejected.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(CxAuditError::Config(
                "Anthropic API key is required. Set ANTHROPIC_API_KEY environment variable."
                    .into(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CxAuditError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn send_request(&self, prompt: &str) -> Result<MessagesResponse> {
        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            tools: vec![audit_tool()],
            tool_choice: ToolChoice {
                choice_type: "tool".into(),
                name: AUDIT_TOOL_NAME.into(),
            },
            messages: vec![AnthropicMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/messages", ANTHROPIC_API_BASE))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CxAuditError::Model(format!("request to Anthropic failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CxAuditError::Model(format!(
                "Anthropic API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<MessagesResponse>()
            .await
            .map_err(|e| CxAuditError::Model(format!("failed to parse Anthropic response: {}", e)))
    }
}

#[async_trait]
impl AuditModel for AnthropicProvider {
    async fn generate_audit(&self, prompt: &str) -> Result<serde_json::Value> {
        let response = self.send_request(prompt).await?;
        debug!(
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "audit synthesis completed"
        );
        extract_tool_input(response)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Pull the single tool invocation out of the response content. A reply
/// with no tool_use block is a fatal pipeline error.
fn extract_tool_input(response: MessagesResponse) -> Result<serde_json::Value> {
    response
        .content
        .into_iter()
        .find_map(|block| {
            if block.block_type == "tool_use" {
                block.input
            } else {
                None
            }
        })
        .ok_or_else(|| CxAuditError::Model("no structured output produced".into()))
}

// Anthropic Messages API request/response types

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: usize,
    tools: Vec<serde_json::Value>,
    tool_choice: ToolChoice,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    choice_type: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    input: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Usage {
    input_tokens: usize,
    output_tokens: usize,
}
