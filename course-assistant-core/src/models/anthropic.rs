//! Anthropic Messages API client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::model_client::{ChatCompletionClient, GenerationRequest};
use super::types::{ContentBlock, CreateResult, RequestUsage, StopReason, ToolUseBlock};
use crate::error::{AssistantError, ModelError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Connection settings for [`AnthropicClient`]
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    /// Falls back to `ANTHROPIC_API_KEY` when unset
    pub api_key: Option<String>,
    pub base_url: String,
    pub api_version: String,
    pub request_timeout_ms: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl AnthropicConfig {
    /// Defaults overridden by `ANTHROPIC_API_KEY` and `ANTHROPIC_BASE_URL`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.api_key = std::env::var("ANTHROPIC_API_KEY").ok().filter(|s| !s.is_empty());
        if let Some(url) = std::env::var("ANTHROPIC_BASE_URL").ok().filter(|s| !s.is_empty()) {
            cfg.base_url = url;
        }
        cfg
    }

    fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok().filter(|s| !s.is_empty()))
    }
}

/// HTTP client for the `/v1/messages` endpoint
#[derive(Clone)]
pub struct AnthropicClient {
    http: Client,
    api_key: String,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            AssistantError::Config("missing Anthropic API key (set ANTHROPIC_API_KEY)".into())
        })?;
        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| AssistantError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_key,
            config,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(AnthropicConfig::from_env())
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletionClient for AnthropicClient {
    #[tracing::instrument(
        name = "anthropic.create",
        skip(self, request),
        fields(model = %request.model, messages = request.messages.len(), tools = request.has_tools())
    )]
    async fn create(&self, request: &GenerationRequest) -> Result<CreateResult> {
        let url = self.endpoint();
        debug!(target: "anthropic_client", "POST {}", url);

        let resp = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(request)
            .send()
            .await
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(target: "anthropic_client", %status, body = %body, "Messages API error");
            return Err(status_error(status.as_u16(), body).into());
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|e| ModelError::ResponseParsing(e.to_string()))?;
        decode_response(value)
    }
}

fn status_error(status: u16, body: String) -> ModelError {
    match status {
        401 | 403 => ModelError::Authentication(body),
        429 => ModelError::RateLimited(body),
        _ => ModelError::ApiStatus { status, body },
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    content: Vec<WireBlock>,
    stop_reason: Option<StopReason>,
    #[serde(default)]
    usage: RequestUsage,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireBlock {
    Text { text: String },
    ToolUse(ToolUseBlock),
    #[serde(other)]
    Unknown,
}

fn decode_response(value: Value) -> Result<CreateResult> {
    let wire: WireResponse =
        serde_json::from_value(value).map_err(|e| ModelError::ResponseParsing(e.to_string()))?;

    let mut content = Vec::with_capacity(wire.content.len());
    for block in wire.content {
        match block {
            WireBlock::Text { text } => content.push(ContentBlock::Text { text }),
            WireBlock::ToolUse(call) => content.push(ContentBlock::ToolUse(call)),
            WireBlock::Unknown => {
                warn!(target: "anthropic_client", "Dropping unsupported content block");
            }
        }
    }

    Ok(CreateResult {
        stop_reason: wire.stop_reason.unwrap_or(StopReason::Other),
        content,
        usage: wire.usage,
        model: wire.model,
    })
}
