//! Model client trait and request definitions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::{CreateResult, Message};
use crate::{error::Result, tools::ToolSchema};

/// Tool choice options for model calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolChoice {
    /// The model decides whether to call a tool
    Auto,
    /// The model must call some tool
    Any,
    /// The model may not call tools
    None,
    /// The model must call the named tool
    Tool { name: String },
}

/// Everything the backend needs for one call.
///
/// Built fresh before every call and never mutated afterwards. Serializes to
/// the Messages API request body; `tools` and `tool_choice` are left out
/// entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

impl GenerationRequest {
    pub fn has_tools(&self) -> bool {
        self.tools.is_some()
    }
}

/// Chat completion client trait for interacting with language models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Create a single response from the model.
    ///
    /// # Errors
    /// Transport, authentication, throttling and decoding failures are
    /// returned as [`AssistantError::Model`](crate::AssistantError::Model).
    async fn create(&self, request: &GenerationRequest) -> Result<CreateResult>;
}
