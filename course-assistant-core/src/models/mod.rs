//! Language model integration and message types.
//!
//! This module provides the conversation data model (turns and content
//! blocks), the [`ChatCompletionClient`] boundary the generator calls through,
//! and, with the `http` feature, an Anthropic Messages API implementation.

mod model_client;
mod types;

#[cfg(feature = "http")]
mod anthropic;

pub use model_client::{ChatCompletionClient, GenerationRequest, ToolChoice};
#[cfg(test)]
pub use model_client::MockChatCompletionClient;
pub use types::{
    ContentBlock, CreateResult, Message, MessageContent, RequestUsage, Role, StopReason,
    ToolResultBlock, ToolUseBlock,
};

#[cfg(feature = "http")]
pub use anthropic::{AnthropicClient, AnthropicConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
