//! Structured log events and subscriber setup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing_subscriber::{fmt, EnvFilter};

use crate::models::StopReason;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    /// Emit one JSON object per line instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Returns `false` when a
/// subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = fmt().with_env_filter(filter).with_target(true);
    if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

/// Event for logging model backend calls
#[derive(Debug, Serialize, Deserialize)]
pub struct LlmCallEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub round: usize,
    pub message_count: usize,
    pub tools_attached: bool,
    pub stop_reason: StopReason,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub timestamp: DateTime<Utc>,
}

impl LlmCallEvent {
    pub fn new(
        round: usize,
        message_count: usize,
        tools_attached: bool,
        stop_reason: StopReason,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Self {
        Self {
            event_type: "LLMCall".to_string(),
            round,
            message_count,
            tools_attached,
            stop_reason,
            input_tokens,
            output_tokens,
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for LlmCallEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "LlmCallEvent serialization error"),
        }
    }
}

/// Event for logging tool calls
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolCallEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub tool_name: String,
    pub call_id: String,
    pub arguments: Map<String, Value>,
    pub is_error: bool,
    pub result_len: usize,
    pub latency_ms: f64,
    pub timestamp: DateTime<Utc>,
}

impl ToolCallEvent {
    pub fn new(
        tool_name: String,
        call_id: String,
        arguments: Map<String, Value>,
        is_error: bool,
        result_len: usize,
        latency_ms: f64,
    ) -> Self {
        Self {
            event_type: "ToolCall".to_string(),
            tool_name,
            call_id,
            arguments,
            is_error,
            result_len,
            latency_ms,
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for ToolCallEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "ToolCallEvent serialization error"),
        }
    }
}
