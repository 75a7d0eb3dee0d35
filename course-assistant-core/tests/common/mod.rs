//! Scripted fakes shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use course_assistant_core::models::{
    ChatCompletionClient, ContentBlock, CreateResult, GenerationRequest, StopReason,
};
use course_assistant_core::tools::{ToolArguments, ToolError};
use course_assistant_core::{AssistantError, Result, ToolExecutor};
use serde_json::Value;
use tokio::sync::Mutex;

/// Model client that replays queued responses and records every request
#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<CreateResult>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<CreateResult>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(responses: Vec<CreateResult>) -> Arc<Self> {
        Self::new(responses.into_iter().map(Ok).collect())
    }

    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl ChatCompletionClient for ScriptedClient {
    async fn create(&self, request: &GenerationRequest) -> Result<CreateResult> {
        self.requests.lock().await.push(request.clone());
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AssistantError::other("script exhausted")))
    }
}

/// Tool executor with canned outcomes per tool name
#[derive(Default)]
pub struct RecordingExecutor {
    outcomes: HashMap<String, std::result::Result<String, ToolError>>,
    calls: Mutex<Vec<(String, ToolArguments)>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, name: &str, output: &str) -> Self {
        self.outcomes.insert(name.to_string(), Ok(output.to_string()));
        self
    }

    pub fn with_error(mut self, name: &str, error: ToolError) -> Self {
        self.outcomes.insert(name.to_string(), Err(error));
        self
    }

    pub async fn calls(&self) -> Vec<(String, ToolArguments)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl ToolExecutor for RecordingExecutor {
    async fn execute(&self, name: &str, arguments: &ToolArguments) -> std::result::Result<String, ToolError> {
        self.calls.lock().await.push((name.to_string(), arguments.clone()));
        self.outcomes
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(ToolError::NotFound(name.to_string())))
    }
}

pub fn args(value: Value) -> ToolArguments {
    value.as_object().cloned().unwrap_or_default()
}

pub fn tool_call(id: &str, name: &str, input: Value) -> ContentBlock {
    ContentBlock::tool_use(id, name, args(input))
}

pub fn tool_response(blocks: Vec<ContentBlock>) -> CreateResult {
    CreateResult::new(StopReason::ToolUse, blocks)
}
