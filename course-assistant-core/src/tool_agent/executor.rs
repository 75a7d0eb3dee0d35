//! The tool execution boundary.
//!
//! [`ToolExecutor::execute`] reports failures as a plain `Result`; the
//! functions here turn every outcome, panics included, into a
//! [`ToolResultBlock`] so nothing a tool does can abort a generation.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::{info, warn};

use crate::logging::ToolCallEvent;
use crate::models::{CreateResult, ToolResultBlock, ToolUseBlock};
use crate::tools::{ToolArguments, ToolError};
use crate::EVENT_LOGGER_NAME;

/// Runs a named tool against model-supplied arguments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, name: &str, arguments: &ToolArguments) -> Result<String, ToolError>;
}

/// Execute one invocation block and pair the outcome with its call id.
pub async fn run_tool_call(executor: &dyn ToolExecutor, call: &ToolUseBlock) -> ToolResultBlock {
    let started = Instant::now();
    let outcome = AssertUnwindSafe(executor.execute(&call.name, &call.input))
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(ToolError::Panicked(panic_message(payload))));
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    let block = match outcome {
        Ok(content) => ToolResultBlock::success(&call.id, content),
        Err(err) => {
            warn!(target: "tool_agent", tool = %call.name, call_id = %call.id, error = %err, "Tool call failed");
            ToolResultBlock::error(&call.id, err.to_string())
        }
    };

    let event = ToolCallEvent::new(
        call.name.clone(),
        call.id.clone(),
        call.input.clone(),
        block.is_error,
        block.content.len(),
        latency_ms,
    );
    info!(target: EVENT_LOGGER_NAME, "{}", event);

    block
}

/// Execute every tool call of a response, one after another, in block order.
pub async fn execute_tool_calls(
    executor: &dyn ToolExecutor,
    response: &CreateResult,
) -> Vec<ToolResultBlock> {
    let mut results = Vec::new();
    for call in response.tool_calls() {
        results.push(run_tool_call(executor, call).await);
    }
    results
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
