//! The generator wired to a real tool registry.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{tool_call, tool_response, ScriptedClient};
use course_assistant_core::models::{ContentBlock, CreateResult};
use course_assistant_core::tools::{FunctionTool, ToolError, ToolSchema};
use course_assistant_core::{GeneratorConfig, ResponseGenerator, ToolManager, ToolManagerConfig};
use serde_json::{json, Value};

fn registry(config: ToolManagerConfig) -> ToolManager {
    let mut manager = ToolManager::new(config);
    manager.register(Arc::new(FunctionTool::from_fn(
        ToolSchema::new("search_course_content", "Search course materials")
            .with_property("query", json!({"type": "string"}))
            .with_required("query"),
        |args| async move {
            let query = args.get("query").and_then(Value::as_str).unwrap_or_default();
            Ok(format!("[Intro to AI - Lesson 1]\n{} is the study of intelligent agents.", query))
        },
    )));
    manager.register(Arc::new(FunctionTool::from_fn(
        ToolSchema::new("get_course_outline", "Course outline lookup")
            .with_property("course_name", json!({"type": "string"}))
            .with_required("course_name"),
        |_args| async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            Err(ToolError::execution("unreachable"))
        },
    )));
    manager
}

fn result_block(request_messages: &[course_assistant_core::models::Message]) -> (bool, String) {
    match &request_messages[2].blocks()[0] {
        ContentBlock::ToolResult(r) => (r.is_error, r.content.clone()),
        other => panic!("expected tool result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_registry_executes_tool_for_generator() {
    let client = ScriptedClient::replying(vec![
        tool_response(vec![tool_call("t1", "search_course_content", json!({"query": "AI"}))]),
        CreateResult::text("AI studies intelligent agents."),
    ]);
    let manager = registry(ToolManagerConfig::default());
    let tools = manager.tool_schemas();
    let generator = ResponseGenerator::new(client.clone(), GeneratorConfig::default()).unwrap();

    let answer = generator
        .generate("What is AI?", None, Some(&tools), Some(&manager))
        .await
        .unwrap();

    assert_eq!(answer, "AI studies intelligent agents.");
    let requests = client.requests().await;
    let (is_error, content) = result_block(&requests[1].messages);
    assert!(!is_error);
    assert!(content.contains("AI is the study of intelligent agents."));
}

#[tokio::test]
async fn test_schema_violation_reported_to_model() {
    let client = ScriptedClient::replying(vec![
        tool_response(vec![tool_call("t1", "search_course_content", json!({"query": 42}))]),
        CreateResult::text("Let me try again later."),
    ]);
    let manager = registry(ToolManagerConfig::default());
    let tools = manager.tool_schemas();
    let generator = ResponseGenerator::new(client.clone(), GeneratorConfig::default()).unwrap();

    generator
        .generate("Search", None, Some(&tools), Some(&manager))
        .await
        .unwrap();

    let requests = client.requests().await;
    let (is_error, content) = result_block(&requests[1].messages);
    assert!(is_error);
    assert!(content.starts_with("Invalid arguments"));
}

#[tokio::test]
async fn test_timeout_reported_to_model() {
    let client = ScriptedClient::replying(vec![
        tool_response(vec![tool_call("t1", "get_course_outline", json!({"course_name": "MCP"}))]),
        CreateResult::text("The outline is unavailable right now."),
    ]);
    let manager = registry(ToolManagerConfig {
        per_tool_timeout_ms: 25,
        ..ToolManagerConfig::default()
    });
    let tools = manager.tool_schemas();
    let generator = ResponseGenerator::new(client.clone(), GeneratorConfig::default()).unwrap();

    let answer = generator
        .generate("Outline of MCP?", None, Some(&tools), Some(&manager))
        .await
        .unwrap();

    assert_eq!(answer, "The outline is unavailable right now.");
    let requests = client.requests().await;
    let (is_error, content) = result_block(&requests[1].messages);
    assert!(is_error);
    assert!(content.contains("timed out"));
}
