//! Ask the course assistant a question against a small in-memory catalog.
//!
//! ```text
//! ANTHROPIC_API_KEY=... cargo run --example ask -- "What does lesson 2 of Intro to RAG cover?"
//! ```
//!
//! Set `COURSE_ASSISTANT_CONFIG` to a TOML file to override settings.

use std::path::PathBuf;
use std::sync::Arc;

use course_assistant_core::models::AnthropicClient;
use course_assistant_core::tools::{FunctionTool, ToolError, ToolSchema};
use course_assistant_core::{init_logging, ResponseGenerator, Settings, ToolManager};
use serde_json::{json, Value};

const LESSONS: &[(&str, u32, &str, &str)] = &[
    ("Intro to RAG", 1, "Why retrieval", "Retrieval grounds model answers in your own documents."),
    ("Intro to RAG", 2, "Chunking", "Documents are split into overlapping chunks before embedding."),
    ("Intro to RAG", 3, "Vector search", "Chunks are ranked by embedding similarity to the query."),
    ("MCP Servers", 1, "Protocol basics", "Clients discover tools, resources and prompts from servers."),
    ("MCP Servers", 2, "Building a server", "A server registers handlers and speaks JSON-RPC over stdio."),
];

fn outline_tool() -> FunctionTool {
    FunctionTool::from_fn(
        ToolSchema::new(
            "get_course_outline",
            "Get a course's title, link and complete lesson list",
        )
        .with_property("course_name", json!({"type": "string", "description": "Course title (partial matches work)"}))
        .with_required("course_name"),
        |args| async move {
            let wanted = args
                .get("course_name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_lowercase();
            let lessons: Vec<String> = LESSONS
                .iter()
                .filter(|(course, ..)| course.to_lowercase().contains(&wanted))
                .map(|(course, n, title, _)| format!("{course} - Lesson {n}: {title}"))
                .collect();
            if lessons.is_empty() {
                return Err(ToolError::execution(format!("No course found matching '{wanted}'")));
            }
            Ok(lessons.join("\n"))
        },
    )
}

fn search_tool() -> FunctionTool {
    FunctionTool::from_fn(
        ToolSchema::new("search_course_content", "Search course materials")
            .with_property("query", json!({"type": "string", "description": "What to search for"}))
            .with_property("course_name", json!({"type": "string"}))
            .with_property("lesson_number", json!({"type": "integer"}))
            .with_required("query"),
        |args| async move {
            let query = args.get("query").and_then(Value::as_str).unwrap_or_default().to_lowercase();
            let course = args.get("course_name").and_then(Value::as_str).map(str::to_lowercase);
            let lesson = args.get("lesson_number").and_then(Value::as_u64);

            let hits: Vec<String> = LESSONS
                .iter()
                .filter(|(c, ..)| course.as_ref().map_or(true, |want| c.to_lowercase().contains(want)))
                .filter(|(_, n, ..)| lesson.map_or(true, |want| u64::from(*n) == want))
                .filter(|(_, _, title, body)| {
                    query.split_whitespace().any(|word| {
                        title.to_lowercase().contains(word) || body.to_lowercase().contains(word)
                    })
                })
                .map(|(c, n, _, body)| format!("[{c} - Lesson {n}]\n{body}"))
                .collect();

            if hits.is_empty() {
                Ok("No relevant content found.".to_string())
            } else {
                Ok(hits.join("\n\n"))
            }
        },
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var_os("COURSE_ASSISTANT_CONFIG").map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref())?;
    init_logging(&settings.logging);

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let query = if query.is_empty() {
        "What does lesson 2 of Intro to RAG cover?".to_string()
    } else {
        query
    };

    let mut manager = ToolManager::new(settings.tools.clone());
    manager.register(Arc::new(outline_tool()));
    manager.register(Arc::new(search_tool()));
    let tools = manager.tool_schemas();

    let client = Arc::new(AnthropicClient::new(settings.anthropic.clone())?);
    let generator = ResponseGenerator::new(client, settings.generator.clone())?;

    println!("Q: {query}");
    let answer = generator
        .generate(&query, None, Some(&tools), Some(&manager))
        .await?;
    println!("A: {answer}");

    Ok(())
}
