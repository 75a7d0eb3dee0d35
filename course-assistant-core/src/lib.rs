//! # Course Assistant Core
//!
//! A bounded multi-round tool orchestration engine. One user query goes to a
//! language model together with a manifest of named tools; whenever the model
//! asks for tools they are executed and their results fed back, for at most a
//! fixed number of rounds. On the last permitted round tools are withdrawn and
//! the model must answer from what it has gathered.
//!
//! ## Features
//!
//! - **Bounded tool rounds**: configurable cap, tools withdrawn on the last call
//! - **Contained tool failures**: errors, timeouts and panics become error results
//! - **Pluggable backends**: any [`ChatCompletionClient`](models::ChatCompletionClient),
//!   with an Anthropic Messages client behind the `http` feature
//! - **Layered settings**: TOML file plus `COURSE_ASSISTANT__*` environment
//!
//! ## Quick Start
//!
//! ```rust
//! use course_assistant_core::generator::compose_system_prompt;
//! use course_assistant_core::tools::ToolSchema;
//! use serde_json::json;
//!
//! let search = ToolSchema::new("search_course_content", "Search course materials")
//!     .with_property("query", json!({"type": "string"}))
//!     .with_required("query");
//! assert_eq!(search.input_schema["required"][0], "query");
//!
//! let system = compose_system_prompt(Some("User: hi"));
//! assert!(system.ends_with("Previous conversation:\nUser: hi"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

// Error types (must be first for other modules to use)
pub mod error;

pub mod generator;
pub mod logging;
pub mod models;
pub mod settings;
pub mod tool_agent;
pub mod tools;

pub use error::{AssistantError, ModelError, Result};
pub use generator::{GeneratorConfig, ResponseGenerator};
pub use logging::{init_logging, LoggingConfig};
pub use settings::Settings;
pub use tool_agent::{ToolExecutor, ToolManager, ToolManagerConfig};

/// Current version of course-assistant-core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Root logger name for the library
pub const ROOT_LOGGER_NAME: &str = "course_assistant_core";

/// Target for structured model and tool call events
pub const EVENT_LOGGER_NAME: &str = "course_assistant_core.events";
