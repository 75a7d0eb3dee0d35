//! Base tool traits and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::error::ToolError;

/// Arguments supplied by the model for one tool invocation
pub type ToolArguments = Map<String, Value>;

/// Schema definition for a tool, as advertised to the model
///
/// Serializes to the Messages API tool definition shape:
/// `{"name": ..., "description": ..., "input_schema": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// The name of the tool
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the tool arguments
    pub input_schema: Value,
}

impl ToolSchema {
    /// Create a schema with an empty object for arguments
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    /// Add a property to the argument schema
    pub fn with_property(mut self, name: &str, schema: Value) -> Self {
        if let Some(props) = self
            .input_schema
            .get_mut("properties")
            .and_then(Value::as_object_mut)
        {
            props.insert(name.to_string(), schema);
        }
        self
    }

    /// Mark a property as required
    pub fn with_required(mut self, name: &str) -> Self {
        if let Some(required) = self
            .input_schema
            .get_mut("required")
            .and_then(Value::as_array_mut)
        {
            if !required.iter().any(|r| r.as_str() == Some(name)) {
                required.push(Value::String(name.to_string()));
            }
        }
        self
    }
}

/// A source a tool consulted while producing its result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl SourceRef {
    pub fn new(name: impl Into<String>, link: Option<String>) -> Self {
        Self {
            name: name.into(),
            link,
        }
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> &ToolSchema;

    /// Run the tool and render its result as text for the model
    async fn run(&self, args: &ToolArguments) -> Result<String, ToolError>;

    /// Drain the sources recorded by the most recent runs
    fn take_sources(&self) -> Vec<SourceRef> {
        Vec::new()
    }
}
