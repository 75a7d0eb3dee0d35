use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::executor::ToolExecutor;
use crate::tools::{SourceRef, Tool, ToolArguments, ToolError, ToolSchema};

/// Settings for [`ToolManager`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolManagerConfig {
    /// Upper bound on a single tool run
    pub per_tool_timeout_ms: u64,
    /// Check arguments against the tool's input schema before running it
    pub validate_arguments: bool,
}

impl Default for ToolManagerConfig {
    fn default() -> Self {
        Self {
            per_tool_timeout_ms: 30_000,
            validate_arguments: true,
        }
    }
}

struct RegisteredTool {
    tool: Arc<dyn Tool>,
    validator: Option<JSONSchema>,
}

/// Registry of the tools offered to the model.
///
/// Tools keep their registration order, which is also the order of the
/// manifest returned by [`ToolManager::tool_schemas`].
pub struct ToolManager {
    tools: Vec<RegisteredTool>,
    config: ToolManagerConfig,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(ToolManagerConfig::default())
    }
}

impl fmt::Debug for ToolManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolManager")
            .field("tools", &self.tool_names())
            .field("config", &self.config)
            .finish()
    }
}

impl ToolManager {
    pub fn new(config: ToolManagerConfig) -> Self {
        Self {
            tools: Vec::new(),
            config,
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        let validator = JSONSchema::compile(&tool.schema().input_schema).ok();
        if validator.is_none() {
            warn!(target: "tool_manager", tool = %name, "Input schema does not compile; arguments will not be validated");
        }

        let entry = RegisteredTool { tool, validator };
        match self.tools.iter().position(|t| t.tool.name() == name) {
            Some(pos) => {
                warn!(target: "tool_manager", tool = %name, "Replacing registered tool");
                self.tools[pos] = entry;
            }
            None => {
                info!(target: "tool_manager", tool = %name, "Registering tool");
                self.tools.push(entry);
            }
        }
    }

    /// The tool manifest, in registration order
    pub fn tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.tool.schema().clone()).collect()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.tool.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Drain the sources every tool recorded since the last call
    pub fn take_sources(&self) -> Vec<SourceRef> {
        self.tools.iter().flat_map(|t| t.tool.take_sources()).collect()
    }

    /// Discard recorded sources
    pub fn reset_sources(&self) {
        let dropped = self.take_sources().len();
        debug!(target: "tool_manager", dropped, "Sources reset");
    }

    fn find(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|t| t.tool.name() == name)
    }

    fn validate(entry: &RegisteredTool, arguments: &ToolArguments) -> Result<(), ToolError> {
        let Some(validator) = &entry.validator else {
            return Ok(());
        };
        let instance = Value::Object(arguments.clone());
        let result = match validator.validate(&instance) {
            Ok(()) => Ok(()),
            Err(errors) => {
                let messages: Vec<String> = errors
                    .map(|e| format!("{}: {}", e.instance_path, e))
                    .collect();
                Err(ToolError::InvalidArguments(messages.join("; ")))
            }
        };
        result
    }
}

#[async_trait]
impl ToolExecutor for ToolManager {
    #[tracing::instrument(name = "tool_manager.execute", skip(self, arguments), fields(tool.name = %name))]
    async fn execute(&self, name: &str, arguments: &ToolArguments) -> Result<String, ToolError> {
        let entry = self
            .find(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        if self.config.validate_arguments {
            Self::validate(entry, arguments)?;
        }

        debug!(target: "tool_manager", tool = %name, "Invoking tool");
        let timeout_ms = self.config.per_tool_timeout_ms;
        match timeout(Duration::from_millis(timeout_ms), entry.tool.run(arguments)).await {
            Ok(result) => result,
            Err(_) => Err(ToolError::Timeout {
                tool: name.to_string(),
                timeout_ms,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::FunctionTool;
    use serde_json::json;
    use std::sync::Mutex;

    fn search_tool() -> Arc<dyn Tool> {
        Arc::new(FunctionTool::from_fn(
            ToolSchema::new("search_course_content", "Search course materials")
                .with_property("query", json!({"type": "string"}))
                .with_property("lesson_number", json!({"type": "integer"}))
                .with_required("query"),
            |args| async move {
                let query = args.get("query").and_then(Value::as_str).unwrap_or_default();
                Ok(format!("results for {}", query))
            },
        ))
    }

    fn args(value: Value) -> ToolArguments {
        value.as_object().cloned().unwrap_or_default()
    }

    struct CitingTool {
        schema: ToolSchema,
        sources: Mutex<Vec<SourceRef>>,
    }

    #[async_trait]
    impl Tool for CitingTool {
        fn name(&self) -> &str {
            &self.schema.name
        }

        fn description(&self) -> &str {
            &self.schema.description
        }

        fn schema(&self) -> &ToolSchema {
            &self.schema
        }

        async fn run(&self, _args: &ToolArguments) -> Result<String, ToolError> {
            self.sources.lock().unwrap().push(SourceRef::new(
                "Course A - Lesson 2",
                Some("https://example.com/a/2".into()),
            ));
            Ok("passage".to_string())
        }

        fn take_sources(&self) -> Vec<SourceRef> {
            std::mem::take(&mut *self.sources.lock().unwrap())
        }
    }

    #[tokio::test]
    async fn test_execute_registered_tool() {
        let mut manager = ToolManager::default();
        manager.register(search_tool());

        let out = manager.execute("search_course_content", &args(json!({"query": "AI"}))).await;
        assert_eq!(out.unwrap(), "results for AI");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let manager = ToolManager::default();
        let err = manager.execute("nope", &ToolArguments::new()).await.unwrap_err();
        assert_eq!(err, ToolError::NotFound("nope".into()));
    }

    #[tokio::test]
    async fn test_invalid_arguments_rejected() {
        let mut manager = ToolManager::default();
        manager.register(search_tool());

        let err = manager
            .execute("search_course_content", &args(json!({"lesson_number": "two"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_validation_can_be_disabled() {
        let mut manager = ToolManager::new(ToolManagerConfig {
            validate_arguments: false,
            ..ToolManagerConfig::default()
        });
        manager.register(search_tool());

        let out = manager.execute("search_course_content", &ToolArguments::new()).await;
        assert_eq!(out.unwrap(), "results for ");
    }

    #[tokio::test]
    async fn test_slow_tool_times_out() {
        let mut manager = ToolManager::new(ToolManagerConfig {
            per_tool_timeout_ms: 20,
            ..ToolManagerConfig::default()
        });
        manager.register(Arc::new(FunctionTool::from_fn(
            ToolSchema::new("get_course_outline", "Outline lookup"),
            |_args| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok("too late".to_string())
            },
        )));

        let err = manager.execute("get_course_outline", &ToolArguments::new()).await.unwrap_err();
        assert_eq!(
            err,
            ToolError::Timeout {
                tool: "get_course_outline".into(),
                timeout_ms: 20
            }
        );
    }

    #[tokio::test]
    async fn test_manifest_keeps_registration_order_and_replaces() {
        let mut manager = ToolManager::default();
        manager.register(Arc::new(FunctionTool::from_fn(
            ToolSchema::new("get_course_outline", "v1"),
            |_args| async { Ok(String::new()) },
        )));
        manager.register(search_tool());
        manager.register(Arc::new(FunctionTool::from_fn(
            ToolSchema::new("get_course_outline", "v2"),
            |_args| async { Ok(String::new()) },
        )));

        let schemas = manager.tool_schemas();
        assert_eq!(manager.len(), 2);
        assert_eq!(schemas[0].name, "get_course_outline");
        assert_eq!(schemas[0].description, "v2");
        assert_eq!(schemas[1].name, "search_course_content");
    }

    #[tokio::test]
    async fn test_sources_side_channel() {
        let mut manager = ToolManager::default();
        manager.register(Arc::new(CitingTool {
            schema: ToolSchema::new("search_course_content", "Search"),
            sources: Mutex::new(Vec::new()),
        }));

        manager.execute("search_course_content", &ToolArguments::new()).await.unwrap();
        let sources = manager.take_sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "Course A - Lesson 2");
        assert!(manager.take_sources().is_empty());

        manager.execute("search_course_content", &ToolArguments::new()).await.unwrap();
        manager.reset_sources();
        assert!(manager.take_sources().is_empty());
    }
}
