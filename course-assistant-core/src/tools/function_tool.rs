//! Function tool implementation for wrapping Rust closures as tools.

use std::future::Future;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};

use super::base_tool::{Tool, ToolArguments, ToolSchema};
use super::error::ToolError;

/// Type alias for async function that can be called by the tool
pub type AsyncToolFunction =
    Box<dyn Fn(ToolArguments) -> BoxFuture<'static, Result<String, ToolError>> + Send + Sync>;

/// Create custom tools by wrapping Rust closures.
///
/// # Example
///
/// ```rust
/// use course_assistant_core::tools::{FunctionTool, Tool, ToolArguments, ToolSchema};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let echo = FunctionTool::from_fn(
///     ToolSchema::new("echo", "Repeat the input")
///         .with_property("text", json!({"type": "string"}))
///         .with_required("text"),
///     |args| async move {
///         Ok(args.get("text").and_then(|v| v.as_str()).unwrap_or_default().to_string())
///     },
/// );
///
/// let mut args = ToolArguments::new();
/// args.insert("text".to_string(), json!("hello"));
/// assert_eq!(echo.run(&args).await?, "hello");
/// # Ok(())
/// # }
/// ```
pub struct FunctionTool {
    schema: ToolSchema,
    function: AsyncToolFunction,
}

impl FunctionTool {
    /// Create a new function tool
    ///
    /// # Arguments
    /// * `schema` - Name, description and argument schema advertised to the model
    /// * `function` - The async function to execute
    pub fn new(schema: ToolSchema, function: AsyncToolFunction) -> Self {
        Self { schema, function }
    }

    /// Create a function tool from any async closure
    pub fn from_fn<F, Fut>(schema: ToolSchema, f: F) -> Self
    where
        F: Fn(ToolArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        Self::new(schema, Box::new(move |args| f(args).boxed()))
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.schema.name
    }

    fn description(&self) -> &str {
        &self.schema.description
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    async fn run(&self, args: &ToolArguments) -> Result<String, ToolError> {
        (self.function)(args.clone()).await
    }
}
