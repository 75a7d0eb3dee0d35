//! Tool definitions for function calling.
//!
//! This module provides the abstractions for tools the model can invoke:
//! the [`Tool`] trait, the manifest entry [`ToolSchema`], closure-backed
//! [`FunctionTool`]s and the [`ToolError`] taxonomy.

mod base_tool;
mod error;
mod function_tool;

pub use base_tool::{SourceRef, Tool, ToolArguments, ToolSchema};
pub use error::ToolError;
pub use function_tool::{AsyncToolFunction, FunctionTool};
