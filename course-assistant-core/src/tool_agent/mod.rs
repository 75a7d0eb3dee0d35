//! Tool execution for the generator.
//!
//! This module provides the [`ToolExecutor`] boundary, the functions that turn
//! tool outcomes into result blocks, and [`ToolManager`], the registry that
//! backs the executor in production.

mod executor;
mod tool_manager;

pub use executor::{execute_tool_calls, run_tool_call, ToolExecutor};
#[cfg(test)]
pub use executor::MockToolExecutor;
pub use tool_manager::{ToolManager, ToolManagerConfig};
