//! Query answering on top of a model backend and a tool executor.

mod config;
mod prompt;
mod response_generator;

pub use config::{GeneratorConfig, DEFAULT_FALLBACK_MESSAGE, DEFAULT_MODEL};
pub use prompt::{compose_system_prompt, SYSTEM_PROMPT};
pub use response_generator::ResponseGenerator;
