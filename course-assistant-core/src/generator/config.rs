use serde::{Deserialize, Serialize};

use crate::error::{AssistantError, Result};

/// Default model identifier
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Returned when the final response carries no usable text
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "I wasn't able to generate a response. Please try rephrasing your question.";

/// Parameters shared by every model call of a generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Upper bound on tool-execution rounds per query
    pub max_tool_rounds: usize,
    pub fallback_message: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: 800,
            max_tool_rounds: 2,
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    /// Check the configuration before it is used
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AssistantError::Config("model must not be empty".into()));
        }
        if self.max_tool_rounds == 0 {
            return Err(AssistantError::Config("max_tool_rounds must be at least 1".into()));
        }
        if self.max_tokens == 0 {
            return Err(AssistantError::Config("max_tokens must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(AssistantError::Config(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}
