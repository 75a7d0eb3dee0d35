//! Layered configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `COURSE_ASSISTANT__`, using `__` as the
//! section separator:
//!
//! ```text
//! COURSE_ASSISTANT__GENERATOR__MAX_TOOL_ROUNDS=3
//! COURSE_ASSISTANT__LOGGING__JSON=true
//! ```

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AssistantError, Result};
use crate::generator::GeneratorConfig;
use crate::logging::LoggingConfig;
#[cfg(feature = "http")]
use crate::models::AnthropicConfig;
use crate::tool_agent::ToolManagerConfig;

pub const ENV_PREFIX: &str = "COURSE_ASSISTANT";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generator: GeneratorConfig,
    #[cfg(feature = "http")]
    pub anthropic: AnthropicConfig,
    pub tools: ToolManagerConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from an optional TOML file and the environment.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!(target: "settings", path = %path.display(), "Reading settings file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        if self.tools.per_tool_timeout_ms == 0 {
            return Err(AssistantError::Config("tools.per_tool_timeout_ms must be positive".into()));
        }
        Ok(())
    }
}
