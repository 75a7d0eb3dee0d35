//! Bounded multi-round generation.

use std::sync::Arc;

use tracing::{debug, info};

use super::config::GeneratorConfig;
use super::prompt::compose_system_prompt;
use crate::error::{AssistantError, Result};
use crate::logging::LlmCallEvent;
use crate::models::{ChatCompletionClient, CreateResult, GenerationRequest, Message, ToolChoice};
use crate::tool_agent::{execute_tool_calls, ToolExecutor};
use crate::tools::ToolSchema;
use crate::EVENT_LOGGER_NAME;

/// Drives one query through the model, executing requested tools for at most
/// `max_tool_rounds` rounds.
///
/// All per-query state lives inside [`ResponseGenerator::generate`], so a
/// single generator can serve concurrent queries.
pub struct ResponseGenerator {
    client: Arc<dyn ChatCompletionClient>,
    config: GeneratorConfig,
}

impl ResponseGenerator {
    /// Create a generator after validating `config`
    pub fn new(client: Arc<dyn ChatCompletionClient>, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Answer `query`, optionally letting the model call tools.
    ///
    /// Tools are offered on the first call and on every follow-up except the
    /// last permitted one, which must be answered from the accumulated
    /// context. Tool failures are reported to the model as error results and
    /// never surface here.
    ///
    /// # Errors
    /// Returns [`AssistantError::Validation`] for a blank query and
    /// propagates any model backend failure unchanged.
    #[tracing::instrument(
        name = "generate",
        skip_all,
        fields(
            model = %self.config.model,
            tools = tools.map_or(0, <[ToolSchema]>::len),
            rounds = tracing::field::Empty,
        )
    )]
    pub async fn generate(
        &self,
        query: &str,
        conversation_summary: Option<&str>,
        tools: Option<&[ToolSchema]>,
        executor: Option<&dyn ToolExecutor>,
    ) -> Result<String> {
        if query.trim().is_empty() {
            return Err(AssistantError::validation("query must not be empty"));
        }

        let system = compose_system_prompt(conversation_summary);
        let tools = tools.filter(|t| !t.is_empty());
        let max_rounds = self.config.max_tool_rounds;

        let mut messages = vec![Message::user_text(query)];
        let mut response = self.call_model(0, &system, &messages, tools).await?;
        let mut rounds = 0;

        for round in 0..max_rounds {
            let Some(executor) = executor.filter(|_| response.requests_tool()) else {
                break;
            };

            let results = execute_tool_calls(executor, &response).await;
            messages.push(Message::assistant_blocks(response.content));
            if !results.is_empty() {
                messages.push(Message::tool_results(results));
            }

            let follow_up_tools = if round + 1 < max_rounds { tools } else { None };
            response = self
                .call_model(round + 1, &system, &messages, follow_up_tools)
                .await?;
            rounds += 1;
        }

        tracing::Span::current().record("rounds", rounds);
        Ok(self.final_text(&response))
    }

    async fn call_model(
        &self,
        round: usize,
        system: &str,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
    ) -> Result<CreateResult> {
        let request = GenerationRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            system: system.to_string(),
            messages: messages.to_vec(),
            tools: tools.map(<[ToolSchema]>::to_vec),
            tool_choice: tools.map(|_| ToolChoice::Auto),
        };

        debug!(target: "generator", round, messages = messages.len(), "Calling model");
        let response = self.client.create(&request).await?;

        let event = LlmCallEvent::new(
            round,
            request.messages.len(),
            request.has_tools(),
            response.stop_reason,
            response.usage.input_tokens,
            response.usage.output_tokens,
        );
        info!(target: EVENT_LOGGER_NAME, "{}", event);

        Ok(response)
    }

    fn final_text(&self, response: &CreateResult) -> String {
        match response.first_text() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => {
                debug!(target: "generator", stop_reason = ?response.stop_reason, "No text in final response");
                self.config.fallback_message.clone()
            }
        }
    }
}
