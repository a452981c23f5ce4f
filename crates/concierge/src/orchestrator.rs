//! The two-phase orchestration loop: send the query and tool catalog
//! to the model, execute whatever it asked for, then ask it to turn
//! the tool results into a final answer.

use std::sync::Arc;

use tracing::{debug, info, warn};

use concierge_llm::{ChatMessage, LlmProvider, ToolCall};

use crate::error::{CoreError, CoreResult};
use crate::tools::coerce::coerce_arguments;
use crate::tools::ToolRegistry;

const EMPTY_DECISION: &str = "(AI returned an empty response)";
const NO_FURTHER_RESPONSE: &str = "(AI had no further response)";

/// One orchestrator serves the whole process; each `handle_query` call
/// owns its conversation state and nothing outlives the request.
pub struct Orchestrator {
    provider: Option<Arc<dyn LlmProvider>>,
    registry: Option<ToolRegistry>,
}

impl Orchestrator {
    /// `provider: None` means the model client never initialized (every
    /// request fails). `registry: None` means tool infrastructure is
    /// unavailable and requests run in degraded, tools-disabled mode.
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, registry: Option<ToolRegistry>) -> Self {
        Self { provider, registry }
    }

    #[tracing::instrument(skip_all)]
    pub async fn handle_query(&self, query: &str) -> CoreResult<String> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CoreError::InvalidInput(
                "Request body must contain 'query'.".to_string(),
            ));
        }
        let provider = self.provider.as_ref().ok_or(CoreError::ModelUnavailable)?;

        let mut conversation = vec![ChatMessage::user(query)];

        let Some(registry) = &self.registry else {
            warn!("tool registry unavailable, handling as general chat");
            let turn = provider
                .complete(&conversation, None)
                .await
                .map_err(|e| CoreError::Decision(e.to_string()))?;
            return Ok(text_or(turn.content, EMPTY_DECISION));
        };

        let catalog = registry.catalog();
        let turn = provider
            .complete(&conversation, Some(&catalog))
            .await
            .map_err(|e| CoreError::Decision(e.to_string()))?;
        conversation.push(ChatMessage::from_turn(&turn));

        if turn.tool_calls.is_empty() {
            debug!("no tool calls requested, using initial response");
            return Ok(text_or(turn.content, EMPTY_DECISION));
        }

        info!(count = turn.tool_calls.len(), "tool calls requested");
        for call in &turn.tool_calls {
            let content = self.execute_call(registry, call).await;
            conversation.push(ChatMessage::tool(&call.id, &call.name, content));
        }

        let final_turn = provider
            .complete(&conversation, None)
            .await
            .map_err(|e| CoreError::Summary(e.to_string()))?;
        Ok(text_or(final_turn.content, NO_FURTHER_RESPONSE))
    }

    /// Resolves one tool call to its result text. Never fails: unknown
    /// names, bad arguments, and even panicking handlers all come back
    /// as text for the model to read.
    async fn execute_call(&self, registry: &ToolRegistry, call: &ToolCall) -> String {
        debug!(name = %call.name, id = %call.id, "executing tool call");
        let Some(tool) = registry.lookup(&call.name) else {
            warn!(name = %call.name, "model requested an unregistered tool");
            return format!("Error: Function '{}' not available.", call.name);
        };
        let args = match coerce_arguments(&call.arguments, &tool.schema) {
            Ok(args) => args,
            Err(message) => return format!("Error: Invalid arguments provided - {message}"),
        };
        match tokio::spawn((tool.handler)(args)).await {
            Ok(content) => content,
            Err(e) => format!("Error executing function: {e}"),
        }
    }
}

fn text_or(content: Option<String>, fallback: &str) -> String {
    content
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
