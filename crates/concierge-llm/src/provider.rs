use async_trait::async_trait;

use crate::error::LlmError;
use crate::message::{AssistantTurn, ChatMessage};
use crate::tool::ToolSchema;

/// An opaque model backend.
///
/// Offering `tools` implies `tool_choice=auto` semantics: the model may
/// answer directly, or request zero or more of the offered tools.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> Result<AssistantTurn, LlmError>;
}
