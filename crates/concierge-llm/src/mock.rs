//! Queue-based mock provider for tests.
//!
//! Push scripted turns or errors; each `complete` call pops the front
//! of the queue and records what it was asked, so tests can assert on
//! the exact conversation the orchestrator sent.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::message::{AssistantTurn, ChatMessage};
use crate::provider::LlmProvider;
use crate::tool::ToolSchema;

/// One recorded `complete` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub tools_offered: bool,
}

#[derive(Default)]
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<AssistantTurn, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_turn(&self, turn: AssistantTurn) {
        self.responses
            .lock()
            .expect("mock response queue poisoned")
            .push_back(Ok(turn));
    }

    pub fn queue_error(&self, error: LlmError) {
        self.responses
            .lock()
            .expect("mock response queue poisoned")
            .push_back(Err(error));
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> Result<AssistantTurn, LlmError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(RecordedCall {
                messages: messages.to_vec(),
                tools_offered: tools.is_some(),
            });
        self.responses
            .lock()
            .expect("mock response queue poisoned")
            .pop_front()
            .expect("mock provider response queue is empty")
    }
}
