pub mod error;
pub mod message;
pub mod mock;
pub mod openai;
pub mod provider;
pub mod settings;
pub mod tool;

pub use error::LlmError;
pub use message::{AssistantTurn, ChatMessage, ToolCall};
pub use openai::OpenAiProvider;
pub use provider::LlmProvider;
pub use settings::LlmSettings;
pub use tool::{ParamSpec, ParamType, ToolSchema};
