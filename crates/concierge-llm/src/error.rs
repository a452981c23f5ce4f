use std::fmt;

/// Unified error type for model-backend calls.
///
/// Every variant renders to a user-facing string; the orchestration
/// layer decides whether a failure is terminal for the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// No API key was configured for the backend.
    MissingApiKey,
    /// The request never produced a usable HTTP response (DNS, TLS, timeout).
    Transport(String),
    /// The backend rejected the credentials (401/403).
    Auth(String),
    /// The backend answered with a non-success status.
    Api { status: u16, detail: String },
    /// The response body could not be interpreted.
    Parse(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::MissingApiKey => write!(f, "missing LLM API key"),
            LlmError::Transport(msg) => write!(f, "transport error: {msg}"),
            LlmError::Auth(msg) => write!(f, "invalid model backend credentials: {msg}"),
            LlmError::Api { status, detail } => {
                write!(f, "model backend returned status {status}: {detail}")
            }
            LlmError::Parse(msg) => write!(f, "malformed model backend response: {msg}"),
        }
    }
}

impl std::error::Error for LlmError {}
