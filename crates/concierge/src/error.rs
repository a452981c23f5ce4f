use std::fmt;

/// Unified error type for the concierge crate.
///
/// Tool-level failures never appear here: they are narrated back to
/// the model as tool result text. Only request-terminal conditions
/// become a `CoreError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid input provided by the caller.
    InvalidInput(String),
    /// The model backend client was never initialized.
    ModelUnavailable,
    /// The first model call (the tool decision) failed.
    Decision(String),
    /// The second model call (summarizing tool results) failed.
    Summary(String),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidInput(msg) => write!(f, "{msg}"),
            CoreError::ModelUnavailable => write!(f, "AI client is not initialized."),
            CoreError::Decision(msg) => {
                write!(f, "An error occurred during AI processing with tools: {msg}")
            }
            CoreError::Summary(msg) => {
                write!(f, "Error communicating with AI after tool use: {msg}")
            }
            CoreError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
