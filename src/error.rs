use crate::engine::Engine;

/// Error types for the translation pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Transport-level failure (connect, DNS, timeout)
    Network(String),
    /// Non-success HTTP status or a response missing the expected fields.
    /// Carries the full engine-prefixed message shown to callers.
    BackendResponse(String),
    /// Required API key absent for the selected engine
    MissingCredential(Engine),
    /// Unrecognized engine selector; carries the offending value
    UnknownEngine(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::Network(msg) => write!(f, "{}", msg),
            TranslateError::BackendResponse(msg) => write!(f, "{}", msg),
            // These two cross the response channel verbatim, so the Display
            // output is the exact user-visible message.
            TranslateError::MissingCredential(engine) => {
                write!(f, "{} API key not configured", engine.display_name())
            }
            TranslateError::UnknownEngine(_) => write!(f, "Unknown translation engine"),
        }
    }
}

impl std::error::Error for TranslateError {}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::Network(err.to_string())
    }
}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;
