//! Error types shared by the panel, the bridge client and the front ends

/// Everything that can stop a single user action.
///
/// Payloads are plain strings so the error can travel inside iced messages,
/// which must be `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    /// Input rejected before any backend call was made
    #[error("{0}")]
    Validation(String),

    /// Host bridge unreachable, non-2xx reply, or similar plumbing failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered but reported a logical failure
    #[error("{0}")]
    Backend(String),

    /// Reply body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl PanelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// True for failures caught before the bridge was contacted
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<reqwest::Error> for PanelError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

impl From<std::io::Error> for PanelError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;
