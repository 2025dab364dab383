//! User-facing notifications

use crate::error::PanelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Error notice for a failed action, prefixed with what was attempted
    pub fn failed(action: &str, error: &PanelError) -> Self {
        match error {
            // Validation messages already say what to fix.
            PanelError::Validation(msg) => Self::warning(msg.clone()),
            PanelError::Backend(msg) => Self::warning(format!("{}: {}", action, msg)),
            other => Self::error(format!("{}: {}", action, other)),
        }
    }
}
