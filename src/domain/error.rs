// src/domain/error.rs
use std::fmt;
use thiserror::Error;

/// Category of a failed operation, independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    ClipboardUnavailable,
    DecodeError,
    EmptyBuffer,
    UnknownBrowser,
    LaunchError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::ClipboardUnavailable => "clipboard unavailable",
            FailureKind::DecodeError => "decode error",
            FailureKind::EmptyBuffer => "empty buffer",
            FailureKind::UnknownBrowser => "unknown browser",
            FailureKind::LaunchError => "launch error",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    ClipboardUnavailable(String),

    #[error("{0}")]
    DecodeError(String),

    #[error("{0}")]
    EmptyBuffer(String),

    #[error("{0}")]
    UnknownBrowser(String),

    #[error("{0}")]
    LaunchError(String),
}

impl DomainError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DomainError::ClipboardUnavailable(_) => FailureKind::ClipboardUnavailable,
            DomainError::DecodeError(_) => FailureKind::DecodeError,
            DomainError::EmptyBuffer(_) => FailureKind::EmptyBuffer,
            DomainError::UnknownBrowser(_) => FailureKind::UnknownBrowser,
            DomainError::LaunchError(_) => FailureKind::LaunchError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DomainError::ClipboardUnavailable(msg)
            | DomainError::DecodeError(msg)
            | DomainError::EmptyBuffer(msg)
            | DomainError::UnknownBrowser(msg)
            | DomainError::LaunchError(msg) => msg,
        }
    }

    pub fn empty_buffer() -> Self {
        DomainError::EmptyBuffer("empty buffer".to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_error_when_displayed_then_only_message_shown() {
        let err = DomainError::LaunchError("firefox subprocess error: exit 3".to_string());
        assert_eq!(err.kind(), FailureKind::LaunchError);
        assert_eq!(err.to_string(), "firefox subprocess error: exit 3");
    }

    #[test]
    fn given_empty_buffer_when_displayed_then_message_matches() {
        let err = DomainError::empty_buffer();
        assert_eq!(err.kind(), FailureKind::EmptyBuffer);
        assert_eq!(err.message(), "empty buffer");
    }
}
