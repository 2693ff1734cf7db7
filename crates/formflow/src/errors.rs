use std::time::Duration;

use thiserror::Error;

/// Backend-reported submission failure, shown as a dismissible banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Message from the backend, displayed verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("Request timed out. Please try again.")]
    TimedOut(Duration),
}

/// Failure of the read-only profile loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{0}")]
    Failed(String),
    #[error("Request timed out. Please try again.")]
    TimedOut(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}
