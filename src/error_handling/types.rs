//! Error type definitions.
//!
//! This module defines the error enums used throughout the application and the
//! failure categories counted during a run.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Outcome of a single failed publish call.
///
/// The variant decides how the retry controller and orchestrator react:
/// `Rejected` and `Transport` are retried, `Configuration` fails the post
/// immediately, `Fatal` aborts the whole destination.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The destination refused or did not accept the post.
    #[error("post rejected: {0}")]
    Rejected(String),

    /// Network-level failure talking to the destination.
    #[error("transport error: {0}")]
    Transport(#[from] ReqwestError),

    /// The request cannot succeed against this destination as configured
    /// (missing credentials, malformed destination URL).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Unrecoverable failure for this destination (crashed session, broken adapter).
    #[error("fatal error: {0}")]
    Fatal(String),

    /// The run was cancelled while a post was waiting to retry.
    #[error("cancelled")]
    Cancelled,
}

impl PublishError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, PublishError::Rejected(_) | PublishError::Transport(_))
    }

    /// Failure category used for run statistics.
    pub fn failure_type(&self) -> FailureType {
        match self {
            PublishError::Rejected(_) => FailureType::Rejected,
            PublishError::Transport(e) if e.is_timeout() => FailureType::Timeout,
            PublishError::Transport(_) => FailureType::Transport,
            PublishError::Configuration(_) => FailureType::Configuration,
            PublishError::Fatal(_) => FailureType::Fatal,
            PublishError::Cancelled => FailureType::Cancelled,
        }
    }
}

/// Error types for loading a destination catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors for a publish request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("video URL is invalid: {0}")]
    InvalidVideoUrl(String),

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("postsPerSite must be between 1 and {max}, got {actual}")]
    PostsPerSiteOutOfRange { actual: u32, max: u32 },
}

/// Failure categories counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureType {
    /// Destination refused the post
    Rejected,
    /// Network error other than a timeout
    Transport,
    /// Request timed out
    Timeout,
    /// Post failed without retries because of a configuration problem
    Configuration,
    /// Destination aborted by a fatal error
    Fatal,
    /// Destination aborted by a panic
    Panic,
    /// Posts skipped because the run was cancelled
    Cancelled,
}

impl std::fmt::Display for FailureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureType::Rejected => "Post rejected",
            FailureType::Transport => "Transport error",
            FailureType::Timeout => "Request timeout",
            FailureType::Configuration => "Configuration error",
            FailureType::Fatal => "Destination aborted (fatal error)",
            FailureType::Panic => "Destination aborted (panic)",
            FailureType::Cancelled => "Cancelled",
        }
    }
}
