//! Orchestrator-specific error types

use shared::{ErrorCode, SharedError};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Drive operation already in progress")]
    OperationInProgress,

    #[error("Drive operation cancelled")]
    OperationCancelled,

    #[error("{message}")]
    RemoteCallFailed { message: String },

    #[error("Remote call timed out after {timeout:?}")]
    RemoteTimeout { timeout: Duration },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Network communication error: {message}")]
    NetworkError { message: String },

    #[error("Shared component error")]
    SharedError(#[from] SharedError),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl DriveError {
    /// Create a remote failure carrying the message surfaced by the endpoint
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteCallFailed { message: message.into() }
    }

    /// Create a configuration error for the named field
    pub fn config(field: impl Into<String>) -> Self {
        Self::ConfigurationError { field: field.into() }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError { message: message.into() }
    }

    /// Wire code reported to callers in a failed `DriveOutcome`
    pub fn code(&self) -> ErrorCode {
        match self {
            DriveError::OperationInProgress => ErrorCode::OperationInProgress,
            DriveError::OperationCancelled => ErrorCode::OperationCancelled,
            DriveError::RemoteTimeout { .. } => ErrorCode::RemoteTimeout,
            _ => ErrorCode::RemoteCallFailed,
        }
    }
}

pub type DriveResult<T> = Result<T, DriveError>;
