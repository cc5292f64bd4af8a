//! Drive operation messages
//!
//! Everything a caller sees from one drive operation: the ordered progress
//! events, the final outcome and the state snapshot used for UI polling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SharedError;
use crate::types::OperationId;

/// Progress event emitted while a drive operation runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveEvent {
    /// Operation accepted; emitted before the remote call is made
    Started,
    /// Cooldown countdown value, from the configured start down to zero
    CountdownTick { seconds_remaining: u32 },
    /// Remote call succeeded and the cooldown elapsed
    Succeeded { response: String },
    /// Remote call failed; no cooldown follows
    Failed { message: String },
    /// Terminal event after `Succeeded` or `Failed`, exactly once
    Completed,
    /// Operation was cancelled administratively; no `Completed` follows
    Cancelled,
}

impl DriveEvent {
    /// True for events after which the operation emits nothing further
    pub fn is_terminal(&self) -> bool {
        matches!(self, DriveEvent::Completed | DriveEvent::Cancelled)
    }
}

/// Stable error codes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    OperationInProgress,
    OperationCancelled,
    RemoteCallFailed,
    RemoteTimeout,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::OperationInProgress => "OPERATION_IN_PROGRESS",
            ErrorCode::OperationCancelled => "OPERATION_CANCELLED",
            ErrorCode::RemoteCallFailed => "REMOTE_CALL_FAILED",
            ErrorCode::RemoteTimeout => "REMOTE_TIMEOUT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPERATION_IN_PROGRESS" => Ok(ErrorCode::OperationInProgress),
            "OPERATION_CANCELLED" => Ok(ErrorCode::OperationCancelled),
            "REMOTE_CALL_FAILED" => Ok(ErrorCode::RemoteCallFailed),
            "REMOTE_TIMEOUT" => Ok(ErrorCode::RemoteTimeout),
            other => Err(SharedError::UnknownErrorCode { code: other.to_string() }),
        }
    }
}

/// Final result of one `execute_drive_operation` call
///
/// Busy rejections share this shape with every other failure; only `code`
/// tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canister_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<OperationId>,
}

impl DriveOutcome {
    pub fn succeeded(operation_id: OperationId, response: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Drive operation completed".to_string(),
            canister_response: Some(response.into()),
            error: None,
            code: None,
            operation_id: Some(operation_id),
        }
    }

    pub fn failed(operation_id: Option<OperationId>, code: ErrorCode, error: impl Into<String>) -> Self {
        let message = match code {
            ErrorCode::OperationInProgress => "Drive operation already in progress",
            ErrorCode::OperationCancelled => "Drive operation cancelled",
            ErrorCode::RemoteCallFailed | ErrorCode::RemoteTimeout => "Drive operation failed",
        };
        Self {
            success: false,
            message: message.to_string(),
            canister_response: None,
            error: Some(error.into()),
            code: Some(code),
            operation_id,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.code == Some(ErrorCode::OperationInProgress)
    }
}

/// Snapshot of orchestrator state for UI polling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationState {
    pub in_progress: bool,
    pub has_countdown: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_remaining: Option<u32>,
}
