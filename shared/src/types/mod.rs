//! Core types used throughout the drive workspace

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Identifier of the running component, attached to every log line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// Library-side drive orchestrator (default when nothing was initialised)
    Orchestrator,
    /// Command-line driver process
    Cli,
}

impl ProcessId {
    /// Initialize the global process ID for the command-line driver
    pub fn init_cli() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Cli)
    }

    /// Get the global process ID.
    ///
    /// Falls back to `Orchestrator` so library code can log from tests that
    /// never call an `init_*` function.
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&ProcessId::Orchestrator)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Orchestrator => write!(f, "orchestrator"),
            ProcessId::Cli => write!(f, "cli"),
        }
    }
}

/// Unique identifier for one accepted drive operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(Uuid);

impl OperationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> SharedResult<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| SharedError::InvalidOperationId { input: s.to_string() })
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
