//! Shared types for the gacha drive workspace
//!
//! Contains the types that cross crate boundaries: the drive progress events,
//! the caller-facing outcome shape, process identity and logging setup.

pub mod types;
pub mod errors;
pub mod logging;
pub mod messages;

pub use types::*;
pub use errors::*;

pub use messages::{
    // Orchestrator → caller progress reporting
    DriveEvent,

    // Caller boundary result and polling snapshot
    DriveOutcome, ErrorCode, OperationState,
};
