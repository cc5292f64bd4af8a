//! Message types for the gacha drive workspace
//!
//! - `drive`: progress events, the caller-facing outcome and the polling snapshot

pub mod drive;

pub use drive::{DriveEvent, DriveOutcome, ErrorCode, OperationState};
