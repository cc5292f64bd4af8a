//! Drive orchestrator library
//!
//! Guards a remote "gacha drive" canister call so that at most one runs at a
//! time, enforces a post-call cooldown, and streams progress to callers.

pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{DriveCallbacks, DriveObserver, DriveState};
pub use config::{DriveConfig, DriveSettings};
pub use error::{DriveError, DriveResult};
pub use orchestrator::DriveOrchestrator;
pub use traits::{CanisterClient, MockCanisterClient};
