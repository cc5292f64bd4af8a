//! Trait definitions with mockall annotations for testing
//!
//! The remote canister is the orchestrator's only external collaborator. It is
//! injected through this trait so tests can substitute a mock.

use crate::error::DriveResult;

/// Remote "gacha drive" call boundary
///
/// Implementations take an opaque authorization token and return the opaque
/// canister response. The wire format belongs to the implementation.
#[mockall::automock]
#[async_trait::async_trait]
pub trait CanisterClient: Send + Sync {
    /// Perform one drive call with the caller's token
    ///
    /// # Returns
    /// The raw response string from the canister, or the remote failure
    async fn gacha_drive(&self, token: &str) -> DriveResult<String>;
}

#[async_trait::async_trait]
impl<T: CanisterClient + ?Sized> CanisterClient for std::sync::Arc<T> {
    async fn gacha_drive(&self, token: &str) -> DriveResult<String> {
        (**self).gacha_drive(token).await
    }
}
