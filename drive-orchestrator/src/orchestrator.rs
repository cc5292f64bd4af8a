//! Single-flight drive orchestrator
//!
//! Accepts at most one drive operation at a time, performs the remote call,
//! then holds the guard through a fixed countdown before the next call may
//! start. Progress goes to a caller-supplied [`DriveObserver`]; the awaited
//! [`DriveOutcome`] summarises the same result.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures_util::FutureExt;
use shared::{process_debug, process_info, process_warn, DriveEvent, DriveOutcome, ErrorCode, OperationId, OperationState, ProcessId};
use tokio::sync::oneshot;

use crate::{
    config::DriveSettings,
    core::{Admission, DriveObserver, DriveState},
    error::{DriveError, DriveResult},
    traits::CanisterClient,
};

/// Drive orchestrator with an injected canister client
pub struct DriveOrchestrator<C>
where
    C: CanisterClient + 'static,
{
    client: C,
    settings: DriveSettings,

    /// Guard state. Only locked for synchronous transitions, never across an await.
    state: Mutex<DriveState>,
}

/// Releases the guard if the operation future is dropped before finishing
struct InFlightGuard<'a> {
    state: &'a Mutex<DriveState>,
    generation: u64,
}

impl InFlightGuard<'_> {
    /// Release the guard now. Returns false if the operation was cancelled meanwhile.
    fn release(&self) -> bool {
        lock(self.state).finish(self.generation)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).finish(self.generation);
    }
}

fn lock(state: &Mutex<DriveState>) -> MutexGuard<'_, DriveState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marker for an operation interrupted by `cancel_operation`
struct Cancelled;

impl<C> DriveOrchestrator<C>
where
    C: CanisterClient + 'static,
{
    /// Create an idle orchestrator
    pub fn new(client: C, settings: DriveSettings) -> Self {
        Self {
            client,
            settings,
            state: Mutex::new(DriveState::new()),
        }
    }

    pub fn settings(&self) -> &DriveSettings {
        &self.settings
    }

    /// Run one drive operation
    ///
    /// Returns immediately with an `OPERATION_IN_PROGRESS` failure, and
    /// without notifying `observer`, if another operation holds the guard.
    /// Otherwise events follow `Started`, the countdown ticks, then
    /// `Succeeded` and `Completed`; or `Started`, `Failed`, `Completed` when
    /// the remote call fails.
    pub async fn execute_drive_operation<O>(&self, token: &str, mut observer: O) -> DriveOutcome
    where
        O: DriveObserver,
    {
        let operation_id = OperationId::new();

        // Check and claim without any suspension point in between.
        let admission = self.lock_state().try_begin(operation_id);
        let Admission {
            generation,
            mut cancel_rx,
            ..
        } = match admission {
            Ok(admission) => admission,
            Err(err) => {
                process_warn!(ProcessId::current(), "⏳ Drive rejected: {}", err);
                return DriveOutcome::failed(None, err.code(), err.to_string());
            }
        };
        let guard = InFlightGuard {
            state: &self.state,
            generation,
        };

        process_info!(ProcessId::current(), operation = %operation_id, "🚗 Drive operation started");
        observer.notify(DriveEvent::Started);

        let response = match self.remote_phase(token, &mut cancel_rx).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                guard.release();
                let message = err.to_string();
                process_warn!(ProcessId::current(), operation = %operation_id, "❌ Drive call failed: {}", message);
                observer.notify(DriveEvent::Failed { message: message.clone() });
                observer.notify(DriveEvent::Completed);
                return DriveOutcome::failed(Some(operation_id), err.code(), message);
            }
            Err(Cancelled) => return self.cancelled(operation_id, &mut observer),
        };

        process_debug!(ProcessId::current(), operation = %operation_id, "📨 Canister responded, starting cooldown");

        if let Err(Cancelled) = self.countdown(generation, &mut cancel_rx, &mut observer).await {
            return self.cancelled(operation_id, &mut observer);
        }

        if !guard.release() {
            return self.cancelled(operation_id, &mut observer);
        }

        process_info!(ProcessId::current(), operation = %operation_id, "✅ Drive operation completed");
        observer.notify(DriveEvent::Succeeded {
            response: response.clone(),
        });
        observer.notify(DriveEvent::Completed);
        DriveOutcome::succeeded(operation_id, response)
    }

    /// Await the remote call unless cancellation arrives first
    async fn remote_phase(
        &self,
        token: &str,
        cancel_rx: &mut oneshot::Receiver<()>,
    ) -> Result<DriveResult<String>, Cancelled> {
        let call = AssertUnwindSafe(self.call_remote(token)).catch_unwind();

        tokio::select! {
            biased;
            _ = cancel_rx => Err(Cancelled),
            result = call => Ok(result.unwrap_or_else(|panic| Err(DriveError::remote(panic_message(panic))))),
        }
    }

    async fn call_remote(&self, token: &str) -> DriveResult<String> {
        match self.settings.call_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.client.gacha_drive(token))
                .await
                .unwrap_or(Err(DriveError::RemoteTimeout { timeout })),
            None => self.client.gacha_drive(token).await,
        }
    }

    /// Count down from the configured cooldown to zero, one tick per interval
    async fn countdown<O>(
        &self,
        generation: u64,
        cancel_rx: &mut oneshot::Receiver<()>,
        observer: &mut O,
    ) -> Result<(), Cancelled>
    where
        O: DriveObserver,
    {
        let mut remaining = self.settings.cooldown_secs;

        let counting = self.lock_state().start_countdown(generation, remaining);
        if !counting {
            return Err(Cancelled);
        }
        observer.notify(DriveEvent::CountdownTick {
            seconds_remaining: remaining,
        });

        while remaining > 0 {
            tokio::select! {
                biased;
                _ = &mut *cancel_rx => return Err(Cancelled),
                _ = tokio::time::sleep(self.settings.tick_interval) => {}
            }

            remaining -= 1;
            let current = self.lock_state().tick(generation, remaining);
            if !current {
                return Err(Cancelled);
            }
            observer.notify(DriveEvent::CountdownTick {
                seconds_remaining: remaining,
            });
        }

        Ok(())
    }

    fn cancelled<O>(&self, operation_id: OperationId, observer: &mut O) -> DriveOutcome
    where
        O: DriveObserver,
    {
        process_info!(ProcessId::current(), operation = %operation_id, "🛑 Drive operation cancelled");
        observer.notify(DriveEvent::Cancelled);
        DriveOutcome::failed(
            Some(operation_id),
            ErrorCode::OperationCancelled,
            DriveError::OperationCancelled.to_string(),
        )
    }

    /// Whether an operation currently holds the guard
    pub fn is_in_progress(&self) -> bool {
        self.lock_state().is_in_progress()
    }

    /// Force the orchestrator back to idle
    ///
    /// Stops any active countdown. The interrupted operation emits
    /// `Cancelled` instead of `Succeeded`/`Completed`. Returns false when
    /// nothing was running.
    pub fn cancel_operation(&self) -> bool {
        let cancelled = self.lock_state().cancel();
        match cancelled {
            Some(operation_id) => {
                process_info!(ProcessId::current(), operation = %operation_id, "🛑 Cancel requested");
                true
            }
            None => {
                process_debug!(ProcessId::current(), "Cancel requested with no active drive operation");
                false
            }
        }
    }

    /// Snapshot for UI polling
    pub fn get_operation_state(&self) -> OperationState {
        self.lock_state().snapshot()
    }

    fn lock_state(&self) -> MutexGuard<'_, DriveState> {
        lock(&self.state)
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "remote call panicked".to_string()
    }
}
