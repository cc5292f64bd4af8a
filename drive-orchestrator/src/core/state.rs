//! Drive guard state
//!
//! Pure state management for the single-flight guard and the cooldown
//! countdown. Nothing here suspends, so every transition is atomic with
//! respect to other callers once the surrounding lock is held.

use shared::{OperationId, OperationState};
use tokio::sync::oneshot;

use crate::error::{DriveError, DriveResult};

/// Bookkeeping for the operation currently holding the guard
#[derive(Debug)]
struct ActiveOperation {
    generation: u64,
    operation_id: OperationId,
    cancel_tx: Option<oneshot::Sender<()>>,
    /// Seconds remaining; `Some` iff the countdown is ticking
    countdown: Option<u32>,
}

/// Ticket handed to the accepted caller
#[derive(Debug)]
pub struct Admission {
    pub generation: u64,
    pub operation_id: OperationId,
    pub cancel_rx: oneshot::Receiver<()>,
}

/// Guard flag plus countdown handle for one orchestrator instance
#[derive(Debug, Default)]
pub struct DriveState {
    in_progress: bool,
    generation: u64,
    active: Option<ActiveOperation>,
}

impl DriveState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the guard and claim it in one step
    pub fn try_begin(&mut self, operation_id: OperationId) -> DriveResult<Admission> {
        if self.in_progress {
            return Err(DriveError::OperationInProgress);
        }

        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.generation += 1;
        self.in_progress = true;
        self.active = Some(ActiveOperation {
            generation: self.generation,
            operation_id,
            cancel_tx: Some(cancel_tx),
            countdown: None,
        });

        Ok(Admission {
            generation: self.generation,
            operation_id,
            cancel_rx,
        })
    }

    /// Whether `generation` still owns the guard
    pub fn is_current(&self, generation: u64) -> bool {
        self.active.as_ref().is_some_and(|op| op.generation == generation)
    }

    /// Enter `Counting(seconds)`. Returns false if the operation was cancelled.
    pub fn start_countdown(&mut self, generation: u64, seconds: u32) -> bool {
        self.set_countdown(generation, seconds)
    }

    /// Record a countdown tick. Returns false if the operation was cancelled.
    pub fn tick(&mut self, generation: u64, remaining: u32) -> bool {
        self.set_countdown(generation, remaining)
    }

    fn set_countdown(&mut self, generation: u64, seconds: u32) -> bool {
        match self.active.as_mut() {
            Some(op) if op.generation == generation => {
                op.countdown = Some(seconds);
                true
            }
            _ => false,
        }
    }

    /// Release the guard held by `generation`
    ///
    /// A stale generation is ignored so a late finisher never clears the
    /// state of a newer operation.
    pub fn finish(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.active = None;
        self.in_progress = false;
        true
    }

    /// Force the guard open, signalling the active operation if there is one
    pub fn cancel(&mut self) -> Option<OperationId> {
        let was_in_progress = self.in_progress;
        self.in_progress = false;

        let op = self.active.take()?;
        if let Some(tx) = op.cancel_tx {
            // Receiver already gone means the caller future was dropped.
            let _ = tx.send(());
        }
        was_in_progress.then_some(op.operation_id)
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn active_operation(&self) -> Option<OperationId> {
        self.active.as_ref().map(|op| op.operation_id)
    }

    /// Snapshot for UI polling
    pub fn snapshot(&self) -> OperationState {
        let seconds_remaining = self.active.as_ref().and_then(|op| op.countdown);
        OperationState {
            in_progress: self.in_progress,
            has_countdown: seconds_remaining.is_some(),
            seconds_remaining,
        }
    }
}
