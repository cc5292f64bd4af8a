//! Test helpers and builder patterns for drive orchestrator tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use drive_orchestrator::{CanisterClient, DriveCallbacks, DriveOrchestrator, DriveSettings};
use tokio::time::Instant;

use super::fixtures::TestFixtures;

/// Builder for orchestrators with test-friendly defaults
pub struct OrchestratorBuilder {
    settings: DriveSettings,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            settings: DriveSettings {
                cooldown_secs: TestFixtures::DEFAULT_COOLDOWN,
                ..DriveSettings::default()
            },
        }
    }

    pub fn with_cooldown(mut self, secs: u32) -> Self {
        self.settings.cooldown_secs = secs;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.settings.tick_interval = interval;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.settings.call_timeout = Some(timeout);
        self
    }

    pub fn build<C: CanisterClient + 'static>(self, client: C) -> DriveOrchestrator<C> {
        DriveOrchestrator::new(client, self.settings)
    }

    pub fn build_shared<C: CanisterClient + 'static>(self, client: C) -> Arc<DriveOrchestrator<C>> {
        Arc::new(self.build(client))
    }
}

/// Callback log entry: time since the log was created, and the rendered call
pub type Entry = (Duration, String);

/// Thread-safe record of callback invocations
#[derive(Clone)]
pub struct EventLog {
    origin: Instant,
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(&self, entry: String) {
        let elapsed = self.origin.elapsed();
        self.entries.lock().unwrap().push((elapsed, entry));
    }

    /// Callback set recording every handler invocation into this log
    pub fn callbacks(&self) -> DriveCallbacks {
        let (start, success, error, tick, complete, cancelled) =
            (self.clone(), self.clone(), self.clone(), self.clone(), self.clone(), self.clone());

        DriveCallbacks::new()
            .on_start(move || start.push("onStart()".to_string()))
            .on_success(move |r| success.push(format!("onSuccess({r})")))
            .on_error(move |m| error.push(format!("onError({m})")))
            .on_countdown_update(move |n| tick.push(format!("onCountdownUpdate({n})")))
            .on_complete(move || complete.push("onComplete()".to_string()))
            .on_cancelled(move || cancelled.push("onCancelled()".to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.lock().unwrap().iter().map(|(_, name)| name.clone()).collect()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.names().iter().filter(|n| n.as_str() == name).count()
    }

    pub fn countdown_values(&self) -> Vec<u32> {
        self.names()
            .iter()
            .filter_map(|n| {
                n.strip_prefix("onCountdownUpdate(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .and_then(|v| v.parse().ok())
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

/// Assertion helpers
pub struct TestHelpers;

impl TestHelpers {
    /// Full callback sequence expected for a successful drive
    pub fn success_sequence(cooldown: u32, response: &str) -> Vec<String> {
        let mut expected = vec!["onStart()".to_string()];
        expected.extend(
            TestFixtures::countdown(cooldown)
                .into_iter()
                .map(|n| format!("onCountdownUpdate({n})")),
        );
        expected.push(format!("onSuccess({response})"));
        expected.push("onComplete()".to_string());
        expected
    }

    /// Full callback sequence expected for a failed drive
    pub fn failure_sequence(message: &str) -> Vec<String> {
        vec![
            "onStart()".to_string(),
            format!("onError({message})"),
            "onComplete()".to_string(),
        ]
    }

    /// Assert the orchestrator is idle with no countdown
    pub fn assert_idle<C: CanisterClient + 'static>(orchestrator: &DriveOrchestrator<C>) {
        assert!(!orchestrator.is_in_progress(), "orchestrator should be idle");
        let state = orchestrator.get_operation_state();
        assert!(!state.in_progress);
        assert!(!state.has_countdown);
    }
}
