//! Test fixtures: canned tokens, responses and scripted canister clients

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use drive_orchestrator::{CanisterClient, DriveError, DriveResult};

/// Canned values shared by the suites
pub struct TestFixtures;

impl TestFixtures {
    pub const TOKEN: &'static str = "abc";
    pub const RESPONSE: &'static str = "OK-123";
    pub const NETWORK_DOWN: &'static str = "network down";
    pub const REMOTE_LATENCY: Duration = Duration::from_millis(50);
    pub const DEFAULT_COOLDOWN: u32 = 10;

    /// Expected countdown values for a cooldown of `secs`
    pub fn countdown(secs: u32) -> Vec<u32> {
        (0..=secs).rev().collect()
    }
}

/// Canister client that answers after a fixed delay with a scripted reply
#[derive(Clone)]
pub struct ScriptedClient {
    delay: Duration,
    reply: Result<String, String>,
    calls: Arc<AtomicUsize>,
    tokens: Arc<std::sync::Mutex<Vec<String>>>,
}

impl ScriptedClient {
    pub fn succeeding(response: &str, delay: Duration) -> Self {
        Self::new(Ok(response.to_string()), delay)
    }

    pub fn failing(message: &str, delay: Duration) -> Self {
        Self::new(Err(message.to_string()), delay)
    }

    fn new(reply: Result<String, String>, delay: Duration) -> Self {
        Self {
            delay,
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            tokens: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    /// Number of calls that reached the client
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Tokens received, in call order
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CanisterClient for ScriptedClient {
    async fn gacha_drive(&self, token: &str) -> DriveResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(token.to_string());
        tokio::time::sleep(self.delay).await;
        self.reply.clone().map_err(DriveError::remote)
    }
}
