//! Main entry point for the drive-orchestrator binary
//!
//! Runs one drive operation against the configured canister, logging progress
//! as it happens. Ctrl+C cancels the running operation.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tokio::sync::mpsc;

use drive_orchestrator::{services::HttpCanisterClient, DriveConfig, DriveError, DriveOrchestrator, DriveResult};
use shared::{logging, process_debug, process_error, process_info, DriveEvent, ProcessId};

/// Trigger a gacha drive on the backend canister
#[derive(Parser, Debug)]
#[command(name = "drive-orchestrator")]
#[command(about = "Runs a single-flight gacha drive with a post-call cooldown")]
pub struct Args {
    /// Authorization token passed to the canister (falls back to DRIVE_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Canister HTTP gateway base URL (overrides DRIVE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Target canister id (overrides DRIVE_CANISTER_ID)
    #[arg(long)]
    pub canister_id: Option<String>,

    /// Canister method name (overrides DRIVE_METHOD)
    #[arg(long)]
    pub method: Option<String>,

    /// Cooldown seconds after a successful call (overrides DRIVE_COOLDOWN_SECS)
    #[arg(long)]
    pub cooldown_secs: Option<u32>,

    /// Remote call timeout in seconds, 0 disables (overrides DRIVE_CALL_TIMEOUT_SECS)
    #[arg(long)]
    pub call_timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the final outcome as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Layer command-line overrides on top of environment configuration
    fn apply(&self, mut config: DriveConfig) -> DriveConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(canister_id) = &self.canister_id {
            config.canister_id = canister_id.clone();
        }
        if let Some(method) = &self.method {
            config.method = method.clone();
        }
        if let Some(cooldown_secs) = self.cooldown_secs {
            config.cooldown_secs = cooldown_secs;
        }
        if let Some(secs) = self.call_timeout_secs {
            config.call_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        config
    }
}

fn describe(event: &DriveEvent) -> String {
    match event {
        DriveEvent::Started => "🚗 Drive started".to_string(),
        DriveEvent::CountdownTick { seconds_remaining } => format!("⏱️  Cooldown: {seconds_remaining}s"),
        DriveEvent::Succeeded { response } => format!("🎰 Canister response: {response}"),
        DriveEvent::Failed { message } => format!("❌ Drive failed: {message}"),
        DriveEvent::Completed => "🏁 Drive complete".to_string(),
        DriveEvent::Cancelled => "🛑 Drive cancelled".to_string(),
    }
}

#[tokio::main]
async fn main() -> DriveResult<()> {
    let args = Args::parse();

    ProcessId::init_cli();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ProcessId::current(), "gacha drive client");

    let config = args.apply(DriveConfig::from_env()?);
    config.validate()?;
    let token = args
        .token
        .clone()
        .or_else(|| std::env::var("DRIVE_TOKEN").ok())
        .ok_or_else(|| DriveError::config("token must be provided via --token or DRIVE_TOKEN"))?;

    let client = HttpCanisterClient::new(&config)?;
    process_debug!(ProcessId::current(), "Canister endpoint: {}", client.endpoint());

    let orchestrator = Arc::new(DriveOrchestrator::new(client, config.settings()));
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<DriveEvent>();

    let runner = orchestrator.clone();
    let run = tokio::spawn(async move { runner.execute_drive_operation(&token, event_tx).await });

    // Ctrl+C cancels the active operation instead of killing the process mid-call
    let canceller = orchestrator.clone();
    let signal_task = tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal");
                canceller.cancel_operation();
            }
            Err(err) => {
                logging::log_error(ProcessId::current(), "Signal handling", &err);
            }
        }
    });

    while let Some(event) = event_rx.recv().await {
        process_info!(ProcessId::current(), "{}", describe(&event));
    }

    let outcome = match run.await {
        Ok(outcome) => outcome,
        Err(e) => {
            process_error!(ProcessId::current(), "💥 Drive task failed: {}", e);
            return Err(DriveError::remote(format!("Drive task failed: {e}")));
        }
    };
    signal_task.abort();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    if outcome.success {
        logging::log_success(ProcessId::current(), &outcome.message);
        Ok(())
    } else {
        let reason = outcome.error.as_deref().unwrap_or(outcome.message.as_str());
        logging::log_error(ProcessId::current(), "Drive operation", &reason);
        std::process::exit(1);
    }
}
