//! Drive configuration
//!
//! Settings are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//! 3. Command-line flags, applied on top by the binary
//!
//! ## Environment variables
//! - `DRIVE_HOST`: base URL of the canister HTTP gateway
//! - `DRIVE_CANISTER_ID`: target canister id (required)
//! - `DRIVE_METHOD`: canister method name (default `gacha_drive`)
//! - `DRIVE_CREDENTIAL`: optional bearer credential for the gateway
//! - `DRIVE_COOLDOWN_SECS`: post-call cooldown length (default 10)
//! - `DRIVE_CALL_TIMEOUT_SECS`: optional timeout for the remote call

use std::time::Duration;

use shared::SharedError;

use crate::error::{DriveError, DriveResult};

pub const DEFAULT_HOST: &str = "http://127.0.0.1:4943";
pub const DEFAULT_METHOD: &str = "gacha_drive";
pub const DEFAULT_COOLDOWN_SECS: u32 = 10;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Timing policy used by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveSettings {
    /// Countdown start value after a successful call
    pub cooldown_secs: u32,
    /// Time between countdown ticks
    pub tick_interval: Duration,
    /// Upper bound on the remote call; `None` waits indefinitely
    pub call_timeout: Option<Duration>,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            call_timeout: None,
        }
    }
}

/// Full configuration for the drive client and orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveConfig {
    pub host: String,
    pub canister_id: String,
    pub method: String,
    pub credential: Option<String>,
    pub cooldown_secs: u32,
    pub tick_interval: Duration,
    pub call_timeout: Option<Duration>,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            canister_id: String::new(),
            method: DEFAULT_METHOD.to_string(),
            credential: None,
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            call_timeout: None,
        }
    }
}

impl DriveConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> DriveResult<Self> {
        // Silently ignored when no .env file exists
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> DriveResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("DRIVE_HOST") {
            config.host = host;
        }
        if let Some(canister_id) = lookup("DRIVE_CANISTER_ID") {
            config.canister_id = canister_id;
        }
        if let Some(method) = lookup("DRIVE_METHOD") {
            config.method = method;
        }
        config.credential = lookup("DRIVE_CREDENTIAL").filter(|c| !c.is_empty());

        if let Some(raw) = lookup("DRIVE_COOLDOWN_SECS") {
            config.cooldown_secs = parse_number("DRIVE_COOLDOWN_SECS", &raw)?;
        }
        if let Some(raw) = lookup("DRIVE_CALL_TIMEOUT_SECS") {
            let secs: u64 = parse_number("DRIVE_CALL_TIMEOUT_SECS", &raw)?;
            config.call_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Reject configurations the client cannot work with
    pub fn validate(&self) -> DriveResult<()> {
        if self.host.trim().is_empty() {
            return Err(DriveError::config("host must not be empty"));
        }
        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err(DriveError::config(format!("host must be an http(s) URL: {}", self.host)));
        }
        if self.canister_id.trim().is_empty() {
            return Err(DriveError::config("canister_id must be set"));
        }
        if self.method.trim().is_empty() {
            return Err(DriveError::config("method must not be empty"));
        }
        if self.tick_interval.is_zero() {
            return Err(DriveError::config("tick_interval must be greater than zero"));
        }
        Ok(())
    }

    /// Timing policy for the orchestrator
    pub fn settings(&self) -> DriveSettings {
        DriveSettings {
            cooldown_secs: self.cooldown_secs,
            tick_interval: self.tick_interval,
            call_timeout: self.call_timeout,
        }
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> DriveResult<T> {
    raw.trim().parse().map_err(|_| {
        SharedError::InvalidConfig {
            field: field.to_string(),
            value: raw.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = DriveConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.method, "gacha_drive");
        assert_eq!(config.cooldown_secs, 10);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.call_timeout, None);
        assert_eq!(config.credential, None);
    }

    #[test]
    fn test_environment_overrides() {
        let config = DriveConfig::from_lookup(lookup_from(&[
            ("DRIVE_HOST", "https://icp0.example"),
            ("DRIVE_CANISTER_ID", "rrkah-fqaaa-aaaaa-aaaaq-cai"),
            ("DRIVE_METHOD", "drive"),
            ("DRIVE_CREDENTIAL", "secret"),
            ("DRIVE_COOLDOWN_SECS", "3"),
            ("DRIVE_CALL_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.host, "https://icp0.example");
        assert_eq!(config.canister_id, "rrkah-fqaaa-aaaaa-aaaaq-cai");
        assert_eq!(config.method, "drive");
        assert_eq!(config.credential.as_deref(), Some("secret"));
        assert_eq!(config.cooldown_secs, 3);
        assert_eq!(config.call_timeout, Some(Duration::from_secs(30)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_means_no_timeout() {
        let config = DriveConfig::from_lookup(lookup_from(&[("DRIVE_CALL_TIMEOUT_SECS", "0")])).unwrap();
        assert_eq!(config.call_timeout, None);
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let err = DriveConfig::from_lookup(lookup_from(&[("DRIVE_COOLDOWN_SECS", "ten")])).unwrap_err();
        match err {
            DriveError::SharedError(SharedError::InvalidConfig { field, value }) => {
                assert_eq!(field, "DRIVE_COOLDOWN_SECS");
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_requires_canister_id() {
        let config = DriveConfig::default();
        assert!(matches!(config.validate(), Err(DriveError::ConfigurationError { .. })));
    }

    #[test]
    fn test_validate_rejects_non_http_host() {
        let config = DriveConfig {
            host: "ftp://nowhere".to_string(),
            canister_id: "abc".to_string(),
            ..DriveConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let config = DriveConfig {
            canister_id: "abc".to_string(),
            tick_interval: Duration::ZERO,
            ..DriveConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settings_mirror_config() {
        let config = DriveConfig {
            cooldown_secs: 4,
            call_timeout: Some(Duration::from_secs(2)),
            ..DriveConfig::default()
        };
        let settings = config.settings();
        assert_eq!(settings.cooldown_secs, 4);
        assert_eq!(settings.tick_interval, DEFAULT_TICK_INTERVAL);
        assert_eq!(settings.call_timeout, Some(Duration::from_secs(2)));
    }
}
