//! Common test utilities and infrastructure
//!
//! Shared fixtures and helpers used across the drive orchestrator test suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::{ScriptedClient, TestFixtures};
pub use helpers::{EventLog, OrchestratorBuilder, TestHelpers};
