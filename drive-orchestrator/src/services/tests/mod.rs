//! Service-specific tests
//!
//! Each service has its own test file exercising it against a local mock server.
