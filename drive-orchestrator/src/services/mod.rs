//! Service implementations
//!
//! Production implementations of the service traits. These perform real I/O.

pub mod canister_client;

pub use canister_client::HttpCanisterClient;

#[cfg(test)]
mod tests;
