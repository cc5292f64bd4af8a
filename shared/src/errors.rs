//! Shared error types for the gacha drive workspace

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid operation id: {input}")]
    InvalidOperationId { input: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Unknown error code: {code}")]
    UnknownErrorCode { code: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
