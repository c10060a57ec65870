//! Error types for the CLI

use bytecode_system::{DecodeError, EncodeError};
use interpreter::RunError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O error
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON program could not be parsed
    #[error("invalid program JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary program could not be decoded
    #[error("invalid program binary: {0}")]
    Decode(#[from] DecodeError),

    /// Program could not be encoded to binary
    #[error("cannot encode program: {0}")]
    Encode(#[from] EncodeError),

    /// Execution faulted
    #[error("execution failed: {0}")]
    Run(#[from] RunError),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
