//! Mock chain error types

use thiserror::Error;

/// Errors that can occur when calling the mock chain
#[derive(Error, Debug)]
pub enum ChainError {
    /// `connect_wallet(true)` found no stored connection flag
    #[error("No wallet connected")]
    NoWalletConnected,

    /// The flag store could not be read or written
    #[error("Flag store error: {0}")]
    Store(String),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::Store(err.to_string())
    }
}

/// Result type alias for chain operations
pub type ChainResult<T> = Result<T, ChainError>;
