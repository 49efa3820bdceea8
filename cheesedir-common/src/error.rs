//! Common error types for the cheese directory

use thiserror::Error;

/// Common result type for cheese directory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the cheese directory crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited file could not be read or written
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input (short row, out-of-range index, bad filter value)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
