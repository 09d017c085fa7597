//! Common error types for SRA

use thiserror::Error;

/// Common result type for SRA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the analyzer pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse or write error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Table shape violation (ragged rows, mismatched row counts)
    #[error("Shape mismatch: {0}")]
    Shape(String),

    /// Plot rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
