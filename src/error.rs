//! Error types for the ledger decoder.

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while decoding or reporting a transaction log.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Magic token did not match, or the buffer cannot hold a header
    #[error("Wrong file format: expected MPS7 header, found {found:02x?}")]
    Format { found: Vec<u8> },

    /// Buffer ended in the middle of a record
    #[error(
        "Truncated record at byte {offset}: tag {tag} needs {needed} bytes, {available} available"
    )]
    TruncatedRecord {
        offset: usize,
        tag: u8,
        needed: usize,
        available: usize,
    },

    /// Record tag outside the known set
    #[error("Unknown record type {tag} at byte {offset}")]
    UnknownRecordType { tag: u8, offset: usize },

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
