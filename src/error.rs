//! Error types for catalog-suggest.
//!
//! All fallible operations return [`SuggestError`]. Errors only occur while
//! building the engine (reading reference files, validating tables and
//! configuration). Serving a suggestion never fails: lookups that find
//! nothing are represented as `None` or empty collections.
//!
//! # Examples
//!
//! ```
//! use catalog_suggest::error::{SuggestError, Result};
//!
//! fn check_dimension(rows: usize, codes: usize) -> Result<()> {
//!     if rows != codes {
//!         return Err(SuggestError::data(format!("{rows} rows for {codes} codes")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_dimension(2, 3).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for catalog-suggest operations.
#[derive(Error, Debug)]
pub enum SuggestError {
    /// I/O errors while reading reference files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV decoding errors.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed reference data (bad code list, dimension mismatch, ...).
    #[error("Reference data error: {0}")]
    Data(String),

    /// Invalid engine configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument supplied by a caller.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with SuggestError.
pub type Result<T> = std::result::Result<T, SuggestError>;

impl SuggestError {
    /// Create a new reference data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        SuggestError::Data(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SuggestError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SuggestError::InvalidArgument(msg.into())
    }
}
