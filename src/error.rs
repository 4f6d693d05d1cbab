//! Error types for batch building and rendering.

use crate::batch::ValidationReport;
use crate::validation::Violations;
use thiserror::Error;

/// Result type alias for fepfile operations
pub type Result<T> = std::result::Result<T, FepError>;

/// Errors that can occur while encoding records or producing a batch file.
#[derive(Error, Debug)]
pub enum FepError {
    /// A single record was asked to encode while invalid
    #[error("Cannot encode {record}: {violations}")]
    Encoding {
        record: &'static str,
        violations: Violations,
    },

    /// The batch as a whole is not renderable
    #[error("Batch does not have all required data set: {0}")]
    Validation(ValidationReport),

    /// Failed to read input or write the batch file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}
