//! Error types for the leadsplit pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`RequestError`] - Precondition failures, reported before any processing
//! - [`WriteError`] - CSV serialization errors
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Parse errors carry line context and live in [`crate::parser`].
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Request Errors (precondition gate)
// =============================================================================

/// Invalid split request, rejected before any processing starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// Fewer than two recipients.
    #[error("At least 2 recipient names are required, got {0}")]
    TooFewRecipients(usize),

    /// No input files supplied.
    #[error("At least one lead file is required")]
    NoFiles,

    /// More than the allowed number of input files.
    #[error("At most {max} lead files can be processed at once, got {got}")]
    TooManyFiles { got: usize, max: usize },
}

// =============================================================================
// Serialization Errors
// =============================================================================

/// Errors while serializing a share back to CSV bytes.
#[derive(Debug, Error)]
pub enum WriteError {
    /// CSV writer error.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error while flushing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The writer could not hand back its buffer.
    #[error("Failed to finalize CSV output: {0}")]
    Finalize(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::split_leads`].
/// It wraps all lower-level errors and adds pipeline-specific variants.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invalid request.
    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Write(#[from] WriteError),

    /// No file yielded any lead rows.
    #[error("No valid lead data found in the uploaded files")]
    NoLeads,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for request validation.
pub type RequestResult<T> = Result<T, RequestError>;

/// Result type for serialization operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // RequestError -> PipelineError
        let req_err = RequestError::TooFewRecipients(1);
        let pipeline_err: PipelineError = req_err.into();
        assert!(pipeline_err.to_string().contains("2 recipient names"));

        // WriteError -> PipelineError
        let write_err = WriteError::Finalize("buffer gone".into());
        let pipeline_err: PipelineError = write_err.into();
        assert!(pipeline_err.to_string().contains("buffer gone"));
    }

    #[test]
    fn test_too_many_files_format() {
        let err = RequestError::TooManyFiles { got: 12, max: 10 };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("12"));
    }
}
