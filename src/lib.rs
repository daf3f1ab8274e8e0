//! # Leadsplit - merge lead CSV files and split them fairly at random
//!
//! Leadsplit ingests up to 10 lead CSV files, merges them into one record
//! set, shuffles it, and cuts it into roughly-equal shares, one per named
//! team member.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV files  │────▶│   Merge     │────▶│  Partition  │────▶│ CSV shares  │
//! │  (≤10, any  │     │ (per-file   │     │ (shuffle +  │     │ (one per    │
//! │   encoding) │     │  recovery)  │     │  fair cut)  │     │  recipient) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use leadsplit::{split_leads, NamedInput, SplitOptions, SplitRequest};
//!
//! let request = SplitRequest {
//!     files: vec![NamedInput::new("leads.csv", std::fs::read("leads.csv")?)],
//!     recipients: vec!["Jonie".into(), "David".into()],
//! };
//! let outcome = split_leads(request, SplitOptions::default())?;
//! for share in &outcome.shares {
//!     std::fs::write(&share.file_name, &share.bytes)?;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Record, RecordSet, Share)
//! - [`parser`] - CSV parsing with auto-detection
//! - [`merge`] - Ingestion & merge with per-file recovery
//! - [`split`] - Fair random partitioner
//! - [`writer`] - Share serialization and file naming
//! - [`cache`] - Serialization memoization
//! - [`pipeline`] - Request-to-outcome orchestration
//! - [`logs`] - Diagnostic log surface

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Merge & split
pub mod merge;
pub mod split;

// Output
pub mod writer;

// Caching
pub mod cache;

// Orchestration
pub mod pipeline;

// Diagnostics
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{PipelineError, RequestError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Record, RecordSet, Share};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_delimiter,
    detect_encoding,
    parse_bytes_auto,
    parse_content,
    parse_file_auto,
    ParseError,
    ParseResult,
};

// =============================================================================
// Re-exports - Merge
// =============================================================================

pub use merge::{merge_inputs, FileReport, FileStatus, MergeResult, NamedInput, MAX_INPUT_FILES};

// =============================================================================
// Re-exports - Partitioner
// =============================================================================

pub use split::{fair_sizes, partition};

// =============================================================================
// Re-exports - Writer
// =============================================================================

pub use writer::{share_file_name, to_csv_bytes};

// =============================================================================
// Re-exports - Cache
// =============================================================================

pub use cache::{SerializationCache, SHARE_CACHE};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{
    parse_recipients,
    split_leads,
    split_leads_on,
    validate_request,
    OutcomeSummary,
    ShareFile,
    SplitOptions,
    SplitOutcome,
    SplitRequest,
    MIN_RECIPIENTS,
};

// =============================================================================
// Re-exports - Diagnostics
// =============================================================================

pub use logs::{log_error, log_info, log_success, log_warning, LogEntry, LogLevel, LOG_COLLECTOR};
