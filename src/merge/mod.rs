//! Ingestion & merge: turn uploaded lead files into one record set.
//!
//! Each file is parsed independently; a bad file is skipped and reported,
//! never aborting the batch. Surviving rows are concatenated in
//! supplied-file order.

use serde::{Deserialize, Serialize};

use crate::logs::{log_error, log_success, log_warning};
use crate::models::RecordSet;
use crate::parser::parse_bytes_auto;

/// Maximum number of lead files accepted per run.
pub const MAX_INPUT_FILES: usize = 10;

/// One uploaded file: display name plus raw bytes.
///
/// Ephemeral; consumed by [`merge_inputs`] and discarded after parsing.
#[derive(Debug, Clone)]
pub struct NamedInput {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl NamedInput {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }
}

// =============================================================================
// Per-file reporting
// =============================================================================

/// Outcome of parsing one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FileStatus {
    /// File parsed and contributed rows.
    Included { rows: usize },
    /// File parsed but held no data rows.
    SkippedEmpty,
    /// File could not be parsed.
    SkippedError { reason: String },
}

/// Status of one input file, for the caller's diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// File display name, as supplied.
    pub file: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Result of merging all inputs.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Merged rows. Empty when no file parsed successfully.
    pub set: RecordSet,
    /// One report per input file, in supplied order.
    pub reports: Vec<FileReport>,
}

impl MergeResult {
    /// Number of files that contributed rows.
    pub fn included_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, FileStatus::Included { .. }))
            .count()
    }
}

// =============================================================================
// Merge
// =============================================================================

/// Parse every input and concatenate the surviving rows.
///
/// Per-file recovery policy: decode or parse failures skip that file and
/// record the reason; a successfully parsed file with zero data rows is
/// skipped with a warning. Surviving rows are appended in supplied-file
/// order, original row order preserved, and the merged column list grows
/// in first-appearance order.
///
/// When no file parses successfully the result carries an explicit empty
/// [`RecordSet`]; the caller must treat that as terminal.
pub fn merge_inputs(inputs: &[NamedInput]) -> MergeResult {
    let mut set = RecordSet::new();
    let mut reports = Vec::with_capacity(inputs.len());

    for input in inputs {
        match parse_bytes_auto(&input.bytes) {
            Ok(parsed) => {
                if parsed.records.is_empty() {
                    log_warning(format!(
                        "File '{}' is empty or could not be read properly",
                        input.name
                    ));
                    reports.push(FileReport {
                        file: input.name.clone(),
                        status: FileStatus::SkippedEmpty,
                    });
                } else {
                    let rows = parsed.records.len();
                    log_success(format!("File '{}': {} leads", input.name, rows));
                    set.append_file(&parsed.headers, parsed.records);
                    reports.push(FileReport {
                        file: input.name.clone(),
                        status: FileStatus::Included { rows },
                    });
                }
            }
            Err(e) => {
                log_error(format!("Error reading file '{}': {}", input.name, e));
                reports.push(FileReport {
                    file: input.name.clone(),
                    status: FileStatus::SkippedError { reason: e.to_string() },
                });
            }
        }
    }

    MergeResult { set, reports }
}
