//! High-level pipeline: one processing invocation from raw files and
//! recipient names to named CSV shares.
//!
//! The request object replaces any ambient UI state: a collaborator
//! (the CLI here, an upload page in general) fills in a [`SplitRequest`],
//! calls [`split_leads`], and renders the outcome. Each invocation is
//! independent; nothing is retained between runs beyond the diagnostic
//! log and the optional serialization memo.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cache::{SerializationCache, SHARE_CACHE};
use crate::error::{PipelineError, PipelineResult, RequestError, RequestResult};
use crate::logs::{log_info, log_success, log_warning};
use crate::merge::{merge_inputs, FileReport, NamedInput, MAX_INPUT_FILES};
use crate::split::partition;
use crate::writer::{share_file_name, to_csv_bytes};

/// Minimum number of recipients for a split to make sense.
pub const MIN_RECIPIENTS: usize = 2;

// =============================================================================
// Request & options
// =============================================================================

/// One processing invocation's input: raw files plus recipient names.
#[derive(Debug, Clone, Default)]
pub struct SplitRequest {
    /// Uploaded lead files, in upload order. At most [`MAX_INPUT_FILES`].
    pub files: Vec<NamedInput>,
    /// Recipient display names, in assignment order. At least
    /// [`MIN_RECIPIENTS`]; duplicates occupy separate positions.
    pub recipients: Vec<String>,
}

/// Options for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Skip the serialization memo and convert every share afresh.
    pub no_cache: bool,
}

/// Parse recipient names from free text, one per line.
///
/// Surrounding whitespace is trimmed and blank lines discarded, matching
/// how a names textarea is read.
pub fn parse_recipients(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Precondition gate, checked before any processing starts.
pub fn validate_request(request: &SplitRequest) -> RequestResult<()> {
    if request.recipients.len() < MIN_RECIPIENTS {
        return Err(RequestError::TooFewRecipients(request.recipients.len()));
    }
    if request.files.is_empty() {
        return Err(RequestError::NoFiles);
    }
    if request.files.len() > MAX_INPUT_FILES {
        return Err(RequestError::TooManyFiles {
            got: request.files.len(),
            max: MAX_INPUT_FILES,
        });
    }
    Ok(())
}

// =============================================================================
// Outcome
// =============================================================================

/// One recipient's serialized share, ready to hand out.
#[derive(Debug, Clone)]
pub struct ShareFile {
    /// Recipient display name, as supplied.
    pub recipient: String,
    /// Synthesized download name, `leads_<date>_<name>.csv`.
    pub file_name: String,
    /// Number of leads assigned.
    pub rows: usize,
    /// UTF-8 CSV bytes (header-only when `rows` is 0).
    pub bytes: Vec<u8>,
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// One share per recipient position, in request order.
    pub shares: Vec<ShareFile>,
    /// Per-input-file statuses, in upload order.
    pub reports: Vec<FileReport>,
    /// Total leads merged before splitting.
    pub total_rows: usize,
    /// Degraded-but-successful conditions worth surfacing.
    pub warnings: Vec<String>,
}

/// Summary counters for rendering, one step removed from the shares.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeSummary {
    pub total_rows: usize,
    pub files_included: usize,
    pub recipients: usize,
    pub empty_shares: usize,
}

impl SplitOutcome {
    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary {
            total_rows: self.total_rows,
            files_included: self
                .reports
                .iter()
                .filter(|r| matches!(r.status, crate::merge::FileStatus::Included { .. }))
                .count(),
            recipients: self.shares.len(),
            empty_shares: self.shares.iter().filter(|s| s.rows == 0).count(),
        }
    }
}

// =============================================================================
// Orchestration
// =============================================================================

/// Run the full pipeline: gate, merge, shuffle + split, serialize.
///
/// Errors are all recoverable at this boundary; the worst outcome is
/// "nothing produced for this invocation, retry with better input".
pub fn split_leads(request: SplitRequest, options: SplitOptions) -> PipelineResult<SplitOutcome> {
    let today = chrono::Local::now().date_naive();
    split_leads_on(request, options, today)
}

/// Pipeline body with an injected date, used for the file-name stamp.
pub fn split_leads_on(
    request: SplitRequest,
    options: SplitOptions,
    date: NaiveDate,
) -> PipelineResult<SplitOutcome> {
    validate_request(&request)?;

    log_info(format!(
        "Processing {} file(s) for {} recipients...",
        request.files.len(),
        request.recipients.len()
    ));

    let merged = merge_inputs(&request.files);
    if merged.set.is_empty() {
        return Err(PipelineError::NoLeads);
    }

    let total_rows = merged.set.len();
    log_success(format!(
        "Combined {} leads from {} file(s)",
        total_rows,
        merged.included_count()
    ));

    let mut warnings = Vec::new();
    if total_rows < request.recipients.len() {
        let warning = format!(
            "There are fewer leads ({}) than people ({}). Some people may not receive any leads.",
            total_rows,
            request.recipients.len()
        );
        log_warning(warning.clone());
        warnings.push(warning);
    }

    log_info(format!(
        "Splitting leads randomly among {} people: {}",
        request.recipients.len(),
        request.recipients.join(", ")
    ));

    let headers = merged.set.headers.clone();
    let shares = partition(merged.set, &request.recipients);

    let mut share_files = Vec::with_capacity(shares.len());
    for share in shares {
        let bytes = if options.no_cache {
            to_csv_bytes(&headers, &share.records)?
        } else {
            let key = SerializationCache::content_key(&headers, &share.records);
            SHARE_CACHE.get_or_serialize(key, || to_csv_bytes(&headers, &share.records))?
        };

        share_files.push(ShareFile {
            file_name: share_file_name(&share.recipient, date),
            rows: share.records.len(),
            recipient: share.recipient,
            bytes,
        });
    }

    log_success(format!("Prepared {} share file(s)", share_files.len()));

    Ok(SplitOutcome {
        shares: share_files,
        reports: merged.reports,
        total_rows,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::FileStatus;

    fn file(name: &str, content: &str) -> NamedInput {
        NamedInput::new(name, content.as_bytes().to_vec())
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn leads_csv(n: usize) -> String {
        let mut csv = String::from("name,email\n");
        for i in 0..n {
            csv.push_str(&format!("Lead{},lead{}@x.com\n", i, i));
        }
        csv
    }

    #[test]
    fn test_parse_recipients_trims_and_drops_blanks() {
        let recipients = parse_recipients("Jonie\n  David \n\n\tSarah\n");
        assert_eq!(recipients, names(&["Jonie", "David", "Sarah"]));
    }

    #[test]
    fn test_gate_too_few_recipients() {
        let request = SplitRequest {
            files: vec![file("a.csv", "name\nAlice")],
            recipients: names(&["Solo"]),
        };
        let err = validate_request(&request).unwrap_err();
        assert_eq!(err, RequestError::TooFewRecipients(1));
    }

    #[test]
    fn test_gate_file_count() {
        let none = SplitRequest { files: vec![], recipients: names(&["A", "B"]) };
        assert_eq!(validate_request(&none).unwrap_err(), RequestError::NoFiles);

        let many = SplitRequest {
            files: (0..11).map(|i| file(&format!("f{}.csv", i), "name\nx")).collect(),
            recipients: names(&["A", "B"]),
        };
        assert_eq!(
            validate_request(&many).unwrap_err(),
            RequestError::TooManyFiles { got: 11, max: 10 }
        );
    }

    #[test]
    fn test_full_run_produces_named_shares() {
        let request = SplitRequest {
            files: vec![file("leads.csv", &leads_csv(10))],
            recipients: names(&["Jonie", "David Lee"]),
        };

        let outcome = split_leads_on(request, SplitOptions::default(), date()).unwrap();

        assert_eq!(outcome.total_rows, 10);
        assert_eq!(outcome.shares.len(), 2);
        assert_eq!(outcome.shares[0].rows, 5);
        assert_eq!(outcome.shares[1].rows, 5);
        assert_eq!(outcome.shares[0].file_name, "leads_2024-03-09_Jonie.csv");
        assert_eq!(outcome.shares[1].file_name, "leads_2024-03-09_David_Lee.csv");
        assert!(outcome.warnings.is_empty());

        // Every share is a valid CSV with the merged header
        for share in &outcome.shares {
            let text = String::from_utf8(share.bytes.clone()).unwrap();
            assert!(text.starts_with("name,email\n"));
            assert_eq!(text.lines().count(), 1 + share.rows);
        }
    }

    #[test]
    fn test_degraded_run_keeps_empty_shares_and_warns() {
        let request = SplitRequest {
            files: vec![file("leads.csv", &leads_csv(3))],
            recipients: names(&["A", "B", "C", "D", "E"]),
        };

        let outcome = split_leads_on(request, SplitOptions::default(), date()).unwrap();

        let sizes: Vec<usize> = outcome.shares.iter().map(|s| s.rows).collect();
        assert_eq!(sizes, vec![1, 1, 1, 0, 0]);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("fewer leads (3) than people (5)"));

        // Empty shares still serialize to a valid header-only file
        let empty = &outcome.shares[4];
        assert_eq!(String::from_utf8(empty.bytes.clone()).unwrap(), "name,email\n");
        assert_eq!(outcome.summary().empty_shares, 2);
    }

    #[test]
    fn test_bad_file_reported_not_fatal() {
        let request = SplitRequest {
            files: vec![file("good.csv", &leads_csv(4)), file("bad.csv", "")],
            recipients: names(&["A", "B"]),
        };

        let outcome = split_leads_on(request, SplitOptions::default(), date()).unwrap();

        assert_eq!(outcome.total_rows, 4);
        assert_eq!(outcome.reports.len(), 2);
        assert!(matches!(outcome.reports[1].status, FileStatus::SkippedError { .. }));
    }

    #[test]
    fn test_no_parsed_files_is_terminal() {
        let request = SplitRequest {
            files: vec![file("a.csv", ""), file("b.csv", "name,email\n")],
            recipients: names(&["A", "B"]),
        };

        let err = split_leads_on(request, SplitOptions::default(), date()).unwrap_err();
        assert!(matches!(err, PipelineError::NoLeads));
    }

    #[test]
    fn test_cache_and_no_cache_agree() {
        let build = || SplitRequest {
            // Single lead: both shares' contents are forced, so the two
            // runs are comparable despite the shuffle
            files: vec![file("leads.csv", &leads_csv(1))],
            recipients: names(&["A", "B"]),
        };

        let cached = split_leads_on(build(), SplitOptions::default(), date()).unwrap();
        let fresh =
            split_leads_on(build(), SplitOptions { no_cache: true }, date()).unwrap();

        assert_eq!(cached.shares[0].bytes, fresh.shares[0].bytes);
        assert_eq!(cached.shares[1].bytes, fresh.shares[1].bytes);
    }

    #[test]
    fn test_summary_counters() {
        let request = SplitRequest {
            files: vec![file("a.csv", &leads_csv(6)), file("b.csv", "")],
            recipients: names(&["A", "B", "C"]),
        };

        let outcome = split_leads_on(request, SplitOptions::default(), date()).unwrap();
        let summary = outcome.summary();

        assert_eq!(summary.total_rows, 6);
        assert_eq!(summary.files_included, 1);
        assert_eq!(summary.recipients, 3);
        assert_eq!(summary.empty_shares, 0);
    }
}
