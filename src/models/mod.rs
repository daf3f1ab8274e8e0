//! Domain models for the leadsplit pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`Record`] - One lead row, a mapping from column name to cell value
//! - [`RecordSet`] - The ordered, merged collection of all parsed rows
//! - [`Share`] - One recipient's slice of the shuffled record set

use serde_json::Value;

/// One lead row: column name mapped to cell value.
///
/// Cell values are strings as parsed; column order is tracked separately
/// by the owning [`RecordSet`] header list.
pub type Record = serde_json::Map<String, Value>;

// =============================================================================
// Record Set
// =============================================================================

/// The ordered, merged collection of all parsed input rows.
///
/// `headers` is the union of every contributing file's columns, in
/// first-appearance order: the file that introduces a column fixes its
/// position. Rows keep only the columns their own file declared; files
/// with mismatched schemas are concatenated without reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    /// Merged column list, first-appearance order.
    pub headers: Vec<String>,
    /// All rows, in supplied-file order.
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Create an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no rows were merged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append one file's rows, extending the merged header union.
    ///
    /// Columns not seen before are appended after the existing ones,
    /// preserving their order within the contributing file. Row order
    /// within the file is preserved; rows are never renumbered or
    /// de-duplicated.
    pub fn append_file(&mut self, headers: &[String], rows: Vec<Record>) {
        for column in headers {
            if !self.headers.iter().any(|h| h == column) {
                self.headers.push(column.clone());
            }
        }
        self.records.extend(rows);
    }
}

// =============================================================================
// Share
// =============================================================================

/// One recipient's contiguous slice of the shuffled record set.
///
/// Empty shares are explicitly represented so that every recipient
/// position maps to exactly one share, even when there are fewer leads
/// than recipients.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    /// Recipient display name, as supplied.
    pub recipient: String,
    /// Rows assigned to this recipient.
    pub records: Vec<Record>,
}

impl Share {
    /// Number of leads in this share.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the recipient received no leads.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, &str)]) -> Record {
        let mut record = Record::new();
        for (column, value) in pairs {
            record.insert(column.to_string(), json!(value));
        }
        record
    }

    #[test]
    fn test_append_preserves_row_order() {
        let mut set = RecordSet::new();
        let headers = vec!["name".to_string(), "email".to_string()];
        set.append_file(&headers, vec![row(&[("name", "Alice")]), row(&[("name", "Bob")])]);
        set.append_file(&headers, vec![row(&[("name", "Carol")])]);

        assert_eq!(set.len(), 3);
        assert_eq!(set.records[0]["name"], "Alice");
        assert_eq!(set.records[2]["name"], "Carol");
    }

    #[test]
    fn test_header_union_first_appearance_order() {
        let mut set = RecordSet::new();
        set.append_file(&["a".to_string(), "b".to_string()], vec![]);
        set.append_file(&["b".to_string(), "c".to_string()], vec![]);

        assert_eq!(set.headers, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_rows_preserved() {
        let mut set = RecordSet::new();
        let headers = vec!["name".to_string()];
        set.append_file(&headers, vec![row(&[("name", "Alice")])]);
        set.append_file(&headers, vec![row(&[("name", "Alice")])]);

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_share() {
        let share = Share { recipient: "Dana".to_string(), records: vec![] };
        assert!(share.is_empty());
        assert_eq!(share.len(), 0);
    }
}
