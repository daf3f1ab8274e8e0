//! Diagnostic log surface for pipeline runs.
//!
//! The pipeline reports per-file statuses and stage progress through a
//! process-wide collector. Entries are printed to stderr as they happen
//! and retained so an embedding collaborator can render them after a run.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Log level for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into() }
    }
}

/// Global log collector.
pub static LOG_COLLECTOR: Lazy<LogCollector> = Lazy::new(LogCollector::new);

/// Collects log entries and mirrors them to stderr.
pub struct LogCollector {
    entries: Mutex<Vec<LogEntry>>,
}

impl LogCollector {
    pub fn new() -> Self {
        Self { entries: Mutex::new(Vec::new()) }
    }

    /// Record an entry and print it.
    pub fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        eprintln!("{} {}", prefix, entry.message);

        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }

    /// Take all retained entries, clearing the collector.
    pub fn drain(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(mut entries) => std::mem::take(&mut *entries),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for LogCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOG_COLLECTOR.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_COLLECTOR.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_COLLECTOR.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_COLLECTOR.log(LogEntry::error(msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_retains_and_drains() {
        let collector = LogCollector::new();
        collector.log(LogEntry::info("reading files"));
        collector.log(LogEntry::warning("one file empty"));

        let entries = collector.drain();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].level, LogLevel::Warning);

        assert!(collector.drain().is_empty());
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = LogEntry::success("done");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"level\":\"success\""));
    }
}
