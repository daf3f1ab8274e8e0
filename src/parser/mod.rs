//! Tabular lead-file parsing with encoding and delimiter auto-detection.
//!
//! Converts raw CSV bytes into [`Record`] rows. No lead-specific logic here:
//! any delimited file with a header row parses.

use std::path::Path;

use serde_json::json;

use crate::models::Record;

/// Parse error with line context.
///
/// Line 0 means the failure concerns the whole file rather than one row.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "Line {}: {}", self.line, self.message)
        }
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Result of parsing one file, with detection metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows, in file order.
    pub records: Vec<Record>,
    /// Detected encoding.
    pub encoding: String,
    /// Detected or supplied delimiter.
    pub delimiter: char,
    /// Column headers, in file order.
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to text using the detected encoding.
///
/// Unknown encodings fall back to lossy UTF-8 so that one odd file
/// degrades instead of failing outright.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Detect the delimiter by counting occurrences in the header line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse raw file bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> Result<ParseResult, ParseError> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    parse_content(&content, delimiter, encoding)
}

/// Parse a lead file from disk with auto-detection.
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> Result<ParseResult, ParseError> {
    let bytes = std::fs::read(path.as_ref())
        .map_err(|e| ParseError::new(0, format!("Cannot read file: {}", e)))?;
    parse_bytes_auto(&bytes)
}

/// Parse decoded text with an explicit delimiter.
///
/// The first line is the header row; each following non-blank line becomes
/// one [`Record`] keyed by those headers. Values are trimmed and unquoted;
/// rows shorter than the header get empty strings for the missing cells,
/// extra cells beyond the header are dropped.
pub fn parse_content(
    content: &str,
    delimiter: char,
    encoding: String,
) -> Result<ParseResult, ParseError> {
    let mut lines = content.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| ParseError::new(1, "Empty lead file"))?;

    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|s| s.trim().trim_matches('"').to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(ParseError::new(1, "No headers found"));
    }

    let mut records = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split(delimiter).collect();
        let mut record = Record::new();

        for (i, header) in headers.iter().enumerate() {
            let raw_value = values
                .get(i)
                .map(|s| s.trim().trim_matches('"'))
                .unwrap_or("");

            record.insert(header.clone(), json!(raw_value));
        }

        records.push(record);
    }

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}
