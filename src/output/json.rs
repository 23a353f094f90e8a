//! JSON output formatter for duplicate scan results.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     { "hash": "abc123...", "files": ["a.txt", "b.txt"] }
//!   ],
//!   "summary": {
//!     "entries_listed": 3,
//!     "directories_skipped": 0,
//!     "special_skipped": 0,
//!     "files_hashed": 3,
//!     "bytes_hashed": 15,
//!     "workers_used": 3,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "errors": [],
//!     "scan_duration_ms": 2,
//!     "exit_code": 0,
//!     "exit_code_name": "DS000"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::error::ExitCode;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// BLAKE3 hash as hexadecimal string (64 characters)
    pub hash: String,
    /// File names relative to the scanned directory
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonDuplicateGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.hash_hex(),
            files: group.files.clone(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Entries listed in the directory
    pub entries_listed: usize,
    /// Subdirectories skipped
    pub directories_skipped: usize,
    /// FIFOs, sockets and device nodes skipped
    pub special_skipped: usize,
    /// Files hashed successfully
    pub files_hashed: usize,
    /// Bytes read while hashing
    pub bytes_hashed: u64,
    /// Workers spawned
    pub workers_used: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Duplicate files, excluding one original per group
    pub duplicate_files: usize,
    /// Messages for files that could not be hashed
    pub errors: Vec<String>,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DS000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Build the JSON summary for a scan and its exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            entries_listed: summary.entries_listed,
            directories_skipped: summary.directories_skipped,
            special_skipped: summary.special_skipped,
            files_hashed: summary.files_hashed,
            bytes_hashed: summary.bytes_hashed,
            workers_used: summary.workers_used,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            errors: summary.scan_errors.iter().map(ToString::to_string).collect(),
            scan_duration_ms: u64::try_from(summary.scan_duration.as_millis()).unwrap_or(u64::MAX),
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON document for one scan.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from duplicate groups, summary and exit code.
    ///
    /// # Example
    ///
    /// ```
    /// use dupescan::duplicates::{DuplicateGroup, ScanSummary};
    /// use dupescan::output::json::JsonOutput;
    /// use dupescan::error::ExitCode;
    ///
    /// let groups = vec![DuplicateGroup::new(
    ///     [0u8; 32],
    ///     vec!["a.txt".to_string(), "b.txt".to_string()],
    /// )];
    /// let output = JsonOutput::new(&groups, &ScanSummary::default(), ExitCode::Success);
    /// assert_eq!(output.duplicates.len(), 1);
    /// ```
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            duplicates: groups.iter().map(JsonDuplicateGroup::from).collect(),
            summary: JsonSummary::from_scan_summary(summary, exit_code),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON output: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{hash_bytes, hash_to_hex, HashError, ScanError};
    use std::path::PathBuf;
    use std::time::Duration;

    fn create_test_summary() -> ScanSummary {
        ScanSummary {
            entries_listed: 4,
            directories_skipped: 1,
            files_hashed: 2,
            bytes_hashed: 10,
            workers_used: 2,
            duplicate_groups: 1,
            duplicate_files: 1,
            scan_duration: Duration::from_millis(1500),
            special_skipped: 1,
            scan_errors: vec![ScanError::HashError(HashError::PermissionDenied(
                PathBuf::from("locked.bin"),
            ))],
        }
    }

    fn create_test_groups() -> Vec<DuplicateGroup> {
        vec![DuplicateGroup::new(
            hash_bytes(b"hello"),
            vec!["a.txt".to_string(), "b.txt".to_string()],
        )]
    }

    #[test]
    fn test_json_output_empty() {
        let output = JsonOutput::new(&[], &ScanSummary::default(), ExitCode::NoDuplicates);
        assert!(output.duplicates.is_empty());
        assert_eq!(output.summary.exit_code, 2);
        assert_eq!(output.summary.exit_code_name, "DS002");
    }

    #[test]
    fn test_json_output_with_groups() {
        let groups = create_test_groups();
        let output = JsonOutput::new(&groups, &create_test_summary(), ExitCode::PartialSuccess);

        assert_eq!(output.duplicates.len(), 1);
        assert_eq!(output.duplicates[0].hash, hash_to_hex(&hash_bytes(b"hello")));
        assert_eq!(output.duplicates[0].files, vec!["a.txt", "b.txt"]);
        assert_eq!(output.summary.scan_duration_ms, 1500);
        assert_eq!(output.summary.errors, vec!["Cannot open locked.bin: permission denied"]);
    }

    #[test]
    fn test_json_is_valid() {
        let groups = create_test_groups();
        let output = JsonOutput::new(&groups, &create_test_summary(), ExitCode::Success);
        let json = output.to_json().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["duplicates"][0]["files"][1], "b.txt");
        assert_eq!(parsed["summary"]["workers_used"], 2);
        assert_eq!(parsed["summary"]["special_skipped"], 1);
        // Interrupted scans end in an error, never in a summary.
        assert!(parsed["summary"].get("interrupted").is_none());
    }

    #[test]
    fn test_to_json_pretty() {
        let output = JsonOutput::new(&[], &ScanSummary::default(), ExitCode::NoDuplicates);
        assert!(output.to_json_pretty().unwrap().contains('\n'));
        assert!(!output.to_json().unwrap().contains('\n'));
    }

    #[test]
    fn test_write_to() {
        let output = JsonOutput::new(&create_test_groups(), &ScanSummary::default(), ExitCode::Success);
        let mut buf = Vec::new();
        output.write_to(&mut buf, false).unwrap();

        let written = String::from_utf8(buf).unwrap();
        assert!(written.ends_with('\n'));
        assert!(written.contains("\"duplicates\""));
    }
}
