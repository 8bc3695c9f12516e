//! Core types for findings and scan results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level attached to a rule and the findings it produces.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    #[default]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// One reported occurrence of a forbidden pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// File path relative to the scan root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Byte offset of the match start within its line (0-indexed).
    ///
    /// Measured on the decoded text: each invalid UTF-8 byte in the file was
    /// replaced by U+FFFD (3 bytes), which shifts later columns on that line.
    pub column: usize,
    /// Name of the rule that matched.
    pub rule: String,
    /// Severity of the rule that matched.
    pub severity: Severity,
    /// Rule message.
    pub message: String,
    /// Full text of the line, including its trailing newline if present.
    pub line_text: String,
    /// The matched text.
    pub matched: String,
}

impl Finding {
    /// Column rendered in characters rather than bytes, for caret placement.
    #[must_use]
    pub fn display_column(&self) -> usize {
        crate::position::display_column(&self.line_text, self.column)
    }

    /// Renders the finding as the three-line block printed by the linter:
    /// header, source line, and caret marker.
    #[must_use]
    pub fn format(&self) -> String {
        let mut output = format!(
            "{}:{}: {}\n{}",
            self.file.display(),
            self.line,
            self.message,
            self.line_text
        );
        if !self.line_text.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&" ".repeat(self.display_column()));
        output.push_str("^\n");
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {} [{}]",
            self.file.display(),
            self.line,
            self.column + 1,
            self.severity,
            self.message,
            self.rule
        )
    }
}

/// A selected file that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    /// File path relative to the scan root.
    pub file: PathBuf,
    /// Underlying error description.
    pub message: String,
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ERROR\n {}", self.file.display(), self.message)
    }
}

/// Result of a scan.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// All findings, in file, rule, then match order.
    pub findings: Vec<Finding>,
    /// Files that could not be read.
    pub errors: Vec<FileError>,
    /// Number of files read and checked successfully.
    pub files_checked: usize,
}

impl ScanReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no findings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Counts findings by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.findings
            .iter()
            .fold((0, 0, 0), |(e, w, i), f| match f.severity {
                Severity::Error => (e + 1, w, i),
                Severity::Warning => (e, w + 1, i),
                Severity::Info => (e, w, i + 1),
            })
    }

    /// Checks if any findings meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_findings_at(&self, severity: Severity) -> bool {
        self.findings.iter().any(|f| f.severity >= severity)
    }
}
