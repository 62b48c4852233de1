//! Report types produced by the engine and aggregated by the CLI
//!
//! Everything here is plain data with `serde` support so the CLI can emit it
//! either as a human summary or as JSON.

use crate::model::{ImportStyle, QuoteChar};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the quote repairer did to a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepairKind {
    /// The closing quote was missing and has been inserted
    Inserted,
    /// The closing quote was the other quote character and has been replaced
    Replaced,
}

/// A single repaired import literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRepair {
    pub line: usize,
    pub path: String,
    pub quote: QuoteChar,
    pub kind: RepairKind,
}

/// A literal whose closing quote position could not be determined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbiguousQuote {
    pub line: usize,
    pub column: usize,
    /// The offending statement text, trimmed
    pub snippet: String,
}

/// A clause whose path text was replaced by its canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseEdit {
    pub line: usize,
    pub module: String,
    pub style: ImportStyle,
    pub from: String,
    pub to: String,
}

/// A relative clause that reaches into another folder (diagnostic mode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFinding {
    pub line: usize,
    pub column: usize,
    pub path: String,
    pub module: String,
    pub registered: bool,
    /// Canonical relative text, when the module is registered and resolvable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    /// The full source line, trimmed
    pub statement: String,
}

/// Outcome of processing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum FileStatus {
    Unchanged,
    /// `written` is false for dry runs
    Changed { written: bool },
    Skipped { reason: String },
}

/// Per-file report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edits: Vec<ClauseEdit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repairs: Vec<QuoteRepair>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ambiguous: Vec<AmbiguousQuote>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<AuditFinding>,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            edits: Vec::new(),
            repairs: Vec::new(),
            ambiguous: Vec::new(),
            findings: Vec::new(),
        }
    }

    pub fn skipped(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::new(
            path,
            FileStatus::Skipped {
                reason: reason.into(),
            },
        )
    }

    pub fn is_changed(&self) -> bool {
        matches!(self.status, FileStatus::Changed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, FileStatus::Skipped { .. })
    }
}

/// Aggregate of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Source files discovered and handed to the engine; directory walk
    /// failures appear in `files` but are not counted here
    pub files_scanned: usize,
    pub files: Vec<FileReport>,
}

impl RunSummary {
    /// Build a summary with reports sorted by path
    pub fn from_reports(files_scanned: usize, mut files: Vec<FileReport>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            files_scanned,
            files,
        }
    }

    pub fn changed(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.is_changed())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.is_skipped())
    }

    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    pub fn ambiguous_count(&self) -> usize {
        self.files.iter().map(|f| f.ambiguous.len()).sum()
    }

    pub fn finding_count(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_sorts_and_counts() {
        let mut ambiguous = FileReport::new("src/b.tsx", FileStatus::Unchanged);
        ambiguous.ambiguous.push(AmbiguousQuote {
            line: 3,
            column: 20,
            snippet: "import X from \"@/components/X'';".to_string(),
        });

        let summary = RunSummary::from_reports(
            3,
            vec![
                FileReport::skipped("src/c.tsx", "permission denied"),
                ambiguous,
                FileReport::new("src/a.tsx", FileStatus::Changed { written: true }),
            ],
        );

        let paths: Vec<_> = summary.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("src/a.tsx"),
                PathBuf::from("src/b.tsx"),
                PathBuf::from("src/c.tsx")
            ]
        );
        assert_eq!(summary.files_scanned, 3);
        assert_eq!(summary.changed_count(), 1);
        assert_eq!(summary.skipped_count(), 1);
        assert_eq!(summary.ambiguous_count(), 1);
    }

    #[test]
    fn test_walk_failures_are_reported_but_not_counted_as_scanned() {
        let summary = RunSummary::from_reports(
            1,
            vec![
                FileReport::new("src/a.tsx", FileStatus::Unchanged),
                FileReport::skipped("src/locked", "permission denied"),
            ],
        );
        assert_eq!(summary.files_scanned, 1);
        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.skipped_count(), 1);
    }

    #[test]
    fn test_file_report_json_shape() {
        let report = FileReport::skipped("src/a.tsx", "not utf-8");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "skipped");
        assert_eq!(value["reason"], "not utf-8");
        assert!(value.get("edits").is_none());
    }
}
