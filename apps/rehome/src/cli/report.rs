//! Human-readable run summaries

use crate::runner::{Mode, RunOptions};
use rehome_foundation::{FileStatus, RepairKind, RunSummary};
use std::fmt::Write;

/// Render `summary` for the terminal
pub fn render(summary: &RunSummary, options: RunOptions) -> String {
    let mut out = String::new();
    match options.mode {
        Mode::Audit => render_audit(&mut out, summary),
        Mode::Fix | Mode::Repair => render_changes(&mut out, summary, options.dry_run),
    }
    render_skipped(&mut out, summary);
    out
}

fn render_changes(out: &mut String, summary: &RunSummary, dry_run: bool) {
    for file in summary.changed() {
        let marker = match file.status {
            FileStatus::Changed { written: true } => "✓",
            _ => "~",
        };
        let _ = writeln!(out, "{} {}", marker, file.path.display());

        for repair in &file.repairs {
            let action = match repair.kind {
                RepairKind::Inserted => "closed",
                RepairKind::Replaced => "fixed closing quote of",
            };
            let _ = writeln!(
                out,
                "    {:>4}: {} {}{}",
                repair.line, action, repair.quote, repair.path
            );
        }
        for edit in &file.edits {
            let _ = writeln!(out, "    {:>4}: {} -> {}", edit.line, edit.from, edit.to);
        }
    }

    let mut ambiguous_header = false;
    for file in &summary.files {
        for event in &file.ambiguous {
            if !ambiguous_header {
                let _ = writeln!(out, "\nAmbiguous quotes (left untouched):");
                ambiguous_header = true;
            }
            let _ = writeln!(
                out,
                "  {}:{}:{}  {}",
                file.path.display(),
                event.line,
                event.column,
                event.snippet
            );
        }
    }

    let verb = if dry_run { "would change" } else { "changed" };
    let _ = writeln!(
        out,
        "\n{} files scanned, {} {}, {} skipped, {} ambiguous",
        summary.files_scanned,
        summary.changed_count(),
        verb,
        summary.skipped_count(),
        summary.ambiguous_count()
    );
}

fn render_audit(out: &mut String, summary: &RunSummary) {
    let mut files_with_findings = 0;
    for file in &summary.files {
        if file.findings.is_empty() {
            continue;
        }
        files_with_findings += 1;
        for finding in &file.findings {
            let _ = writeln!(
                out,
                "{}:{}:{}  {}",
                file.path.display(),
                finding.line,
                finding.column,
                finding.statement
            );
            match &finding.canonical {
                Some(canonical) if canonical != &finding.path => {
                    let _ = writeln!(out, "    canonical: {}", canonical);
                }
                Some(_) => {}
                None if finding.registered => {
                    let _ = writeln!(out, "    no canonical path from this folder");
                }
                None => {
                    let _ = writeln!(out, "    unregistered module '{}'", finding.module);
                }
            }
        }
    }

    let _ = writeln!(
        out,
        "\n{} cross-folder relative imports in {} files ({} files scanned)",
        summary.finding_count(),
        files_with_findings,
        summary.files_scanned
    );
}

fn render_skipped(out: &mut String, summary: &RunSummary) {
    for file in summary.skipped() {
        if let FileStatus::Skipped { reason } = &file.status {
            let _ = writeln!(out, "⚠ skipped {}: {}", file.path.display(), reason);
        }
    }
}
