//! File discovery and per-file processing
//!
//! Walks the configured roots, then runs the engine over every matching file
//! on the tokio runtime. Each file is independent: a failed read or write is
//! recorded in that file's report and the run continues.

use rehome_config::logging::file_span;
use rehome_config::{AppConfig, ScanConfig};
use rehome_core::{ImportRewriter, ModuleRegistry};
use rehome_foundation::{FileReport, FileStatus, RehomeError, RehomeResult, RunSummary};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn, Instrument};
use walkdir::WalkDir;

/// What to do with each file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Quote repair followed by path normalization
    Fix,
    /// Quote repair only
    Repair,
    /// Read-only report of cross-folder relative imports
    Audit,
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub mode: Mode,
    /// Compute changes without writing them
    pub dry_run: bool,
}

pub struct Runner {
    root: PathBuf,
    scan: ScanConfig,
    rewriter: Arc<ImportRewriter>,
}

impl Runner {
    /// Build the registry and engine for `config`.
    ///
    /// Fails on registry collisions; nothing has been read or written yet at
    /// that point.
    pub fn new(root: impl Into<PathBuf>, config: &AppConfig) -> RehomeResult<Self> {
        let registry = ModuleRegistry::from_records(config.registry.records())?;
        if registry.is_empty() {
            warn!("Module registry is empty, no import will be rewritten");
        } else {
            info!(modules = registry.len(), "Module registry loaded");
        }

        let rewriter = ImportRewriter::new(registry, config.layout.clone())
            .with_policy(config.rewrite.style);

        Ok(Self {
            root: root.into(),
            scan: config.scan.clone(),
            rewriter: Arc::new(rewriter),
        })
    }

    /// Source files under the configured roots, sorted; walk errors are
    /// returned as skipped reports
    pub fn discover(&self) -> (Vec<PathBuf>, Vec<FileReport>) {
        let mut files = Vec::new();
        let mut failures = Vec::new();

        for scan_root in &self.scan.roots {
            let dir = self.root.join(scan_root);
            if !dir.exists() {
                warn!(root = %dir.display(), "Scan root does not exist");
                continue;
            }

            let walker = WalkDir::new(&dir).into_iter().filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !entry
                        .file_name()
                        .to_str()
                        .map(|name| self.scan.is_excluded_dir(name))
                        .unwrap_or(false)
            });

            for entry in walker {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file() && self.scan.matches_extension(entry.path()) {
                            files.push(entry.into_path());
                        }
                    }
                    Err(e) => {
                        let path = e
                            .path()
                            .map(|p| self.relative(p))
                            .unwrap_or_else(|| scan_root.clone());
                        warn!(path = %path.display(), error = %e, "Failed to walk directory");
                        failures.push(FileReport::skipped(path, e.to_string()));
                    }
                }
            }
        }

        files.sort();
        files.dedup();
        debug!(count = files.len(), "Discovered source files");
        (files, failures)
    }

    /// Process every discovered file
    pub async fn run(&self, options: RunOptions) -> RunSummary {
        let (files, mut reports) = self.discover();
        let files_scanned = files.len();
        let semaphore = Arc::new(Semaphore::new(self.scan.concurrency));
        let mut tasks = JoinSet::new();

        for path in files {
            let relative = self.relative(&path);
            let rewriter = Arc::clone(&self.rewriter);
            let semaphore = Arc::clone(&semaphore);
            let span = file_span(&relative);

            tasks.spawn(
                async move {
                    let Ok(_permit) = semaphore.acquire_owned().await else {
                        return FileReport::skipped(relative, "processing was cancelled");
                    };
                    process_file(&rewriter, &path, relative, options).await
                }
                .instrument(span),
            );
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => error!(error = %e, "File task failed"),
            }
        }

        RunSummary::from_reports(files_scanned, reports)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

async fn process_file(
    rewriter: &ImportRewriter,
    path: &Path,
    relative: PathBuf,
    options: RunOptions,
) -> FileReport {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            let err = RehomeError::unreadable(&relative, e);
            warn!(error = %err, "Skipping file");
            return FileReport::skipped(relative, err.to_string());
        }
    };

    let folder = relative.parent().unwrap_or_else(|| Path::new("")).to_path_buf();

    let mut report = FileReport::new(relative, FileStatus::Unchanged);
    let new_text = match options.mode {
        Mode::Audit => {
            report.findings = rewriter.audit(&text, &folder);
            return report;
        }
        Mode::Repair => {
            let outcome = rewriter.repairer().repair(&text);
            report.repairs = outcome.repairs;
            report.ambiguous = outcome.ambiguous;
            outcome.changed.then_some(outcome.text)
        }
        Mode::Fix => {
            let outcome = rewriter.rewrite(&text, &folder);
            report.repairs = outcome.repairs;
            report.edits = outcome.edits;
            report.ambiguous = outcome.ambiguous;
            outcome.changed.then_some(outcome.text)
        }
    };

    let Some(new_text) = new_text else {
        return report;
    };

    if options.dry_run {
        report.status = FileStatus::Changed { written: false };
        return report;
    }

    match tokio::fs::write(path, new_text).await {
        Ok(()) => {
            info!(
                edits = report.edits.len(),
                repairs = report.repairs.len(),
                "Updated file"
            );
            report.status = FileStatus::Changed { written: true };
        }
        Err(e) => {
            let err = RehomeError::unwritable(&report.path, e);
            warn!(error = %err, "Skipping file");
            report.status = FileStatus::Skipped {
                reason: err.to_string(),
            };
        }
    }

    report
}
