//! Import rewriting: quote repair followed by path normalization
//!
//! [`ImportRewriter::rewrite`] is the engine's entry point. It runs two passes
//! with fixed precedence:
//!
//! 1. [`QuoteRepairer`] closes unterminated literals so they can be classified
//! 2. every clause naming a registered module is rewritten to its canonical
//!    path text, in the style it was written in
//!
//! A clause is only replaced when its text differs from the canonical text, so
//! feeding the output back in reports `changed == false`.

use crate::clause::ImportClause;
use crate::lexer::{line_col, line_at, scan_clauses};
use crate::paths::{is_within, normalize_relative};
use crate::quote_repair::{QuoteRepairer, RepairOutcome};
use crate::registry::ModuleRegistry;
use crate::resolver::PathResolver;
use rehome_foundation::{
    AmbiguousQuote, AuditFinding, ClauseEdit, ImportStyle, Layout, QuoteRepair, StylePolicy,
};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, trace};

/// Result of rewriting one file's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub text: String,
    pub changed: bool,
    pub repairs: Vec<QuoteRepair>,
    pub edits: Vec<ClauseEdit>,
    pub ambiguous: Vec<AmbiguousQuote>,
}

impl RewriteOutcome {
    /// `(new_text, changed)`
    pub fn into_parts(self) -> (String, bool) {
        (self.text, self.changed)
    }
}

#[derive(Debug, Clone)]
pub struct ImportRewriter {
    registry: ModuleRegistry,
    resolver: PathResolver,
    repairer: QuoteRepairer,
    policy: StylePolicy,
}

impl ImportRewriter {
    pub fn new(registry: ModuleRegistry, layout: Layout) -> Self {
        Self {
            registry,
            repairer: QuoteRepairer::new(&layout),
            resolver: PathResolver::new(layout),
            policy: StylePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: StylePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn repairer(&self) -> &QuoteRepairer {
        &self.repairer
    }

    pub fn layout(&self) -> &Layout {
        self.resolver.layout()
    }

    /// Repair and normalize the imports of a file located in `source_folder`
    /// (a folder relative to the project root).
    pub fn rewrite(&self, text: &str, source_folder: &Path) -> RewriteOutcome {
        let RepairOutcome {
            text: repaired,
            changed: repaired_changed,
            repairs,
            ambiguous,
        } = self.repairer.repair(text);

        let mut replacements: Vec<(Range<usize>, String)> = Vec::new();
        let mut edits = Vec::new();

        for token in scan_clauses(&repaired) {
            let Some(clause) = ImportClause::classify(&token, self.layout(), source_folder) else {
                continue;
            };
            if clause.style == ImportStyle::Malformed {
                continue;
            }

            let Some(canonical_folder) = self.registry.lookup(clause.module) else {
                trace!(module = %clause.module, "Module not registered, clause left as is");
                continue;
            };

            let style = self.target_style(clause.style, source_folder);
            let Some(resolved) =
                self.resolver
                    .resolve(clause.module, canonical_folder, source_folder, style)
            else {
                debug!(
                    module = %clause.module,
                    folder = %source_folder.display(),
                    "No canonical path for clause, left as is"
                );
                continue;
            };

            let canonical = clause.with_extension(resolved);
            if canonical == clause.path_text {
                continue;
            }

            let (line, _) = line_col(&repaired, clause.keyword_at);
            debug!(line, from = %clause.path_text, to = %canonical, "Rewriting import path");
            edits.push(ClauseEdit {
                line,
                module: clause.module.to_string(),
                style: clause.style,
                from: clause.path_text.to_string(),
                to: canonical.clone(),
            });
            replacements.push((clause.path_span.clone(), canonical));
        }

        let text = if replacements.is_empty() {
            repaired
        } else {
            apply_replacements(&repaired, &replacements)
        };

        RewriteOutcome {
            text,
            changed: repaired_changed || !edits.is_empty(),
            repairs,
            edits,
            ambiguous,
        }
    }

    /// Read-only diagnostic: every relative clause reaching into another folder
    pub fn audit(&self, text: &str, source_folder: &Path) -> Vec<AuditFinding> {
        let mut findings = Vec::new();

        for token in scan_clauses(text) {
            let Some(clause) = ImportClause::classify(&token, self.layout(), source_folder) else {
                continue;
            };
            if clause.style != ImportStyle::RelativeOtherFolder {
                continue;
            }

            let canonical_folder = self.registry.lookup(clause.module);
            let canonical = canonical_folder.and_then(|folder| {
                self.resolver
                    .resolve(clause.module, folder, source_folder, clause.style)
                    .map(|resolved| clause.with_extension(resolved))
            });
            let (line, column) = line_col(text, clause.path_span.start);

            findings.push(AuditFinding {
                line,
                column,
                path: clause.path_text.to_string(),
                module: clause.module.to_string(),
                registered: canonical_folder.is_some(),
                canonical,
                statement: line_at(text, clause.keyword_at).to_string(),
            });
        }

        findings
    }

    fn target_style(&self, written: ImportStyle, source_folder: &Path) -> ImportStyle {
        match self.policy {
            StylePolicy::Preserve => written,
            StylePolicy::AliasOutsideComponents => {
                let inside = normalize_relative(source_folder)
                    .map(|folder| is_within(&folder, &self.layout().components_dir))
                    .unwrap_or(false);
                if written.is_relative() && !inside {
                    ImportStyle::RootAliased
                } else {
                    written
                }
            }
        }
    }
}

/// Splice replacements (sorted, non-overlapping spans) into `text`
fn apply_replacements(text: &str, replacements: &[(Range<usize>, String)]) -> String {
    let mut output = String::with_capacity(text.len() + 32);
    let mut cursor = 0;
    for (span, replacement) in replacements {
        output.push_str(&text[cursor..span.start]);
        output.push_str(replacement);
        cursor = span.end;
    }
    output.push_str(&text[cursor..]);
    output
}
