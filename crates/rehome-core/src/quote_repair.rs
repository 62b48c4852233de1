//! Repair of import literals left without a proper closing quote
//!
//! Only clauses whose path starts with the alias root (`@/`) or a relative
//! root (`./`, `../`) are considered, so arbitrary strings that happen to
//! follow a `from` are never touched. Repairs never add a second closing quote:
//! a literal that already closes is reported unchanged.

use crate::lexer::{line_at, line_col, scan_clauses, Closing};
use rehome_foundation::{AmbiguousQuote, Layout, QuoteRepair, RepairKind};
use tracing::{debug, warn};

/// Result of a repair pass over a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub text: String,
    pub changed: bool,
    pub repairs: Vec<QuoteRepair>,
    pub ambiguous: Vec<AmbiguousQuote>,
}

#[derive(Debug, Clone)]
pub struct QuoteRepairer {
    alias_root: String,
}

impl QuoteRepairer {
    pub fn new(layout: &Layout) -> Self {
        Self {
            alias_root: layout.alias_root().to_string(),
        }
    }

    /// Close every unterminated import literal in `text`.
    ///
    /// A missing closer is inserted right after the last path character; a
    /// closer of the wrong kind is dropped and the opener's character is put
    /// right after the path instead.
    /// Clauses whose closing position is not unique are left alone and
    /// listed in [`RepairOutcome::ambiguous`].
    pub fn repair(&self, text: &str) -> RepairOutcome {
        let mut output = String::with_capacity(text.len() + 8);
        let mut repairs = Vec::new();
        let mut ambiguous = Vec::new();
        let mut cursor = 0;

        for token in scan_clauses(text) {
            if !self.is_tracked(token.path) {
                continue;
            }

            let (line, _) = line_col(text, token.keyword_at);
            match token.closing {
                Closing::Missing => {
                    let insert_at = token.path_span.end;
                    output.push_str(&text[cursor..insert_at]);
                    output.push(token.quote.as_char());
                    cursor = insert_at;

                    debug!(line, path = %token.path, "Inserted missing closing quote");
                    repairs.push(QuoteRepair {
                        line,
                        path: token.path.to_string(),
                        quote: token.quote,
                        kind: RepairKind::Inserted,
                    });
                }
                Closing::Mismatched { at } => {
                    // Closer goes right after the path; whitespace before the stray quote stays outside
                    let close_at = token.path_span.end;
                    output.push_str(&text[cursor..close_at]);
                    output.push(token.quote.as_char());
                    output.push_str(&text[close_at..at]);
                    cursor = at + 1;

                    debug!(line, path = %token.path, "Replaced mismatched closing quote");
                    repairs.push(QuoteRepair {
                        line,
                        path: token.path.to_string(),
                        quote: token.quote,
                        kind: RepairKind::Replaced,
                    });
                }
                Closing::Ambiguous => {
                    let (line, column) = line_col(text, token.path_span.end);
                    let snippet = line_at(text, token.keyword_at).to_string();
                    warn!(line, column, statement = %snippet, "Ambiguous closing quote left unmodified");
                    ambiguous.push(AmbiguousQuote {
                        line,
                        column,
                        snippet,
                    });
                }
                Closing::Matched | Closing::Irregular => {}
            }
        }

        if repairs.is_empty() {
            return RepairOutcome {
                text: text.to_string(),
                changed: false,
                repairs,
                ambiguous,
            };
        }

        output.push_str(&text[cursor..]);
        RepairOutcome {
            text: output,
            changed: true,
            repairs,
            ambiguous,
        }
    }

    fn is_tracked(&self, path: &str) -> bool {
        path.starts_with(self.alias_root.as_str()) || path.starts_with("./") || path.starts_with("../")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repairer() -> QuoteRepairer {
        QuoteRepairer::new(&Layout::default())
    }

    #[test]
    fn test_inserts_missing_quote_before_newline() {
        let outcome = repairer().repair("import Button from \"@/components/Button\nconst x = 1;\n");
        assert!(outcome.changed);
        assert_eq!(
            outcome.text,
            "import Button from \"@/components/Button\"\nconst x = 1;\n"
        );
        assert_eq!(outcome.repairs.len(), 1);
        assert_eq!(outcome.repairs[0].kind, RepairKind::Inserted);
        assert_eq!(outcome.repairs[0].line, 1);
    }

    #[test]
    fn test_inserts_missing_quote_before_semicolon_and_at_eof() {
        let outcome = repairer().repair("import A from '../common/A;\nimport B from './B");
        assert_eq!(outcome.text, "import A from '../common/A';\nimport B from './B'");
        assert_eq!(outcome.repairs.len(), 2);
    }

    #[test]
    fn test_insertion_goes_before_trailing_whitespace() {
        let outcome = repairer().repair("import A from \"@/components/A  ;\r\n");
        assert_eq!(outcome.text, "import A from \"@/components/A\"  ;\r\n");
    }

    #[test]
    fn test_well_formed_text_is_untouched() {
        let text = "import A from \"@/components/A\";\nimport B from './B';\n";
        let outcome = repairer().repair(text);
        assert!(!outcome.changed);
        assert_eq!(outcome.text, text);
        assert!(outcome.repairs.is_empty());
        assert!(outcome.ambiguous.is_empty());
    }

    #[test]
    fn test_second_pass_reports_no_change() {
        let first = repairer().repair("import A from \"@/components/A\n");
        let second = repairer().repair(&first.text);
        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(second.text, first.text);
    }

    #[test]
    fn test_unrelated_strings_are_ignored() {
        let text = "import React from 'react\nimport x from \"lodash\n";
        let outcome = repairer().repair(text);
        assert!(!outcome.changed);
        assert_eq!(outcome.text, text);
    }

    #[test]
    fn test_mismatched_closer_prefers_opener() {
        let outcome = repairer().repair("import A from \"@/components/A';\n");
        assert_eq!(outcome.text, "import A from \"@/components/A\";\n");
        assert_eq!(outcome.repairs[0].kind, RepairKind::Replaced);
    }

    #[test]
    fn test_mismatched_closer_after_whitespace_keeps_path_clean() {
        let outcome = repairer().repair("import A from \"@/components/A ';\n");
        assert_eq!(outcome.text, "import A from \"@/components/A\" ;\n");
        assert_eq!(outcome.repairs[0].kind, RepairKind::Replaced);
        assert!(!repairer().repair(&outcome.text).changed);
    }

    #[test]
    fn test_missing_quote_before_trailing_comment() {
        let outcome = repairer().repair("import A from \"@/components/A // moved\n");
        assert!(outcome.changed);
        assert!(outcome.ambiguous.is_empty());
        assert_eq!(outcome.text, "import A from \"@/components/A\" // moved\n");
    }

    #[test]
    fn test_ambiguous_closer_is_reported_not_guessed() {
        let text = "import A from \"@/components/A'';\nimport B from \"@/components/B\n";
        let outcome = repairer().repair(text);
        assert_eq!(outcome.ambiguous.len(), 1);
        assert_eq!(outcome.ambiguous[0].line, 1);
        assert_eq!(outcome.ambiguous[0].snippet, "import A from \"@/components/A'';");
        assert_eq!(
            outcome.text,
            "import A from \"@/components/A'';\nimport B from \"@/components/B\"\n"
        );
    }
}
