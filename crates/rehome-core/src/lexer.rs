//! Clause lexer
//!
//! Walks source text once and yields every `from <quote><path>` clause with
//! exact byte spans. Comments, string literals and template literals are
//! skipped so that text which merely looks like an import is never reported.
//!
//! The lexer knows nothing about modules or layouts; it only answers "where is
//! the path literal and how does it end". Classification happens in
//! [`crate::clause`], repair in [`crate::quote_repair`].

use rehome_foundation::QuoteChar;
use std::ops::Range;

/// How a clause's string literal ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closing {
    /// Closed by the opening quote right after the path
    Matched,
    /// No quote of either kind before the statement terminator
    Missing,
    /// A single quote of the other kind follows the path; `at` is its offset
    Mismatched { at: usize },
    /// The opening quote appears later in the statement after non-path text
    Irregular,
    /// Stray quotes or trailing text; the closing position is not unique
    Ambiguous,
}

/// A `from` clause found in source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseToken<'a> {
    /// Offset of the `from` keyword
    pub keyword_at: usize,
    pub quote: QuoteChar,
    /// Span of the path text, quotes excluded
    pub path_span: Range<usize>,
    pub path: &'a str,
    pub closing: Closing,
    /// Offset where scanning resumes after this clause
    pub end: usize,
}

impl ClauseToken<'_> {
    pub fn is_well_formed(&self) -> bool {
        self.closing == Closing::Matched
    }
}

/// Find every `from` clause in `text`, in source order
pub fn scan_clauses(text: &str) -> Vec<ClauseToken<'_>> {
    let bytes = text.as_bytes();
    let mut clauses = Vec::new();
    let mut prev_significant: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        match byte {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line(bytes, i);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i + 2);
            }
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                prev_significant = Some(byte);
            }
            b'`' => {
                i = skip_template(bytes, i);
                prev_significant = Some(byte);
            }
            _ if is_ident_start(byte) => {
                let start = i;
                while i < bytes.len() && is_ident_continue(bytes[i]) {
                    i += 1;
                }

                if &bytes[start..i] == b"from" && prev_significant != Some(b'.') {
                    if let Some(token) = read_clause(text, start, i) {
                        i = token.end;
                        prev_significant = Some(b'"');
                        clauses.push(token);
                        continue;
                    }
                }
                prev_significant = Some(bytes[i - 1]);
            }
            _ => {
                if !byte.is_ascii_whitespace() {
                    prev_significant = Some(byte);
                }
                i += 1;
            }
        }
    }

    clauses
}

/// 1-based line and column (in characters) of a byte offset
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// The trimmed source line containing `offset`
pub fn line_at(text: &str, offset: usize) -> &str {
    let offset = offset.min(text.len());
    let start = text[..offset].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let end = text[offset..]
        .find('\n')
        .map(|idx| offset + idx)
        .unwrap_or(text.len());
    text[start..end].trim()
}

fn read_clause(text: &str, keyword_at: usize, after_keyword: usize) -> Option<ClauseToken<'_>> {
    let bytes = text.as_bytes();

    let mut open = after_keyword;
    while open < bytes.len() && matches!(bytes[open], b' ' | b'\t') {
        open += 1;
    }
    let quote = QuoteChar::from_byte(*bytes.get(open)?)?;

    let path_start = open + 1;
    let mut path_end = path_start;
    while path_end < bytes.len() && is_path_byte(bytes[path_end]) {
        path_end += 1;
    }

    let terminator = find_terminator(bytes, path_end);
    let rest = &text[path_end..terminator];

    let (closing, end) = if bytes.get(path_end) == Some(&quote.as_byte()) {
        (Closing::Matched, path_end + 1)
    } else if !rest.contains(['"', '\'']) {
        (Closing::Missing, terminator)
    } else if let Some(idx) = rest.find(quote.as_char()) {
        (Closing::Irregular, path_end + idx + 1)
    } else if rest.trim().len() == 1 && rest.trim().starts_with(quote.opposite().as_char()) {
        let at = path_end + (rest.len() - rest.trim_start().len());
        (Closing::Mismatched { at }, terminator)
    } else {
        (Closing::Ambiguous, terminator)
    };

    Some(ClauseToken {
        keyword_at,
        quote,
        path_span: path_start..path_end,
        path: &text[path_start..path_end],
        closing,
        end,
    })
}

/// First `;`, newline or end of text at or after `from`
fn find_terminator(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|b| matches!(b, b';' | b'\n' | b'\r'))
        .map(|idx| from + idx)
        .unwrap_or(bytes.len())
}

fn is_path_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(byte, b'_' | b'-' | b'.' | b'/' | b'@' | b'$' | b'~' | b'+' | b'#')
        || byte >= 0x80
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$' || byte >= 0x80
}

fn is_ident_continue(byte: u8) -> bool {
    is_ident_start(byte) || byte.is_ascii_digit()
}

fn skip_line(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|idx| from + idx)
        .unwrap_or(bytes.len())
}

fn skip_block_comment(bytes: &[u8], from: usize) -> usize {
    bytes[from.min(bytes.len())..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|idx| from + idx + 2)
        .unwrap_or(bytes.len())
}

/// Skip a single-line string literal; unterminated strings stop at the newline
fn skip_string(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_template(bytes: &[u8], open: usize) -> usize {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(text: &str) -> ClauseToken<'_> {
        let clauses = scan_clauses(text);
        assert_eq!(clauses.len(), 1, "expected one clause in {text:?}: {clauses:?}");
        clauses.into_iter().next().unwrap()
    }

    #[test]
    fn test_well_formed_clause() {
        let text = "import Button from \"@/components/Button\";\n";
        let clause = single(text);
        assert_eq!(clause.path, "@/components/Button");
        assert_eq!(clause.quote, QuoteChar::Double);
        assert_eq!(clause.closing, Closing::Matched);
        assert_eq!(&text[clause.path_span.clone()], "@/components/Button");
        assert_eq!(clause.keyword_at, text.find("from").unwrap());
    }

    #[test]
    fn test_missing_closing_quote() {
        for text in [
            "import Button from \"@/components/Button\n",
            "import Button from '@/components/Button;\n",
            "import Button from \"@/components/Button   ;",
            "import Button from \"@/components/Button",
            "import Button from \"@/components/Button\r\n",
        ] {
            let clause = single(text);
            assert_eq!(clause.closing, Closing::Missing, "{text:?}");
            assert_eq!(clause.path, "@/components/Button");
        }
    }

    #[test]
    fn test_mismatched_closing_quote() {
        let text = "import Button from \"@/components/Button';\n";
        let clause = single(text);
        assert_eq!(
            clause.closing,
            Closing::Mismatched {
                at: text.find('\'').unwrap()
            }
        );
    }

    #[test]
    fn test_ambiguous_closing() {
        let clause = single("import Button from \"@/components/Button'';\n");
        assert_eq!(clause.closing, Closing::Ambiguous);

        let clause = single("import Button from \"@/components/Button' as X;\n");
        assert_eq!(clause.closing, Closing::Ambiguous);
    }

    #[test]
    fn test_trailing_text_without_quotes_is_missing() {
        for text in [
            "import Button from \"@/components/Button // moved\n",
            "import Button from '@/components/Button /* was view */;\n",
        ] {
            let clause = single(text);
            assert_eq!(clause.closing, Closing::Missing, "{text:?}");
            assert_eq!(clause.path, "@/components/Button");
        }
    }

    #[test]
    fn test_mismatched_closer_after_whitespace() {
        let text = "import Button from \"@/components/Button ';\n";
        let clause = single(text);
        assert_eq!(clause.path, "@/components/Button");
        assert_eq!(
            clause.closing,
            Closing::Mismatched {
                at: text.find('\'').unwrap()
            }
        );
    }

    #[test]
    fn test_irregular_literal_is_skipped_past() {
        let text = "import a from \"some file\"; import b from './b';";
        let clauses = scan_clauses(text);
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].closing, Closing::Irregular);
        assert_eq!(clauses[1].path, "./b");
        assert!(clauses[1].is_well_formed());
    }

    #[test]
    fn test_multiline_imports() {
        let text = "import {\n  a,\n  b,\n} from '../common/Input';\nexport { c } from \"./c\";\n";
        let paths: Vec<_> = scan_clauses(text).iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["../common/Input", "./c"]);
    }

    #[test]
    fn test_comments_and_strings_are_ignored() {
        let text = r#"
// import Old from "./Old";
/* import Older from './Older'; */
const s = "import X from './X'";
const t = `from "./Template"`;
const label = 'from';
import Real from "./Real";
"#;
        let paths: Vec<_> = scan_clauses(text).iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["./Real"]);
    }

    #[test]
    fn test_from_as_member_or_identifier_is_ignored() {
        let text = "const xs = Array.from(\"abc\");\nconst from = 'x';\nconst o = { from: \"./y\" };\n";
        assert!(scan_clauses(text).is_empty());
    }

    #[test]
    fn test_identifier_containing_from_is_ignored() {
        assert!(scan_clauses("const datafrom = \"./x\";").is_empty());
        assert!(scan_clauses("fromage \"./x\"").is_empty());
    }

    #[test]
    fn test_unicode_text_around_clauses() {
        let text = "// 한국어 주석\nimport 지도 from './지도';\nconst s = '제주';\n";
        let clause = single(text);
        assert_eq!(clause.path, "./지도");
        assert!(clause.is_well_formed());
    }

    #[test]
    fn test_line_col_and_line_at() {
        let text = "a\nimport X from './X';\n";
        let offset = text.find("./X").unwrap();
        assert_eq!(line_col(text, offset), (2, 16));
        assert_eq!(line_at(text, offset), "import X from './X';");
    }
}
