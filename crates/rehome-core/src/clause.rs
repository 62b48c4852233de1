//! Import clause classification
//!
//! Turns a lexed [`ClauseToken`] into an [`ImportClause`]: which module it
//! names, which style it is written in, and whether it points into the
//! components tree at all. Clauses that do not are dropped here and never
//! reach the resolver.

use crate::lexer::{ClauseToken, Closing};
use crate::paths::{is_within, join_specifier};
use rehome_foundation::{ImportStyle, Layout, QuoteChar};
use std::ops::Range;
use std::path::Path;

/// Extensions stripped from the final segment before registry lookup
const SCRIPT_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js", "mjs", "cjs"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportClause<'a> {
    pub quote: QuoteChar,
    pub path_text: &'a str,
    pub path_span: Range<usize>,
    pub keyword_at: usize,
    pub style: ImportStyle,
    /// Bare module name, extension stripped
    pub module: &'a str,
    /// Script extension as written (without the dot)
    pub extension: Option<&'a str>,
}

impl<'a> ImportClause<'a> {
    /// Classify `token` as written in a file located in `source_folder`.
    ///
    /// Returns `None` when the path is neither root-aliased under the layout's
    /// alias prefix nor a relative path landing inside the components
    /// directory.
    pub fn classify(token: &ClauseToken<'a>, layout: &Layout, source_folder: &Path) -> Option<Self> {
        let path = token.path;
        let shape = classify_shape(path, layout, source_folder)?;

        let style = match token.closing {
            Closing::Matched => shape,
            Closing::Missing | Closing::Mismatched { .. } | Closing::Ambiguous => {
                ImportStyle::Malformed
            }
            Closing::Irregular => return None,
        };

        let last_segment = path.rsplit('/').next().unwrap_or(path);
        let (module, extension) = split_extension(last_segment);
        if module.is_empty() {
            return None;
        }

        Some(Self {
            quote: token.quote,
            path_text: path,
            path_span: token.path_span.clone(),
            keyword_at: token.keyword_at,
            style,
            module,
            extension,
        })
    }

    /// Append the clause's own extension to a resolved path
    pub fn with_extension(&self, resolved: String) -> String {
        match self.extension {
            Some(ext) => format!("{}.{}", resolved, ext),
            None => resolved,
        }
    }
}

fn classify_shape(path: &str, layout: &Layout, source_folder: &Path) -> Option<ImportStyle> {
    let alias = layout.alias_base();
    if let Some(rest) = path.strip_prefix(alias) {
        return match rest.strip_prefix('/') {
            Some(tail) if !tail.is_empty() => Some(ImportStyle::RootAliased),
            _ => None,
        };
    }

    if !(path.starts_with("./") || path.starts_with("../")) {
        return None;
    }

    let target = join_specifier(source_folder, path)?;
    if !is_within(&target, &layout.components_dir) {
        return None;
    }

    match path.strip_prefix("./") {
        Some(tail) if !tail.contains('/') => Some(ImportStyle::RelativeSameFolder),
        _ => Some(ImportStyle::RelativeOtherFolder),
    }
}

fn split_extension(segment: &str) -> (&str, Option<&str>) {
    if let Some((stem, ext)) = segment.rsplit_once('.') {
        if !stem.is_empty() && SCRIPT_EXTENSIONS.contains(&ext) {
            return (stem, Some(ext));
        }
    }
    (segment, None)
}
