//! Canonical import path computation
//!
//! [`PathResolver::resolve`] is a pure function of its inputs: the module
//! name, its canonical folder, the project-relative folder of the importing
//! file and the import style to produce.

use crate::paths::{normalize_relative, to_specifier};
use rehome_foundation::{ImportStyle, Layout};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PathResolver {
    layout: Layout,
}

impl PathResolver {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Canonical path text for `name` living in `canonical_folder`.
    ///
    /// - `RootAliased`: `<alias>/<folder>/<name>`, independent of `source_folder`
    /// - relative styles: `./<name>` when the importing file already sits in the
    ///   canonical folder, otherwise the `..` chain from `source_folder` up to
    ///   the common ancestor followed by the rest of the way down
    ///
    /// Returns `None` for `Malformed`, or when `source_folder` is not a
    /// project-relative folder.
    pub fn resolve(
        &self,
        name: &str,
        canonical_folder: &str,
        source_folder: &Path,
        style: ImportStyle,
    ) -> Option<String> {
        match style {
            ImportStyle::RootAliased => Some(format!(
                "{}/{}/{}",
                self.layout.alias_base(),
                canonical_folder,
                name
            )),
            ImportStyle::RelativeSameFolder | ImportStyle::RelativeOtherFolder => {
                self.resolve_relative(name, canonical_folder, source_folder)
            }
            ImportStyle::Malformed => None,
        }
    }

    fn resolve_relative(
        &self,
        name: &str,
        canonical_folder: &str,
        source_folder: &Path,
    ) -> Option<String> {
        let base = normalize_relative(source_folder)?;
        let target = normalize_relative(
            &self
                .layout
                .components_dir
                .join(canonical_folder)
                .join(name),
        )?;

        let relative = pathdiff::diff_paths(&target, &base)?;
        let text = to_specifier(&relative);

        if text.starts_with("..") {
            Some(text)
        } else {
            Some(format!("./{}", text))
        }
    }
}
