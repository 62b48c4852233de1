//! Core data model shared by the engine, the configuration layer and the CLI

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A module and the single folder it canonically lives in.
///
/// `name` is the bare module name (final path segment, extension stripped) and
/// `canonical_folder` is a direct subfolder of the components directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    pub name: String,
    pub canonical_folder: String,
}

impl ModuleRecord {
    pub fn new(name: impl Into<String>, canonical_folder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            canonical_folder: canonical_folder.into(),
        }
    }
}

/// The two quote characters an import literal may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteChar {
    Double,
    Single,
}

impl QuoteChar {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'"' => Some(Self::Double),
            b'\'' => Some(Self::Single),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    /// The other recognized quote character
    pub fn opposite(self) -> Self {
        match self {
            Self::Double => Self::Single,
            Self::Single => Self::Double,
        }
    }
}

impl fmt::Display for QuoteChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Shape of an import path as the author wrote it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportStyle {
    /// `./Name`
    RelativeSameFolder,
    /// `../folder/Name`, `../../components/folder/Name`, `./folder/Name`
    RelativeOtherFolder,
    /// `@/components/folder/Name`
    RootAliased,
    /// Opening quote without a closing one
    Malformed,
}

impl ImportStyle {
    pub fn is_relative(self) -> bool {
        matches!(self, Self::RelativeSameFolder | Self::RelativeOtherFolder)
    }
}

impl fmt::Display for ImportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RelativeSameFolder => "relative-same-folder",
            Self::RelativeOtherFolder => "relative-other-folder",
            Self::RootAliased => "root-aliased",
            Self::Malformed => "malformed",
        };
        f.write_str(label)
    }
}

/// Project geometry: where components live and how the alias spells them.
///
/// `components_dir` is relative to the project root. `alias_prefix` is the
/// location-independent spelling of that same directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub components_dir: PathBuf,
    pub alias_prefix: String,
}

impl Layout {
    pub fn new(components_dir: impl Into<PathBuf>, alias_prefix: impl Into<String>) -> Self {
        Self {
            components_dir: components_dir.into(),
            alias_prefix: alias_prefix.into(),
        }
    }

    /// Alias prefix without a trailing slash (`@/components`)
    pub fn alias_base(&self) -> &str {
        self.alias_prefix.trim_end_matches('/')
    }

    /// Alias prefix up to and including its first `/` (`@/`)
    ///
    /// Falls back to the whole prefix when it has no slash.
    pub fn alias_root(&self) -> &str {
        match self.alias_prefix.find('/') {
            Some(idx) => &self.alias_prefix[..=idx],
            None => &self.alias_prefix,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("src/components", "@/components")
    }
}

/// How the rewriter treats the author's import style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylePolicy {
    /// Keep relative clauses relative and aliased clauses aliased
    #[default]
    Preserve,
    /// Files outside the components directory get aliased clauses
    AliasOutsideComponents,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_alias_root_and_base() {
        let layout = Layout::default();
        assert_eq!(layout.alias_base(), "@/components");
        assert_eq!(layout.alias_root(), "@/");

        let trailing = Layout::new("src/components", "~/ui/");
        assert_eq!(trailing.alias_base(), "~/ui");
        assert_eq!(trailing.alias_root(), "~/");
    }

    #[test]
    fn test_quote_opposite() {
        assert_eq!(QuoteChar::Double.opposite(), QuoteChar::Single);
        assert_eq!(QuoteChar::from_byte(b'\''), Some(QuoteChar::Single));
        assert_eq!(QuoteChar::from_byte(b'`'), None);
    }
}
