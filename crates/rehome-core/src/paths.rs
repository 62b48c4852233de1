//! Lexical path helpers
//!
//! Nothing here touches the filesystem: import specifiers are resolved purely
//! by string arithmetic against the project-relative folder of the importing
//! file.

use std::path::{Component, Path, PathBuf};

/// Normalize a project-relative path, folding `.` and `..` components.
///
/// Returns `None` for absolute paths and for paths that climb above the
/// project root.
pub fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(parts.iter().collect())
}

/// Resolve an import specifier written in `folder` to a project-relative path
pub fn join_specifier(folder: &Path, specifier: &str) -> Option<PathBuf> {
    let mut joined = folder.to_path_buf();
    for segment in specifier.split('/').filter(|s| !s.is_empty()) {
        joined.push(segment);
    }
    normalize_relative(&joined)
}

/// Render a relative path with `/` separators regardless of platform
pub fn to_specifier(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether `path` is `dir` or lies below it
pub fn is_within(path: &Path, dir: &Path) -> bool {
    path.starts_with(dir)
}
