//! Glob pattern expansion.
use std::path::{Path, PathBuf};

use crate::build::{Error, Result};

/// A regular file matched by one of the input patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// Location to read the file from.
    pub path: PathBuf,
    /// The path as matched, relative to the pattern root. Symbol names and
    /// public paths are derived from this.
    pub name: String,
}

/// Shell semantics: wildcards never match a leading `.`.
const MATCH_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Expands a whitespace-separated list of glob patterns into the files they
/// match.
///
/// Patterns are resolved against `root`, or the current directory when it is
/// `None`. Results keep pattern order; within a pattern they come in the order
/// the matcher yields them. A pattern that matches nothing contributes
/// nothing, and anything that is not a regular file is skipped. Hidden files
/// are only matched by patterns that spell out their leading dot.
///
/// # Errors
/// Returns [`Error::Pattern`] if a pattern is not valid glob syntax.
pub fn expand(root: Option<&Path>, patterns: &str) -> Result<Vec<MatchedFile>> {
    let mut matched = Vec::new();

    for pattern in patterns.split_whitespace() {
        let full_pattern = match root {
            Some(root) => PathBuf::from(glob::Pattern::escape(&root.to_string_lossy()))
                .join(pattern)
                .to_string_lossy()
                .into_owned(),
            None => pattern.to_owned(),
        };

        let paths =
            glob::glob_with(&full_pattern, MATCH_OPTIONS).map_err(|source| Error::Pattern {
                pattern: pattern.to_owned(),
                source,
            })?;

        let before = matched.len();
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    tracing::warn!(path = %err.path().display(), error = %err.error(), "skipping unreadable glob entry");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }

            let name = root
                .and_then(|root| path.strip_prefix(root).ok())
                .unwrap_or(path.as_path())
                .to_string_lossy()
                .into_owned();
            matched.push(MatchedFile { path, name });
        }
        tracing::debug!(pattern, matches = matched.len() - before, "expanded pattern");
    }

    Ok(matched)
}

/// The leading directories of `pattern` that contain no wildcards.
///
/// New files can only appear as matches somewhere below this directory.
#[must_use]
pub fn literal_dir(pattern: &str) -> PathBuf {
    let components: Vec<_> = Path::new(pattern).components().collect();
    let mut dir = PathBuf::new();
    for component in &components[..components.len().saturating_sub(1)] {
        if component.as_os_str().to_string_lossy().contains(['*', '?', '[']) {
            break;
        }
        dir.push(component);
    }
    dir
}
