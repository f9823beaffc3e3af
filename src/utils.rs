//! Path-collection helpers for front-ends.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Expand multiple glob patterns into filesystem paths.
///
/// A pattern that matches nothing but names an existing file literally
/// resolves to that file, so plain paths work unchanged.
///
/// Returns a flattened list of resolved paths, in pattern order.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let pattern = pattern.as_ref();

        let entries = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {pattern}"))?;

        let mut matched = false;
        for entry in entries {
            let path = entry.with_context(|| format!("failed to expand pattern: {pattern}"))?;
            resolved_paths.push(path);
            matched = true;
        }

        if !matched {
            let literal = PathBuf::from(pattern);
            if literal.exists() {
                resolved_paths.push(literal);
            }
        }
    }

    Ok(resolved_paths)
}
