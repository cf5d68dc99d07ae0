//! Spec discovery by glob pattern

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use walkdir::WalkDir;

use crate::error::{HarnessError, Result};

/// Compile a spec glob over `/`-separated relative paths.
///
/// `*` and `?` stay inside one path segment, `**/` spans any number of
/// directories (including none), `{a,b}` is alternation.
pub fn spec_matcher(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| HarnessError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Spec files under `root` matching `pattern`, sorted, as paths relative to `root`
pub fn discover_specs(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = spec_matcher(pattern)?;
    let mut specs = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            HarnessError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let normalized = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if matcher.is_match(&normalized) {
            specs.push(relative.to_path_buf());
        }
    }

    specs.sort();
    Ok(specs)
}
