use std::fs;
use std::path::{Path, PathBuf};

use kite_core::KiteError;
use walkdir::WalkDir;

/// Every file under `root` whose name ends with the suffix of a `*.ext`
/// pattern or equals a plain pattern, sorted by path.
pub fn find_files(root: &Path, patterns: &[&str]) -> Vec<PathBuf> {
    let mut matches = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let matched = patterns.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(suffix) => file_name.ends_with(suffix),
            None => file_name == *pattern,
        });
        if matched {
            matches.push(entry.into_path());
        }
    }

    matches.sort();
    matches
}

/// Reads a source file as UTF-8, dropping a leading byte-order mark.
pub fn read_source(path: &Path) -> Result<String, KiteError> {
    let text = fs::read_to_string(path).map_err(|error| {
        KiteError::with_path(
            "SOURCE_READ",
            format!("Failed to read {}: {}", path.display(), error),
            path,
        )
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
