mod count;
mod process;

use glob::Pattern;
use std::path::Path;

use crate::models::FileReport;

pub struct ProcessResult {
    pub files: Vec<FileReport>,
    pub excluded_count: usize,
}

/// Checks a path against the exclusion globs, matching both the full
/// path and the bare file name so patterns like `node_modules` work
/// without a leading `**/`.
pub(crate) fn is_path_excluded(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    exclude_patterns.iter().any(|pattern| {
        pattern.matches_path(path)
            || path
                .file_name()
                .map(|name| pattern.matches(&name.to_string_lossy()))
                .unwrap_or(false)
    })
}

pub use self::count::count;
pub use self::process::process;
