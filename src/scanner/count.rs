use glob::Pattern;
use std::fs;
use std::path::Path;

use crate::extract::is_manifest_file;
use crate::scanner::is_path_excluded;

/// Counts extractable manifest files, directories, and excluded items
/// under `path`, so the scan can size its progress bar up front.
pub fn count<P: AsRef<Path>>(
    path: P,
    max_depth: usize,
    exclude_patterns: &[Pattern],
) -> std::io::Result<(usize, usize, usize)> {
    let path = path.as_ref();

    if is_path_excluded(path, exclude_patterns) {
        return Ok((0, 0, 1));
    }

    let mut manifests_count = 0;
    let mut dirs_count = 1; // Count the current directory
    let mut excluded_count = 0;

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let entry_path = entry.path();

        if is_path_excluded(&entry_path, exclude_patterns) {
            excluded_count += 1;
            continue;
        }

        let metadata = entry.metadata()?;
        if metadata.is_file() {
            if is_manifest_file(&entry_path) {
                manifests_count += 1;
            }
        } else if metadata.is_dir() && max_depth > 0 {
            let (sub_manifests, sub_dirs, sub_excluded) =
                count(&entry_path, max_depth - 1, exclude_patterns)?;

            manifests_count += sub_manifests;
            dirs_count += sub_dirs;
            excluded_count += sub_excluded;
        }
    }

    Ok((manifests_count, dirs_count, excluded_count))
}
