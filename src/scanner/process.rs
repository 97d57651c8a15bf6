use anyhow::Error;
use glob::Pattern;
use indicatif::ProgressBar;
use log::warn;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::cancel::CancelFlag;
use crate::extract::{ExtractError, is_manifest_file, try_extract_file};
use crate::models::FileReport;
use crate::scanner::{ProcessResult, is_path_excluded};

/// Walks `path` and extracts every recognized manifest/SBOM file.
///
/// Files of one directory run in parallel; each file gets a fresh
/// extractor run (no state is shared beyond the cancellation flag).
/// One file's failure becomes that file's `scan_errors` entry, never a
/// scan abort.
pub fn process<P: AsRef<Path>>(
    path: P,
    max_depth: usize,
    progress_bar: Arc<ProgressBar>,
    exclude_patterns: &[Pattern],
    cancel: &CancelFlag,
) -> Result<ProcessResult, Error> {
    let path = path.as_ref();

    if is_path_excluded(path, exclude_patterns) {
        return Ok(ProcessResult {
            files: Vec::new(),
            excluded_count: 1,
        });
    }

    let mut all_files = Vec::new();
    let mut total_excluded = 0;

    let entries: Vec<_> = fs::read_dir(path)?.filter_map(Result::ok).collect();

    let mut manifest_paths = Vec::new();
    let mut dir_paths = Vec::new();

    for entry in entries {
        let path = entry.path();

        if is_path_excluded(&path, exclude_patterns) {
            total_excluded += 1;
            continue;
        }

        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => {
                if is_manifest_file(&path) {
                    manifest_paths.push(path);
                }
            }
            Ok(metadata) if metadata.is_dir() => dir_paths.push(path),
            _ => continue,
        }
    }

    // Extract manifests in parallel, one extractor run per file
    all_files.append(
        &mut manifest_paths
            .par_iter()
            .filter_map(|path| {
                let report = process_file(path, cancel);
                progress_bar.inc(1);
                report
            })
            .collect(),
    );

    for path in dir_paths {
        if max_depth == 0 {
            continue;
        }
        match process(
            &path,
            max_depth - 1,
            progress_bar.clone(),
            exclude_patterns,
            cancel,
        ) {
            Ok(mut result) => {
                all_files.append(&mut result.files);
                total_excluded += result.excluded_count;
            }
            Err(e) => warn!("Error processing directory {}: {}", path.display(), e),
        }
    }

    Ok(ProcessResult {
        files: all_files,
        excluded_count: total_excluded,
    })
}

fn process_file(path: &Path, cancel: &CancelFlag) -> Option<FileReport> {
    if cancel.is_cancelled() {
        return None;
    }

    let outcome = try_extract_file(path, cancel)?;
    let report = match outcome {
        Ok(packages) => FileReport {
            path: path.to_string_lossy().to_string(),
            packages,
            scan_errors: Vec::new(),
        },
        Err(ExtractError::Cancelled) => return None,
        Err(e) => {
            warn!("Failed to extract {}: {}", path.display(), e);
            FileReport {
                path: path.to_string_lossy().to_string(),
                packages: Vec::new(),
                scan_errors: vec![e.to_string()],
            }
        }
    };

    Some(report)
}
