use super::PackageRecord;
use serde::Serialize;

pub const OUTPUT_FORMAT_VERSION: &str = "1.0.0";

#[derive(Serialize, Debug)]
pub struct Output {
    pub headers: Vec<Header>,
    pub files: Vec<FileReport>,
}

#[derive(Serialize, Debug)]
pub struct Header {
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub duration: f64,
    pub extra_data: ExtraData,
    pub errors: Vec<String>,
    pub output_format_version: String,
}

#[derive(Serialize, Debug)]
pub struct ExtraData {
    pub files_count: usize,
    pub directories_count: usize,
    pub excluded_count: usize,
    pub system_environment: SystemEnvironment,
}

#[derive(Serialize, Debug)]
pub struct SystemEnvironment {
    pub operating_system: Option<String>,
    pub cpu_architecture: String,
    pub platform: String,
    pub rust_version: String,
}

/// Extraction result for one scanned manifest or SBOM file.
///
/// `packages` is empty and `scan_errors` non-empty when the file-level
/// extraction failed; item-level drops inside a document do not appear
/// here, only in debug logs.
#[derive(Serialize, Debug, Clone)]
pub struct FileReport {
    pub path: String,
    pub packages: Vec<PackageRecord>,
    pub scan_errors: Vec<String>,
}
