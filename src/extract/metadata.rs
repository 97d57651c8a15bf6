/// Extractor metadata for the `--list-formats` CLI surface.
///
/// Each extractor registers a static description of the files it
/// handles; the registry is collected at link time via `inventory`.
#[derive(Debug, Clone)]
pub struct ExtractorMetadata {
    /// Human-readable description (e.g., "python setup.py manifest")
    pub description: &'static str,
    /// File patterns this extractor matches (e.g., ["**/setup.py"])
    pub file_patterns: &'static [&'static str],
    /// Ecosystem token the records carry, or "any" for SBOM formats
    pub ecosystem: &'static str,
    /// Optional documentation URL
    pub documentation_url: Option<&'static str>,
}

inventory::collect!(ExtractorMetadata);

/// Registers extractor metadata for the format listing.
///
/// # Example
///
/// ```ignore
/// register_extractor!(
///     "python setup.py manifest",
///     &["**/setup.py"],
///     "pypi",
///     Some("https://setuptools.pypa.io/en/latest/references/keywords.html"),
/// );
/// ```
#[macro_export]
macro_rules! register_extractor {
    ($description:expr, $patterns:expr, $ecosystem:expr, $docs_url:expr $(,)?) => {
        inventory::submit! {
            $crate::extract::metadata::ExtractorMetadata {
                description: $description,
                file_patterns: $patterns,
                ecosystem: $ecosystem,
                documentation_url: $docs_url,
            }
        }
    };
}
