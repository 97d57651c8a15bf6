mod error;
pub mod metadata;
mod requirement;
mod setup_py;
mod spdx;
#[cfg(test)]
mod spdx_test;
mod utils;

use std::path::Path;

use crate::cancel::CancelFlag;
use crate::models::PackageRecord;

pub use self::error::ExtractError;
pub use self::metadata::ExtractorMetadata;
pub use self::requirement::parse_requirement_spec;
pub use self::setup_py::SetupPyExtractor;
pub use self::spdx::SpdxExtractor;
pub(crate) use self::utils::read_file_to_string;

/// Manifest extractor trait for turning dependency declarations into
/// normalized package records.
///
/// Each implementation handles one manifest format (setup.py, SPDX
/// SBOM, ...) and produces an ordered `Vec<PackageRecord>` for the
/// generic scanner to consume uniformly.
///
/// # Error Handling
///
/// `extract` fails only for file-fatal conditions (unreadable file,
/// unparsable document root); see [`ExtractError`]. Item-level problems
/// inside a document are dropped with a debug log or degraded to the
/// sentinel version, so a scan proceeds over all other items.
///
/// # State
///
/// Extractors hold no state across calls: every invocation builds its
/// working tables fresh for the one file it was handed, which lets the
/// scanner fan files out across threads without sharing anything but
/// the [`CancelFlag`].
pub trait ManifestExtractor {
    /// Checks if the given file path matches this extractor's expected
    /// format. Used by the scanner to route files.
    fn is_match(path: &Path) -> bool;

    /// Extracts the full ordered package list from the given file.
    ///
    /// An empty list is a valid result (for example, a setup.py whose
    /// `install_requires` cannot be resolved), not an error.
    fn extract(path: &Path, cancel: &CancelFlag) -> Result<Vec<PackageRecord>, ExtractError>;
}

macro_rules! define_extractors {
    ($($extractor:ty),* $(,)?) => {
        /// Routes a file to the first matching extractor.
        ///
        /// Returns `None` when no extractor recognizes the path.
        pub fn try_extract_file(
            path: &Path,
            cancel: &CancelFlag,
        ) -> Option<Result<Vec<PackageRecord>, ExtractError>> {
            $(
                if <$extractor>::is_match(path) {
                    return Some(<$extractor>::extract(path, cancel));
                }
            )*
            None
        }

        /// Checks whether any extractor recognizes the path.
        pub fn is_manifest_file(path: &Path) -> bool {
            $(<$extractor>::is_match(path) ||)* false
        }
    };
}

define_extractors! {
    SetupPyExtractor,
    SpdxExtractor,
}
