use serde::{Deserialize, Serialize};

use super::Ecosystem;

/// Placeholder meaning "version intentionally unresolved", distinct
/// from an actual version zero. Recording a dependency with an unknown
/// version is strictly preferable to silently dropping it.
pub const UNRESOLVED_VERSION: &str = "0.0.0";

/// One normalized package extracted from a manifest or SBOM.
///
/// `version` is never empty: extractors that cannot recover a version
/// use [`UNRESOLVED_VERSION`]. `compare_as` names the ecosystem whose
/// version-comparison rules apply to this record; for the extractors in
/// this crate it always equals `ecosystem`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_expression: Option<String>,
    pub ecosystem: Ecosystem,
    pub compare_as: Ecosystem,
}

impl PackageRecord {
    /// Creates a record with a resolved version.
    pub fn new(name: String, version: String, ecosystem: Ecosystem) -> Self {
        debug_assert!(!version.is_empty());
        PackageRecord {
            name,
            version,
            version_expression: None,
            ecosystem,
            compare_as: ecosystem,
        }
    }

    /// Creates a record whose version could not be recovered.
    pub fn unresolved(name: String, ecosystem: Ecosystem) -> Self {
        PackageRecord::new(name, UNRESOLVED_VERSION.to_string(), ecosystem)
    }
}
