//! Extractor for SPDX JSON SBOM documents.
//!
//! Deserialization of the document itself is delegated to `spdx_rs`;
//! this module reconciles each package node's reliable machine
//! identifier (the purl external reference) with its unreliable
//! free-text name/version fields. The purl, when present, is
//! authoritative even where the free-text fields disagree. Nodes
//! without a purl fall back to layered heuristics over the free-text
//! fields, and per-node failures (malformed purl, unrecognized
//! ecosystem type) drop that node only, logged at debug level.

use std::path::Path;
use std::str::FromStr;

use lazy_static::lazy_static;
use packageurl::PackageUrl;
use regex::Regex;
use spdx_rs::models::{PackageInformation, SPDX};

use crate::cancel::CancelFlag;
use crate::models::{Ecosystem, PackageRecord, UNRESOLVED_VERSION};

use super::error::ExtractError;
use super::{ManifestExtractor, read_file_to_string};

const PURL_REFERENCE_TYPE: &str = "purl";

lazy_static! {
    // Greedy type prefix, then greedy group prefix. Ambiguous for
    // names containing ':' or '/' themselves; downstream consumers
    // depend on this split, so it stays as is.
    static ref FREE_TEXT_NAME: Regex =
        Regex::new(r"^(?:([^:]+):)?(?:([^/]+)/)?(.+)$").expect("static pattern");
    static ref FREE_TEXT_VERSION: Regex =
        Regex::new(r"^\s*([<>=!~]+)?\s*(\d+\.\d+(\.\d+)?)?\s*$").expect("static pattern");
}

/// SPDX SBOM package extractor.
///
/// Emits one record per package node, excluding the document's
/// self-referential node and any node that fails both the purl path
/// and the free-text fallback.
pub struct SpdxExtractor;

impl ManifestExtractor for SpdxExtractor {
    fn is_match(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".spdx.json"))
    }

    fn extract(path: &Path, cancel: &CancelFlag) -> Result<Vec<PackageRecord>, ExtractError> {
        let content = read_file_to_string(path).map_err(|e| ExtractError::io(path, e))?;
        let document: SPDX =
            serde_json::from_str(&content).map_err(|e| ExtractError::Sbom(e.to_string()))?;

        let document_name = &document.document_creation_information.document_name;
        let mut records = Vec::new();

        for package in &document.package_information {
            if cancel.is_cancelled() {
                return Err(ExtractError::Cancelled);
            }

            // The document's own package node describes the scanned
            // artifact, not a dependency.
            if &package.package_name == document_name {
                continue;
            }

            if let Some(record) = record_from_package(package) {
                records.push(record);
            }
        }

        Ok(records)
    }
}

fn record_from_package(package: &PackageInformation) -> Option<PackageRecord> {
    if let Some(locator) = purl_reference(package) {
        // Authoritative; the free-text fields are not consulted even
        // when they disagree.
        return record_from_purl(locator);
    }
    record_from_free_text(package)
}

fn purl_reference(package: &PackageInformation) -> Option<&str> {
    package
        .external_reference
        .iter()
        .find(|reference| reference.reference_type == PURL_REFERENCE_TYPE)
        .map(|reference| reference.reference_locator.as_str())
}

fn record_from_purl(locator: &str) -> Option<PackageRecord> {
    let purl = match PackageUrl::from_str(locator) {
        Ok(purl) => purl,
        Err(e) => {
            log::debug!("dropping package with malformed purl {:?}: {}", locator, e);
            return None;
        }
    };

    let Some(ecosystem) = Ecosystem::from_purl_type(purl.ty()) else {
        log::debug!(
            "dropping package with unrecognized purl type {:?} in {:?}",
            purl.ty(),
            locator
        );
        return None;
    };

    let name = match purl.namespace() {
        Some(namespace) => format!("{}:{}", namespace, purl.name()),
        None => purl.name().to_string(),
    };
    let version = purl
        .version()
        .filter(|version| !version.is_empty())
        .unwrap_or(UNRESOLVED_VERSION)
        .to_string();

    Some(PackageRecord::new(name, version, ecosystem))
}

fn record_from_free_text(package: &PackageInformation) -> Option<PackageRecord> {
    let Some(captures) = FREE_TEXT_NAME.captures(&package.package_name) else {
        log::debug!(
            "dropping package with unusable free-text name {:?}",
            package.package_name
        );
        return None;
    };
    let ecosystem_type = captures.get(1).map(|m| m.as_str());
    let group = captures.get(2).map(|m| m.as_str());
    let name = captures.get(3).map(|m| m.as_str())?;

    // A record without an ecosystem is unusable downstream, so a
    // missing or unrecognized type prefix drops the node just like a
    // bad purl type would.
    let Some(ecosystem) = ecosystem_type.and_then(Ecosystem::from_purl_type) else {
        log::debug!(
            "dropping package {:?}: no usable ecosystem in free-text name",
            package.package_name
        );
        return None;
    };

    let name = match group {
        Some(group) => format!("{}:{}", group, name),
        None => name.to_string(),
    };

    let version = package
        .package_version
        .as_deref()
        .and_then(parse_free_text_version)
        .unwrap_or_else(|| UNRESOLVED_VERSION.to_string());

    Some(PackageRecord::new(name, version, ecosystem))
}

fn parse_free_text_version(field: &str) -> Option<String> {
    FREE_TEXT_VERSION
        .captures(field)?
        .get(2)
        .map(|m| m.as_str().to_string())
}

crate::register_extractor!(
    "SPDX JSON software bill of materials",
    &["**/*.spdx.json"],
    "any",
    Some("https://spdx.github.io/spdx-spec/v2.3/"),
);
