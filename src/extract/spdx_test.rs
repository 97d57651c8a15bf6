mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::cancel::CancelFlag;
    use crate::extract::{ExtractError, ManifestExtractor, SpdxExtractor};
    use crate::models::{Ecosystem, PackageRecord, UNRESOLVED_VERSION};

    fn document_with_packages(packages: &str) -> String {
        format!(
            r#"{{
    "spdxVersion": "SPDX-2.3",
    "dataLicense": "CC0-1.0",
    "SPDXID": "SPDXRef-DOCUMENT",
    "name": "demo-application",
    "documentNamespace": "https://example.com/spdxdocs/demo",
    "creationInfo": {{
        "creators": ["Tool: demo-sbom-generator"],
        "created": "2024-05-01T00:00:00Z"
    }},
    "packages": [{}],
    "relationships": []
}}"#,
            packages
        )
    }

    fn write_document(packages: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("demo.spdx.json");
        fs::write(&path, document_with_packages(packages)).expect("write sbom");
        (dir, path)
    }

    fn extract(path: &Path) -> Vec<PackageRecord> {
        SpdxExtractor::extract(path, &CancelFlag::new()).expect("extract sbom")
    }

    const EXPRESS_PACKAGE: &str = r#"{
        "name": "express",
        "SPDXID": "SPDXRef-Package-express",
        "versionInfo": "4.17.1",
        "downloadLocation": "NOASSERTION",
        "externalRefs": [{
            "referenceCategory": "PACKAGE-MANAGER",
            "referenceType": "purl",
            "referenceLocator": "pkg:npm/express@4.17.1"
        }]
    }"#;

    #[test]
    fn test_purl_backed_package() {
        let (_dir, path) = write_document(EXPRESS_PACKAGE);
        let records = extract(&path);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "express");
        assert_eq!(records[0].version, "4.17.1");
        assert_eq!(records[0].ecosystem, Ecosystem::Npm);
        assert_eq!(records[0].compare_as, Ecosystem::Npm);
    }

    #[test]
    fn test_purl_namespace_joins_name() {
        let (_dir, path) = write_document(
            r#"{
                "name": "commons-lang3",
                "SPDXID": "SPDXRef-Package-commons",
                "downloadLocation": "NOASSERTION",
                "externalRefs": [{
                    "referenceCategory": "PACKAGE-MANAGER",
                    "referenceType": "purl",
                    "referenceLocator": "pkg:maven/org.apache.commons/commons-lang3@3.12.0"
                }]
            }"#,
        );
        let records = extract(&path);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "org.apache.commons:commons-lang3");
        assert_eq!(records[0].version, "3.12.0");
        assert_eq!(records[0].ecosystem, Ecosystem::Maven);
    }

    #[test]
    fn test_purl_wins_over_free_text_fields() {
        let (_dir, path) = write_document(
            r#"{
                "name": "npm:wrong/free-text-name",
                "SPDXID": "SPDXRef-Package-disagree",
                "versionInfo": "9.9.9",
                "downloadLocation": "NOASSERTION",
                "externalRefs": [{
                    "referenceCategory": "PACKAGE-MANAGER",
                    "referenceType": "purl",
                    "referenceLocator": "pkg:pypi/urllib3@1.26.5"
                }]
            }"#,
        );
        let records = extract(&path);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "urllib3");
        assert_eq!(records[0].version, "1.26.5");
        assert_eq!(records[0].ecosystem, Ecosystem::PyPi);
    }

    #[test]
    fn test_document_self_reference_is_skipped() {
        let packages = format!(
            r#"{{
                "name": "demo-application",
                "SPDXID": "SPDXRef-Package-self",
                "versionInfo": "1.0.0",
                "downloadLocation": "NOASSERTION"
            }}, {}"#,
            EXPRESS_PACKAGE
        );
        let (_dir, path) = write_document(&packages);
        let records = extract(&path);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "express");
    }

    #[test]
    fn test_unrecognized_purl_type_drops_node_only() {
        let packages = format!(
            r#"{{
                "name": "mystery",
                "SPDXID": "SPDXRef-Package-mystery",
                "downloadLocation": "NOASSERTION",
                "externalRefs": [{{
                    "referenceCategory": "PACKAGE-MANAGER",
                    "referenceType": "purl",
                    "referenceLocator": "pkg:someregistry/mystery@1.0.0"
                }}]
            }}, {}"#,
            EXPRESS_PACKAGE
        );
        let (_dir, path) = write_document(&packages);
        let records = extract(&path);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "express");
    }

    #[test]
    fn test_malformed_purl_drops_node_only() {
        let packages = format!(
            r#"{{
                "name": "broken",
                "SPDXID": "SPDXRef-Package-broken",
                "downloadLocation": "NOASSERTION",
                "externalRefs": [{{
                    "referenceCategory": "PACKAGE-MANAGER",
                    "referenceType": "purl",
                    "referenceLocator": "not a purl at all"
                }}]
            }}, {}"#,
            EXPRESS_PACKAGE
        );
        let (_dir, path) = write_document(&packages);
        let records = extract(&path);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "express");
    }

    #[test]
    fn test_free_text_fallback_with_type_and_group() {
        let (_dir, path) = write_document(
            r#"{
                "name": "maven:com.example/widget",
                "SPDXID": "SPDXRef-Package-widget",
                "versionInfo": ">= 1.2.3",
                "downloadLocation": "NOASSERTION"
            }"#,
        );
        let records = extract(&path);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "com.example:widget");
        assert_eq!(records[0].version, "1.2.3");
        assert_eq!(records[0].ecosystem, Ecosystem::Maven);
    }

    #[test]
    fn test_free_text_unparsable_version_degrades_to_sentinel() {
        let (_dir, path) = write_document(
            r#"{
                "name": "npm:leftpad",
                "SPDXID": "SPDXRef-Package-leftpad",
                "versionInfo": "1.2 beta (unstable)",
                "downloadLocation": "NOASSERTION"
            }"#,
        );
        let records = extract(&path);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "leftpad");
        assert_eq!(records[0].version, UNRESOLVED_VERSION);
        assert_eq!(records[0].ecosystem, Ecosystem::Npm);
    }

    #[test]
    fn test_free_text_without_ecosystem_prefix_is_dropped() {
        let (_dir, path) = write_document(
            r#"{
                "name": "just-a-name",
                "SPDXID": "SPDXRef-Package-bare",
                "versionInfo": "2.0.0",
                "downloadLocation": "NOASSERTION"
            }"#,
        );

        assert!(extract(&path).is_empty());
    }

    #[test]
    fn test_empty_free_text_name_drops_node_only() {
        let packages = format!(
            r#"{{
                "name": "",
                "SPDXID": "SPDXRef-Package-unnamed",
                "versionInfo": "1.0.0",
                "downloadLocation": "NOASSERTION"
            }}, {}"#,
            EXPRESS_PACKAGE
        );
        let (_dir, path) = write_document(&packages);
        let records = extract(&path);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "express");
    }

    #[test]
    fn test_malformed_document_is_file_fatal() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("broken.spdx.json");
        fs::write(&path, "{ this is not json").expect("write sbom");

        let result = SpdxExtractor::extract(&path, &CancelFlag::new());
        assert!(matches!(result, Err(ExtractError::Sbom(_))));
    }

    #[test]
    fn test_cancellation_is_observed() {
        let (_dir, path) = write_document(EXPRESS_PACKAGE);
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result = SpdxExtractor::extract(&path, &cancel);
        assert!(matches!(result, Err(ExtractError::Cancelled)));
    }

    #[test]
    fn test_is_match_requires_spdx_json_suffix() {
        assert!(SpdxExtractor::is_match(Path::new("out/app.spdx.json")));
        assert!(!SpdxExtractor::is_match(Path::new("out/app.json")));
        assert!(!SpdxExtractor::is_match(Path::new("out/app.spdx")));
    }
}
