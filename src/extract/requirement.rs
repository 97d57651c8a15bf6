//! Parser for single python dependency specifiers.
//!
//! Turns one requirement token (`"flask>=1.0"`) into a normalized
//! [`PackageRecord`] with ecosystem PyPI. This intentionally recovers
//! *a* usable version string, never a satisfiability-complete range:
//! the operator list is probed in a fixed order and the first hit wins,
//! whatever its semantic tightness.

use crate::models::{Ecosystem, PackageRecord};

/// Probed in this order; `==` is preferred, the rest fall through
/// without regard to tightness.
const VERSION_OPERATORS: [&str; 6] = ["==", ">", ">=", "<", "<=", "~="];

/// Parses one dependency text token into a package record.
///
/// Never errors: a malformed token degrades to a record named after the
/// token with the sentinel version.
pub fn parse_requirement_spec(spec: &str) -> PackageRecord {
    // Everything after the first space (markers, comments) is not part
    // of the name/version portion.
    let token = spec.split(' ').next().unwrap_or_default().trim();
    if token.is_empty() {
        return PackageRecord::unresolved(spec.trim().to_string(), Ecosystem::PyPi);
    }

    for op in VERSION_OPERATORS {
        if let Some((name, rest)) = token.split_once(op) {
            if name.is_empty() {
                break;
            }
            // A looser operator can match inside a tighter one
            // (">" inside ">="); the leading "=" left behind is not
            // part of the version.
            let version = rest.trim_start_matches('=').trim();
            if version.is_empty() {
                return PackageRecord::unresolved(name.to_string(), Ecosystem::PyPi);
            }
            let mut record =
                PackageRecord::new(name.to_string(), version.to_string(), Ecosystem::PyPi);
            record.version_expression = Some(token[name.len()..].to_string());
            return record;
        }
    }

    PackageRecord::unresolved(token.to_string(), Ecosystem::PyPi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNRESOLVED_VERSION;

    #[test]
    fn test_every_operator_recovers_name_and_version() {
        for op in VERSION_OPERATORS {
            let spec = format!("requests{}2.31", op);
            let record = parse_requirement_spec(&spec);
            assert_eq!(record.name, "requests", "operator {}", op);
            assert_eq!(record.version, "2.31", "operator {}", op);
            assert_eq!(record.ecosystem, Ecosystem::PyPi);
            assert_eq!(record.compare_as, Ecosystem::PyPi);
        }
    }

    #[test]
    fn test_greater_equal() {
        let record = parse_requirement_spec("urllib3>=1.22");
        assert_eq!(record.name, "urllib3");
        assert_eq!(record.version, "1.22");
        assert_eq!(record.version_expression.as_deref(), Some(">=1.22"));
    }

    #[test]
    fn test_bare_name_degrades_to_sentinel() {
        let record = parse_requirement_spec("dnspython");
        assert_eq!(record.name, "dnspython");
        assert_eq!(record.version, UNRESOLVED_VERSION);
        assert_eq!(record.version_expression, None);
    }

    #[test]
    fn test_marker_after_space_is_ignored() {
        let record = parse_requirement_spec("flask==1.0 ; python_version >= '3.6'");
        assert_eq!(record.name, "flask");
        assert_eq!(record.version, "1.0");
    }

    #[test]
    fn test_operator_without_version() {
        let record = parse_requirement_spec("flask==");
        assert_eq!(record.name, "flask");
        assert_eq!(record.version, UNRESOLVED_VERSION);
    }

    #[test]
    fn test_malformed_token_never_errors() {
        let record = parse_requirement_spec("==1.0");
        assert_eq!(record.name, "==1.0");
        assert_eq!(record.version, UNRESOLVED_VERSION);

        let record = parse_requirement_spec("   ");
        assert_eq!(record.version, UNRESOLVED_VERSION);
    }

    #[test]
    fn test_compatible_release_operator() {
        let record = parse_requirement_spec("django~=4.2.0");
        assert_eq!(record.name, "django");
        assert_eq!(record.version, "4.2.0");
    }
}
