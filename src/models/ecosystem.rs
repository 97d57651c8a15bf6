//! Ecosystem identifiers for extracted packages.
//!
//! Each variant uniquely identifies the package registry a record
//! originates from. These are used both as the `"ecosystem"` field in
//! JSON output and as the target of Package URL (purl) type mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Package origin registry identifier.
///
/// Identifies the package manager or ecosystem a package belongs to
/// (e.g., npm, PyPI, Maven, Cargo). For the official list of
/// standardized purl types, see:
/// <https://github.com/package-url/purl-spec/blob/main/purl-types-index.json>
///
/// # Serialization
///
/// Variants serialize to the lowercase purl-type token. `pypi` and
/// `pip` purl types resolve to the same [`Ecosystem::PyPi`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    Alpine,
    Cargo,
    Cocoapods,
    Composer,
    Conan,
    Cran,
    Debian,
    Gem,
    Golang,
    Hex,
    Maven,
    Npm,
    Nuget,
    Pub,
    PyPi,
}

impl Ecosystem {
    /// Returns the string representation of this ecosystem.
    ///
    /// This matches the serialized form used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpine => "alpine",
            Self::Cargo => "cargo",
            Self::Cocoapods => "cocoapods",
            Self::Composer => "composer",
            Self::Conan => "conan",
            Self::Cran => "cran",
            Self::Debian => "deb",
            Self::Gem => "gem",
            Self::Golang => "golang",
            Self::Hex => "hex",
            Self::Maven => "maven",
            Self::Npm => "npm",
            Self::Nuget => "nuget",
            Self::Pub => "pub",
            Self::PyPi => "pypi",
        }
    }

    /// Maps a purl-type token to its ecosystem.
    ///
    /// Returns `None` for unrecognized tokens. Callers must treat that
    /// as a recoverable per-item condition, never a reason to abort a
    /// whole document or file.
    pub fn from_purl_type(token: &str) -> Option<Ecosystem> {
        match token {
            "alpine" | "apk" => Some(Ecosystem::Alpine),
            "cargo" => Some(Ecosystem::Cargo),
            "cocoapods" => Some(Ecosystem::Cocoapods),
            "composer" => Some(Ecosystem::Composer),
            "conan" => Some(Ecosystem::Conan),
            "cran" => Some(Ecosystem::Cran),
            "deb" => Some(Ecosystem::Debian),
            "gem" => Some(Ecosystem::Gem),
            "golang" => Some(Ecosystem::Golang),
            "hex" => Some(Ecosystem::Hex),
            "maven" => Some(Ecosystem::Maven),
            "npm" => Some(Ecosystem::Npm),
            "nuget" => Some(Ecosystem::Nuget),
            "pub" => Some(Ecosystem::Pub),
            "pypi" | "pip" => Some(Ecosystem::PyPi),
            _ => None,
        }
    }
}

impl Serialize for Ecosystem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Ecosystem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ecosystem::from_purl_type(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown ecosystem: {}", s)))
    }
}

impl AsRef<str> for Ecosystem {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
