//! Schema versioning.
//!
//! Contract payloads carry a `"major.minor"` schema version. Within a major
//! version, evolution is additive only; the mechanical check lives in the
//! `contracts-compat` crate.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Schema version of a contract payload, `"major.minor"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaVersion {
    major: u32,
    minor: u32,
}

impl SchemaVersion {
    /// First published version of every schema.
    pub const BASELINE: SchemaVersion = SchemaVersion { major: 1, minor: 0 };

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Payloads are interchangeable iff their major versions match.
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        self.major == other.major
    }

    pub fn is_baseline(&self) -> bool {
        *self == Self::BASELINE
    }

    /// Next additive revision.
    pub fn bump_minor(&self) -> Self {
        Self::new(self.major, self.minor + 1)
    }

    /// Next breaking revision.
    pub fn bump_major(&self) -> Self {
        Self::new(self.major + 1, 0)
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl core::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for SchemaVersion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            ValidationError::type_mismatch(
                "schema_version",
                format!("invalid schema version '{s}', expected 'major.minor'"),
            )
        };
        let (major, minor) = s.split_once('.').ok_or_else(malformed)?;
        Ok(Self::new(
            major.parse().map_err(|_| malformed())?,
            minor.parse().map_err(|_| malformed())?,
        ))
    }
}

impl TryFrom<String> for SchemaVersion {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SchemaVersion> for String {
    fn from(value: SchemaVersion) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_minor() {
        for (input, major, minor) in [("1.0", 1, 0), ("2.0", 2, 0), ("1.5", 1, 5), ("10.99", 10, 99)]
        {
            assert_eq!(input.parse::<SchemaVersion>().unwrap(), SchemaVersion::new(major, minor));
        }
    }

    #[test]
    fn rejects_malformed_versions() {
        for input in ["abc", "1", "1.2.3", "v1.0", "1.x", "", "-1.0"] {
            assert!(input.parse::<SchemaVersion>().is_err(), "{input:?} accepted");
        }
    }

    #[test]
    fn compatibility_is_same_major() {
        let v1 = SchemaVersion::new(1, 0);
        assert!(v1.is_compatible_with(&SchemaVersion::new(1, 5)));
        assert!(v1.is_compatible_with(&SchemaVersion::new(1, 99)));
        assert!(!v1.is_compatible_with(&SchemaVersion::new(2, 0)));
        assert!(!v1.is_compatible_with(&SchemaVersion::new(0, 9)));
    }

    #[test]
    fn ordering_follows_major_then_minor() {
        assert!(SchemaVersion::new(1, 9) < SchemaVersion::new(2, 0));
        assert!(SchemaVersion::new(1, 0) < SchemaVersion::new(1, 1));
        assert_eq!(SchemaVersion::BASELINE.bump_minor(), SchemaVersion::new(1, 1));
        assert_eq!(SchemaVersion::new(1, 7).bump_major(), SchemaVersion::new(2, 0));
    }

    #[test]
    fn wire_form_is_a_string() {
        let version: SchemaVersion = serde_json::from_value(serde_json::json!("1.5")).unwrap();
        assert_eq!(version, SchemaVersion::new(1, 5));
        assert_eq!(serde_json::to_value(version).unwrap(), serde_json::json!("1.5"));
    }
}
