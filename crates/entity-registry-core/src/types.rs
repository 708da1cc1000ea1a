//! Core type definitions

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fully-qualified name of the type implementing an aspect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordType(String);

impl RecordType {
    /// Create a record type from its fully-qualified name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the fully-qualified name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unqualified type name (the segment after the last '.')
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// How an aspect's data is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    /// One current value per entity, with history kept as versions
    Versioned,
    /// Time-partitioned values, stored in per-aspect timeseries indices
    Timeseries,
}

impl Default for AspectKind {
    fn default() -> Self {
        Self::Versioned
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Versioned => write!(f, "versioned"),
            Self::Timeseries => write!(f, "timeseries"),
        }
    }
}

impl FromStr for AspectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "versioned" => Ok(Self::Versioned),
            "timeseries" => Ok(Self::Timeseries),
            _ => Err(format!("Invalid aspect kind: {}", s)),
        }
    }
}

/// Identity of the registry that built a specification
///
/// Every aspect specification carries the stamp of the registry that
/// constructed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistryStamp {
    /// Registry name
    pub name: String,
    /// Registry semantic version
    pub version: Version,
}

impl RegistryStamp {
    /// Create a new stamp
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl fmt::Display for RegistryStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
