//! Common test utilities and helpers
//!
//! Shared registry construction helpers for the integration tests.

#![allow(dead_code)]

use entity_registry_config::{DocumentParser, ParserConfig};
use entity_registry_core::Result;
use entity_registry_service::{ConfigEntityRegistry, PatchEntityRegistry};
use semver::Version;

pub mod fixtures;

/// Parser with default limits
pub fn parser() -> DocumentParser {
    DocumentParser::new(ParserConfig::default())
}

/// Build a patch registry from YAML against the fixture schemas
pub fn patch_registry(yaml: &str, name: &str) -> Result<PatchEntityRegistry> {
    PatchEntityRegistry::from_yaml(&fixtures::schema_source(), &parser(), yaml, name, Version::new(0, 0, 1))
}

/// Build a config registry from YAML against the fixture schemas
pub fn config_registry(yaml: &str, name: &str) -> Result<ConfigEntityRegistry> {
    let document = parser().parse_str(yaml)?;
    ConfigEntityRegistry::new(&fixtures::schema_source(), document, name, Version::new(1, 0, 0))
}
