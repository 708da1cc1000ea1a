//! Patch entity registry
//!
//! The config-driven registry that tolerates partially specified entities: an
//! entity may list extra aspects without declaring its key aspect, which lets
//! a plugin document extend entities owned by another registry.

use entity_registry_config::{DocumentParser, EntitiesDocument};
use entity_registry_core::{AspectSpec, EntitySpec, EventSpec, RegistryStamp, Result, SchemaSource};
use semver::Version;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::construction::{build_maps, KeyAspectPolicy};
use crate::registry::{EntityRegistry, RegistryMaps};

/// Registry built from one entity/event document
#[derive(Debug, Clone)]
pub struct PatchEntityRegistry {
    identifier: String,
    stamp: RegistryStamp,
    maps: RegistryMaps,
}

impl PatchEntityRegistry {
    /// Build a registry from a decoded document
    ///
    /// Every aspect spec is stamped with `registry_name` and
    /// `registry_version`. Duplicate entity or event names are resolved in
    /// favour of the last declaration.
    ///
    /// # Errors
    ///
    /// Fails if the document has no identifier, or if any aspect or event
    /// does not resolve against `source`. No registry is produced in that case.
    #[instrument(skip_all, fields(registry = %registry_name.as_ref()))]
    pub fn new(
        source: &dyn SchemaSource,
        document: EntitiesDocument,
        registry_name: impl AsRef<str>,
        registry_version: Version,
    ) -> Result<Self> {
        let identifier = document.identifier()?.to_string();
        let stamp = RegistryStamp::new(registry_name.as_ref(), registry_version);
        let maps = build_maps(source, &document, &stamp, KeyAspectPolicy::Optional)?;

        info!(
            identifier = %identifier,
            version = %stamp.version,
            entities = maps.entities.len(),
            events = maps.events.len(),
            aspects = maps.aspects.len(),
            "Built patch entity registry"
        );

        Ok(Self {
            identifier,
            stamp,
            maps,
        })
    }

    /// Decode `yaml` with `parser` and build a registry from it
    pub fn from_yaml(
        source: &dyn SchemaSource,
        parser: &DocumentParser,
        yaml: &str,
        registry_name: impl AsRef<str>,
        registry_version: Version,
    ) -> Result<Self> {
        let document = parser.parse_str(yaml)?;
        Self::new(source, document, registry_name, registry_version)
    }

    /// Stamp carried by every aspect this registry built
    pub fn stamp(&self) -> &RegistryStamp {
        &self.stamp
    }
}

impl EntityRegistry for PatchEntityRegistry {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn registry_name(&self) -> &str {
        &self.stamp.name
    }

    fn registry_version(&self) -> &Version {
        &self.stamp.version
    }

    fn entity_specs(&self) -> &HashMap<String, Arc<EntitySpec>> {
        &self.maps.entities
    }

    fn event_specs(&self) -> &HashMap<String, Arc<EventSpec>> {
        &self.maps.events
    }

    fn aspect_specs(&self) -> &HashMap<String, Arc<AspectSpec>> {
        &self.maps.aspects
    }
}

impl fmt::Display for PatchEntityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.maps.fmt_diagnostic(f, "PatchEntityRegistry", &self.identifier)
    }
}
