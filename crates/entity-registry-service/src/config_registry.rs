//! Config entity registry
//!
//! The strict counterpart of [`PatchEntityRegistry`](crate::PatchEntityRegistry):
//! every entity must declare its key aspect, so the registry can serve as the
//! base model other registries are merged into.

use entity_registry_config::EntitiesDocument;
use entity_registry_core::{AspectSpec, EntitySpec, EventSpec, RegistryStamp, Result, SchemaSource};
use semver::Version;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::construction::{build_maps, KeyAspectPolicy};
use crate::registry::{EntityRegistry, RegistryMaps};

/// Registry of fully specified entities
#[derive(Debug, Clone)]
pub struct ConfigEntityRegistry {
    identifier: String,
    stamp: RegistryStamp,
    maps: RegistryMaps,
}

impl ConfigEntityRegistry {
    /// Build a registry from a decoded document
    ///
    /// # Errors
    ///
    /// Same failures as a patch registry, plus
    /// [`MissingKeyAspect`](entity_registry_core::RegistryError::MissingKeyAspect)
    /// for any entity without a key aspect.
    #[instrument(skip_all, fields(registry = %registry_name.as_ref()))]
    pub fn new(
        source: &dyn SchemaSource,
        document: EntitiesDocument,
        registry_name: impl AsRef<str>,
        registry_version: Version,
    ) -> Result<Self> {
        let identifier = document.identifier()?.to_string();
        let stamp = RegistryStamp::new(registry_name.as_ref(), registry_version);
        let maps = build_maps(source, &document, &stamp, KeyAspectPolicy::Required)?;

        info!(
            identifier = %identifier,
            entities = maps.entities.len(),
            "Built config entity registry"
        );

        Ok(Self {
            identifier,
            stamp,
            maps,
        })
    }
}

impl EntityRegistry for ConfigEntityRegistry {
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

impl fmt::Display for ConfigEntityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.maps.fmt_diagnostic(f, "ConfigEntityRegistry", &self.identifier)
    }
}
