//! The registry capability trait and the lookup maps behind it

use entity_registry_core::{AspectSpec, EntitySpec, EventSpec, RegistryError, Result};
use semver::Version;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Read-only, by-name access to entity, event and aspect specifications
///
/// All name lookups are case-insensitive. A miss is a caller error and is
/// reported with the name exactly as the caller supplied it.
pub trait EntityRegistry: Send + Sync + fmt::Display {
    /// Identifier of this registry instance, independent of name and version
    fn identifier(&self) -> &str;

    /// Registry name
    fn registry_name(&self) -> &str;

    /// Registry semantic version
    fn registry_version(&self) -> &Version;

    /// All entity specs, keyed by lowercased name
    fn entity_specs(&self) -> &HashMap<String, Arc<EntitySpec>>;

    /// All event specs, keyed by lowercased name
    fn event_specs(&self) -> &HashMap<String, Arc<EventSpec>>;

    /// All aspect specs across all entities, keyed by lowercased name
    fn aspect_specs(&self) -> &HashMap<String, Arc<AspectSpec>>;

    /// Look up an entity spec
    fn entity_spec(&self, name: &str) -> Result<&Arc<EntitySpec>> {
        self.entity_specs()
            .get(&name.to_lowercase())
            .ok_or_else(|| RegistryError::EntityNotFound(name.to_string()))
    }

    /// Look up an event spec
    fn event_spec(&self, name: &str) -> Result<&Arc<EventSpec>> {
        self.event_specs()
            .get(&name.to_lowercase())
            .ok_or_else(|| RegistryError::EventNotFound(name.to_string()))
    }

    /// Look up an aspect spec
    fn aspect_spec(&self, name: &str) -> Result<&Arc<AspectSpec>> {
        self.aspect_specs()
            .get(&name.to_lowercase())
            .ok_or_else(|| RegistryError::AspectNotFound(name.to_string()))
    }

    /// Whether an entity with this name exists
    fn has_entity(&self, name: &str) -> bool {
        self.entity_specs().contains_key(&name.to_lowercase())
    }
}

/// The three lookup maps every registry owns
#[derive(Debug, Clone, Default)]
pub(crate) struct RegistryMaps {
    pub(crate) entities: HashMap<String, Arc<EntitySpec>>,
    pub(crate) events: HashMap<String, Arc<EventSpec>>,
    pub(crate) aspects: HashMap<String, Arc<AspectSpec>>,
}

impl RegistryMaps {
    /// Write the diagnostic representation shared by all registries
    ///
    /// Entries are sorted by key so the output is stable.
    pub(crate) fn fmt_diagnostic(&self, f: &mut fmt::Formatter<'_>, kind: &str, identifier: &str) -> fmt::Result {
        write!(f, "{}[identifier={};", kind, identifier)?;

        let mut entities: Vec<_> = self.entities.iter().collect();
        entities.sort_by(|a, b| a.0.cmp(b.0));
        for (name, spec) in entities {
            write!(f, "[entityName={};aspects=[{}]]", name, spec.aspect_names().join(","))?;
        }

        let mut events: Vec<_> = self.events.keys().collect();
        events.sort();
        for name in events {
            write!(f, "[eventName={}]", name)?;
        }

        write!(f, "]")
    }
}
