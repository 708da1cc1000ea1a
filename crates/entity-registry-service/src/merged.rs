//! Merged entity registry
//!
//! Combines a base registry with an ordered list of patch registries. The
//! merge happens once, at construction; the result is as immutable as its
//! inputs.

use entity_registry_core::{
    AspectSpec, EntitySpec, EntitySpecBuilder, EventSpec, RegistryError, RegistryStamp, Result,
};
use semver::Version;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::registry::{EntityRegistry, RegistryMaps};

/// Composite view over a base registry and its patches
///
/// Aspect specs are re-exposed unchanged, so each keeps the stamp of the
/// registry that built it.
#[derive(Debug, Clone)]
pub struct MergedEntityRegistry {
    stamp: RegistryStamp,
    maps: RegistryMaps,
}

impl MergedEntityRegistry {
    /// Identifier shared by all merged registries
    pub const IDENTIFIER: &'static str = "MergedEntityRegistry";

    /// Merge `patches`, in order, into `base`
    ///
    /// For an entity present in both, the base aspects come first and the patch
    /// aspects are appended; a patch aspect with the same name as an existing
    /// one replaces it in place. A patch may supply a key aspect the base
    /// lacks, but may not change an existing one. New entities and events are
    /// added, later patches replacing earlier ones.
    ///
    /// Name and version are taken from `base`.
    pub fn new(base: &dyn EntityRegistry, patches: &[&dyn EntityRegistry]) -> Result<Self> {
        let mut entities = base.entity_specs().clone();
        let mut events = base.event_specs().clone();
        let mut aspects = base.aspect_specs().clone();

        for patch in patches {
            debug!(patch = patch.identifier(), "Merging registry");

            let mut patch_entities: Vec<_> = patch.entity_specs().iter().collect();
            patch_entities.sort_by(|a, b| a.0.cmp(b.0));

            for (key, patch_spec) in patch_entities {
                let merged = match entities.get(key) {
                    Some(existing) => Arc::new(merge_entity_specs(existing, patch_spec)?),
                    None => Arc::clone(patch_spec),
                };
                entities.insert(key.clone(), merged);
            }

            events.extend(patch.event_specs().iter().map(|(k, v)| (k.clone(), Arc::clone(v))));
            aspects.extend(patch.aspect_specs().iter().map(|(k, v)| (k.clone(), Arc::clone(v))));
        }

        info!(
            base = base.identifier(),
            patches = patches.len(),
            entities = entities.len(),
            "Built merged entity registry"
        );

        Ok(Self {
            stamp: RegistryStamp::new(base.registry_name(), base.registry_version().clone()),
            maps: RegistryMaps {
                entities,
                events,
                aspects,
            },
        })
    }
}

fn merge_entity_specs(base: &EntitySpec, patch: &EntitySpec) -> Result<EntitySpec> {
    let key_name = match (base.key_aspect_name(), patch.key_aspect_name()) {
        (Some(existing), Some(proposed)) if existing != proposed => {
            return Err(RegistryError::ConfigurationError(format!(
                "Key aspect of entity {} cannot be changed from {} to {}",
                base.name(),
                existing,
                proposed
            )))
        }
        (Some(existing), _) => Some(existing),
        (None, proposed) => proposed,
    };

    let mut aspects: Vec<Arc<AspectSpec>> = base.aspect_specs().to_vec();
    for aspect in patch.aspect_specs() {
        match aspects.iter().position(|a| a.name() == aspect.name()) {
            Some(idx) => aspects[idx] = Arc::clone(aspect),
            None => aspects.push(Arc::clone(aspect)),
        }
    }

    // A key aspect first supplied by the patch moves to the front
    if let Some(key) = key_name {
        if let Some(idx) = aspects.iter().position(|a| a.name() == key) {
            let key_spec = aspects.remove(idx);
            aspects.insert(0, key_spec);
        }
    }

    EntitySpecBuilder::new().build_partial_entity_spec(base.name(), key_name, aspects)
}

impl EntityRegistry for MergedEntityRegistry {
    fn identifier(&self) -> &str {
        Self::IDENTIFIER
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

impl fmt::Display for MergedEntityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.maps.fmt_diagnostic(f, "MergedEntityRegistry", Self::IDENTIFIER)
    }
}
