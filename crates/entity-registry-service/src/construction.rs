//! Registry construction shared by the config-driven registries
//!
//! Aspects are resolved one at a time, in declaration order. The first
//! resolution failure aborts the build, so a partially built registry is
//! never returned.

use entity_registry_config::{EntitiesDocument, EntityDeclaration};
use entity_registry_core::{
    AspectSpec, EntitySpec, EntitySpecBuilder, RegistryError, RegistryStamp, Result, SchemaSource,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::events::resolve_events;
use crate::registry::RegistryMaps;

/// Whether every entity must declare a key aspect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAspectPolicy {
    Optional,
    Required,
}

/// Build all three lookup maps from a document
pub(crate) fn build_maps(
    source: &dyn SchemaSource,
    document: &EntitiesDocument,
    stamp: &RegistryStamp,
    policy: KeyAspectPolicy,
) -> Result<RegistryMaps> {
    let builder = EntitySpecBuilder::new();

    let mut declared = Vec::with_capacity(document.entities.len());
    for entity in &document.entities {
        declared.push(Arc::new(build_entity(source, &builder, entity, stamp, policy)?));
    }

    let mut entities = HashMap::with_capacity(declared.len());
    for spec in &declared {
        if entities.insert(spec.name().to_lowercase(), Arc::clone(spec)).is_some() {
            warn!(entity = spec.name(), "Entity declared more than once, keeping the last declaration");
        }
    }

    let events = resolve_events(document, source)?;

    // Only entities that survived deduplication contribute aspects, in
    // document order.
    let surviving = declared
        .iter()
        .filter(|spec| entities.get(&spec.name().to_lowercase()).is_some_and(|kept| Arc::ptr_eq(kept, *spec)));
    let aspects = flatten_aspects(surviving);

    Ok(RegistryMaps {
        entities,
        events,
        aspects,
    })
}

/// Index aspects by lowercased name, later occurrences replacing earlier ones
pub(crate) fn flatten_aspects<'a>(
    entities: impl IntoIterator<Item = &'a Arc<EntitySpec>>,
) -> HashMap<String, Arc<AspectSpec>> {
    let mut aspects = HashMap::new();
    for entity in entities {
        for aspect in entity.aspect_specs() {
            aspects.insert(aspect.name().to_lowercase(), Arc::clone(aspect));
        }
    }
    aspects
}

fn build_entity(
    source: &dyn SchemaSource,
    builder: &EntitySpecBuilder,
    entity: &EntityDeclaration,
    stamp: &RegistryStamp,
    policy: KeyAspectPolicy,
) -> Result<EntitySpec> {
    info!(entity = %entity.name, aspects = %entity.aspects.join(","), "Discovered entity");

    let key = entity.key_aspect.as_deref();
    if policy == KeyAspectPolicy::Required && key.is_none() {
        return Err(RegistryError::MissingKeyAspect(entity.name.clone()));
    }

    let mut aspect_specs = Vec::with_capacity(entity.aspects.len() + 1);
    let mut seen: HashSet<&str> = HashSet::new();

    if let Some(key) = key {
        let spec = resolve_aspect(source, builder, key, stamp)?;
        debug!(entity = %entity.name, aspect = key, "Adding key aspect");
        aspect_specs.push(spec);
        seen.insert(key);
    }

    for aspect in &entity.aspects {
        if !seen.insert(aspect.as_str()) {
            if key != Some(aspect.as_str()) {
                warn!(entity = %entity.name, aspect = %aspect, "Aspect listed more than once, ignoring repeat");
            }
            continue;
        }
        let spec = resolve_aspect(source, builder, aspect, stamp)?;
        debug!(entity = %entity.name, aspect = %aspect, "Adding aspect");
        aspect_specs.push(spec);
    }

    match policy {
        KeyAspectPolicy::Optional => builder.build_partial_entity_spec(&entity.name, key, aspect_specs),
        KeyAspectPolicy::Required => builder.build_entity_spec(&entity.name, key, aspect_specs),
    }
}

/// Resolve one aspect identifier into a stamped spec
///
/// Both the schema and the implementing type must resolve.
fn resolve_aspect(
    source: &dyn SchemaSource,
    builder: &EntitySpecBuilder,
    name: &str,
    stamp: &RegistryStamp,
) -> Result<Arc<AspectSpec>> {
    let schema = source
        .aspect_schema(name)
        .ok_or_else(|| RegistryError::UnknownAspect(name.to_string()))?;
    let record_type = source
        .aspect_type(name)
        .ok_or_else(|| RegistryError::UnknownAspectType(name.to_string()))?;

    Ok(Arc::new(builder.build_aspect_spec(name, schema, record_type, stamp)?))
}
