//! Construction of aspect, entity and event specifications
//!
//! The builders are pure: they take already-resolved schemas and produce
//! immutable specs, enforcing the structural invariants on the way.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::aspect::AspectSpec;
use crate::entity::EntitySpec;
use crate::error::{RegistryError, Result};
use crate::event::EventSpec;
use crate::schema::DataSchema;
use crate::types::{RecordType, RegistryStamp};

/// Builds [`AspectSpec`]s and [`EntitySpec`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct EntitySpecBuilder;

impl EntitySpecBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self
    }

    /// Build an aspect spec from its resolved schema and type
    ///
    /// The registry stamp is fixed here and never changes afterwards.
    pub fn build_aspect_spec(
        &self,
        name: &str,
        schema: DataSchema,
        record_type: RecordType,
        stamp: &RegistryStamp,
    ) -> Result<AspectSpec> {
        if name.is_empty() {
            return Err(RegistryError::InvalidAspectSchema(
                "Aspect name cannot be empty".to_string(),
            ));
        }

        let annotation = schema.aspect.clone().unwrap_or_default();
        if let Some(ref declared) = annotation.name {
            if declared != name {
                return Err(RegistryError::InvalidAspectSchema(format!(
                    "Schema {} declares aspect {} but was resolved for {}",
                    schema.name, declared, name
                )));
            }
        }

        debug!(aspect = name, record_type = %record_type, kind = %annotation.kind, "Built aspect spec");

        Ok(AspectSpec::new(
            name.to_string(),
            schema,
            record_type,
            annotation.kind,
            annotation.auto_render,
            stamp.clone(),
        ))
    }

    /// Build an entity spec whose key aspect may be unknown
    ///
    /// When `key_aspect_name` is given, `aspects[0]` must be that aspect.
    pub fn build_partial_entity_spec(
        &self,
        name: &str,
        key_aspect_name: Option<&str>,
        aspects: Vec<Arc<AspectSpec>>,
    ) -> Result<EntitySpec> {
        if name.is_empty() {
            return Err(RegistryError::ConfigurationError(
                "Entity name cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for aspect in &aspects {
            if !seen.insert(aspect.name()) {
                return Err(RegistryError::ConfigurationError(format!(
                    "Aspect {} listed more than once for entity {}",
                    aspect.name(),
                    name
                )));
            }
        }

        let key_aspect = match key_aspect_name {
            Some(key) => match aspects.first() {
                Some(first) if first.name() == key => Some(Arc::clone(first)),
                _ => {
                    return Err(RegistryError::InvalidAspectSchema(format!(
                        "Key aspect {} of entity {} must be its first aspect",
                        key, name
                    )))
                }
            },
            None => None,
        };

        Ok(EntitySpec::new(name.to_string(), key_aspect, aspects))
    }

    /// Build an entity spec that must have a key aspect
    pub fn build_entity_spec(
        &self,
        name: &str,
        key_aspect_name: Option<&str>,
        aspects: Vec<Arc<AspectSpec>>,
    ) -> Result<EntitySpec> {
        let key = key_aspect_name.ok_or_else(|| RegistryError::MissingKeyAspect(name.to_string()))?;
        self.build_partial_entity_spec(name, Some(key), aspects)
    }
}

/// Builds [`EventSpec`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct EventSpecBuilder;

impl EventSpecBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self
    }

    /// Build an event spec from its resolved schema
    pub fn build_event_spec(&self, name: &str, schema: DataSchema) -> Result<EventSpec> {
        if name.is_empty() {
            return Err(RegistryError::ConfigurationError(
                "Event name cannot be empty".to_string(),
            ));
        }
        Ok(EventSpec::new(name.to_string(), schema))
    }
}
