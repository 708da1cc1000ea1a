//! Entity specifications

use std::fmt;
use std::sync::Arc;

use crate::aspect::AspectSpec;

/// Immutable description of an entity: its key aspect and all of its aspects
///
/// When a key aspect is present it is the first element of
/// [`aspect_specs`](Self::aspect_specs) and appears there exactly once. A spec
/// without a key aspect is *partial*: a patch registry may describe extra
/// aspects for an entity whose key is owned by another registry.
#[derive(Debug, Clone)]
pub struct EntitySpec {
    name: String,
    key_aspect: Option<Arc<AspectSpec>>,
    aspects: Vec<Arc<AspectSpec>>,
}

impl EntitySpec {
    pub(crate) fn new(name: String, key_aspect: Option<Arc<AspectSpec>>, aspects: Vec<Arc<AspectSpec>>) -> Self {
        Self {
            name,
            key_aspect,
            aspects,
        }
    }

    /// Entity name as declared
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key aspect, if the entity declares one
    pub fn key_aspect_spec(&self) -> Option<&Arc<AspectSpec>> {
        self.key_aspect.as_ref()
    }

    pub fn key_aspect_name(&self) -> Option<&str> {
        self.key_aspect.as_ref().map(|a| a.name())
    }

    /// All aspects, key aspect first
    pub fn aspect_specs(&self) -> &[Arc<AspectSpec>] {
        &self.aspects
    }

    /// Look up one of this entity's aspects by exact name
    pub fn aspect_spec(&self, name: &str) -> Option<&Arc<AspectSpec>> {
        self.aspects.iter().find(|a| a.name() == name)
    }

    pub fn has_aspect(&self, name: &str) -> bool {
        self.aspect_spec(name).is_some()
    }

    /// Aspect names in order
    pub fn aspect_names(&self) -> Vec<&str> {
        self.aspects.iter().map(|a| a.name()).collect()
    }

    /// Aspects stored in timeseries indices
    pub fn timeseries_aspects(&self) -> impl Iterator<Item = &Arc<AspectSpec>> {
        self.aspects.iter().filter(|a| a.is_timeseries())
    }

    /// Whether the entity lacks a key aspect
    pub fn is_partial(&self) -> bool {
        self.key_aspect.is_none()
    }
}

impl fmt::Display for EntitySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntitySpec({}, aspects=[{}])", self.name, self.aspect_names().join(","))
    }
}
