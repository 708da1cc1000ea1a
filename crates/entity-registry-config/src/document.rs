//! Config document model
//!
//! Plain data decoded from a registry YAML document:
//!
//! ```yaml
//! id: my-plugin
//! entities:
//!   - name: dataset
//!     keyAspect: datasetKey
//!     aspects:
//!       - datasetKey
//!       - datasetProperties
//!       - status
//! events:
//!   - name: entityChangeEvent
//! ```

use entity_registry_core::{RegistryError, Result};
use serde::{Deserialize, Serialize};

/// Root of a registry document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitiesDocument {
    /// Registry identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Entity declarations in document order
    pub entities: Vec<EntityDeclaration>,

    /// Event declarations in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventDeclaration>,
}

/// Declaration of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDeclaration {
    /// Entity name, compared case-insensitively
    pub name: String,

    /// Documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    /// Key aspect identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_aspect: Option<String>,

    /// Aspect identifiers in declaration order, possibly including the key aspect
    #[serde(default)]
    pub aspects: Vec<String>,
}

/// Declaration of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDeclaration {
    /// Event name, compared case-insensitively
    pub name: String,

    /// Schema identifier, defaults to the event name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl EntitiesDocument {
    /// Registry identifier, required to build a registry
    pub fn identifier(&self) -> Result<&str> {
        match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(RegistryError::MissingIdentifier),
        }
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        for (idx, entity) in self.entities.iter().enumerate() {
            entity.validate().map_err(|msg| {
                RegistryError::InvalidDocument(format!("entities[{}]: {}", idx, msg))
            })?;
        }

        for (idx, event) in self.events.iter().enumerate() {
            if event.name.trim().is_empty() {
                return Err(RegistryError::InvalidDocument(format!(
                    "events[{}]: Event name cannot be empty",
                    idx
                )));
            }
            if matches!(event.schema.as_deref(), Some(s) if s.trim().is_empty()) {
                return Err(RegistryError::InvalidDocument(format!(
                    "events[{}]: Event schema cannot be empty if specified",
                    idx
                )));
            }
        }

        Ok(())
    }
}

impl EntityDeclaration {
    /// Create a declaration
    pub fn new(name: impl Into<String>, key_aspect: Option<&str>, aspects: &[&str]) -> Self {
        Self {
            name: name.into(),
            doc: None,
            key_aspect: key_aspect.map(str::to_string),
            aspects: aspects.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Entity name cannot be empty".to_string());
        }
        if matches!(self.key_aspect.as_deref(), Some(k) if k.trim().is_empty()) {
            return Err(format!("Key aspect of entity {} cannot be empty if specified", self.name));
        }
        if let Some(pos) = self.aspects.iter().position(|a| a.trim().is_empty()) {
            return Err(format!("Aspect {} of entity {} cannot be empty", pos, self.name));
        }
        Ok(())
    }
}

impl EventDeclaration {
    /// Create a declaration whose schema shares its name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }

    /// Schema identifier to resolve
    pub fn schema_name(&self) -> &str {
        self.schema.as_deref().unwrap_or(&self.name)
    }
}
