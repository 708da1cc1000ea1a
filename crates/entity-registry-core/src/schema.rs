//! Schema model and schema sources
//!
//! A [`SchemaSource`] resolves aspect and event identifiers to their structural
//! schema and implementing type. Registries consult it while they are being
//! built and never afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{AspectKind, RecordType};

/// A single field of a record schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Field name
    pub name: String,

    /// Field type, kept in its raw form
    #[serde(rename = "type")]
    pub field_type: serde_json::Value,

    /// Whether the field may be absent
    #[serde(default)]
    pub optional: bool,

    /// Field documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// The `Aspect` annotation attached to an aspect schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectAnnotation {
    /// Aspect name the schema declares for itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Storage kind
    #[serde(rename = "type", default)]
    pub kind: AspectKind,

    /// Whether generic UIs should render the aspect
    #[serde(default)]
    pub auto_render: bool,
}

/// Structural schema of an aspect or event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSchema {
    /// Fully-qualified schema name
    pub name: String,

    /// Schema documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    /// Record fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<SchemaField>,

    /// Aspect annotation, present on aspect schemas
    #[serde(rename = "Aspect", default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<AspectAnnotation>,
}

impl DataSchema {
    /// Create an empty record schema
    pub fn record(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
            aspect: None,
        }
    }

    /// Add a field
    pub fn with_field(mut self, name: impl Into<String>, field_type: impl Into<String>, optional: bool) -> Self {
        self.fields.push(SchemaField {
            name: name.into(),
            field_type: serde_json::Value::String(field_type.into()),
            optional,
            doc: None,
        });
        self
    }

    /// Attach an aspect annotation
    pub fn with_aspect_annotation(mut self, annotation: AspectAnnotation) -> Self {
        self.aspect = Some(annotation);
        self
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Resolves aspect and event identifiers to schemas
///
/// Implementations must be deterministic: the same identifier always resolves
/// to the same schema for the lifetime of the source.
pub trait SchemaSource: Send + Sync {
    /// Structural schema of an aspect
    fn aspect_schema(&self, name: &str) -> Option<DataSchema>;

    /// Implementing type of an aspect
    fn aspect_type(&self, name: &str) -> Option<RecordType>;

    /// Structural schema of an event
    fn event_schema(&self, name: &str) -> Option<DataSchema>;
}

/// Schema source backed by in-memory maps
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaSource {
    aspect_schemas: HashMap<String, DataSchema>,
    aspect_types: HashMap<String, RecordType>,
    event_schemas: HashMap<String, DataSchema>,
}

impl InMemorySchemaSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an aspect schema together with its implementing type
    pub fn register_aspect(&mut self, name: impl Into<String>, schema: DataSchema, record_type: RecordType) {
        let name = name.into();
        self.aspect_types.insert(name.clone(), record_type);
        self.aspect_schemas.insert(name, schema);
    }

    /// Register an aspect schema without an implementing type
    pub fn register_aspect_schema(&mut self, name: impl Into<String>, schema: DataSchema) {
        self.aspect_schemas.insert(name.into(), schema);
    }

    /// Register an event schema
    pub fn register_event(&mut self, name: impl Into<String>, schema: DataSchema) {
        self.event_schemas.insert(name.into(), schema);
    }

    /// Builder-style [`register_aspect`](Self::register_aspect)
    pub fn with_aspect(mut self, name: impl Into<String>, schema: DataSchema, record_type: RecordType) -> Self {
        self.register_aspect(name, schema, record_type);
        self
    }

    /// Builder-style [`register_event`](Self::register_event)
    pub fn with_event(mut self, name: impl Into<String>, schema: DataSchema) -> Self {
        self.register_event(name, schema);
        self
    }

    /// Number of registered aspect schemas
    pub fn aspect_count(&self) -> usize {
        self.aspect_schemas.len()
    }
}

impl SchemaSource for InMemorySchemaSource {
    fn aspect_schema(&self, name: &str) -> Option<DataSchema> {
        self.aspect_schemas.get(name).cloned()
    }

    fn aspect_type(&self, name: &str) -> Option<RecordType> {
        self.aspect_types.get(name).cloned()
    }

    fn event_schema(&self, name: &str) -> Option<DataSchema> {
        self.event_schemas.get(name).cloned()
    }
}
