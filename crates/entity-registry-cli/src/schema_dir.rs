//! Schema source backed by a directory of JSON files
//!
//! Layout:
//!
//! ```text
//! <root>/aspects/<aspectName>.json
//! <root>/events/<eventName>.json
//! ```
//!
//! Each file holds one [`DataSchema`]. The file stem is the identifier used
//! in registry documents; the schema's own `name` is taken as the aspect's
//! record type. Everything is read up front, so a malformed file fails the
//! load instead of a later lookup.

use anyhow::{Context, Result};
use entity_registry_core::{DataSchema, InMemorySchemaSource, RecordType, RegistryError, SchemaSource};
use std::fs;
use std::path::Path;
use tracing::debug;

const ASPECTS_DIR: &str = "aspects";
const EVENTS_DIR: &str = "events";

/// Schema source loaded from disk
#[derive(Debug, Clone, Default)]
pub struct DirectorySchemaSource {
    inner: InMemorySchemaSource,
    events: usize,
}

impl DirectorySchemaSource {
    /// Load every aspect and event schema below `root`
    ///
    /// Missing `aspects/` or `events/` subdirectories are treated as empty.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let mut source = Self::default();

        for (name, schema) in read_schemas(&root.join(ASPECTS_DIR))? {
            let record_type = RecordType::new(schema.name.clone());
            source.inner.register_aspect(name, schema, record_type);
        }
        for (name, schema) in read_schemas(&root.join(EVENTS_DIR))? {
            source.inner.register_event(name, schema);
            source.events += 1;
        }

        debug!(
            root = %root.display(),
            aspects = source.aspect_count(),
            events = source.events,
            "Loaded schema directory"
        );
        Ok(source)
    }

    /// Number of aspect schemas loaded
    pub fn aspect_count(&self) -> usize {
        self.inner.aspect_count()
    }

    /// Number of event schemas loaded
    pub fn event_count(&self) -> usize {
        self.events
    }
}

impl SchemaSource for DirectorySchemaSource {
    fn aspect_schema(&self, name: &str) -> Option<DataSchema> {
        self.inner.aspect_schema(name)
    }

    fn aspect_type(&self, name: &str) -> Option<RecordType> {
        self.inner.aspect_type(name)
    }

    fn event_schema(&self, name: &str) -> Option<DataSchema> {
        self.inner.event_schema(name)
    }
}

fn read_schemas(dir: &Path) -> Result<Vec<(String, DataSchema)>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut schemas = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        let contents = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let schema: DataSchema = serde_json::from_str(&contents)
            .map_err(RegistryError::from)
            .with_context(|| format!("Invalid schema in {}", path.display()))?;
        schemas.push((name.to_string(), schema));
    }
    Ok(schemas)
}
