//! Test fixtures
//!
//! Schemas and registry documents shared by the integration tests.

use entity_registry_core::{AspectAnnotation, AspectKind, DataSchema, InMemorySchemaSource, RecordType};

/// Record type name used for an aspect fixture
pub fn record_type_name(aspect: &str) -> String {
    let mut chars = aspect.chars();
    let simple = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("com.example.metadata.{}", simple)
}

fn versioned(source: &mut InMemorySchemaSource, name: &str) {
    let type_name = record_type_name(name);
    let schema = DataSchema::record(type_name.clone())
        .with_field("value", "string", true)
        .with_aspect_annotation(AspectAnnotation {
            name: Some(name.to_string()),
            kind: AspectKind::Versioned,
            auto_render: false,
        });
    source.register_aspect(name, schema, RecordType::new(type_name));
}

fn timeseries(source: &mut InMemorySchemaSource, name: &str) {
    let type_name = record_type_name(name);
    let schema = DataSchema::record(type_name.clone())
        .with_field("timestampMillis", "long", false)
        .with_aspect_annotation(AspectAnnotation {
            name: Some(name.to_string()),
            kind: AspectKind::Timeseries,
            auto_render: true,
        });
    source.register_aspect(name, schema, RecordType::new(type_name));
}

/// Schema source covering every fixture document
pub fn schema_source() -> InMemorySchemaSource {
    let mut source = InMemorySchemaSource::new();
    for name in [
        "datasetKey",
        "datasetProperties",
        "status",
        "ownership",
        "chartKey",
        "chartInfo",
        "glossaryTerms",
    ] {
        versioned(&mut source, name);
    }
    timeseries(&mut source, "datasetProfile");
    source.register_aspect_schema("untypedAspect", DataSchema::record("com.example.metadata.Untyped"));
    source.register_event(
        "entityChangeEvent",
        DataSchema::record("com.example.metadata.EntityChangeEvent").with_field("entityUrn", "string", false),
    );
    source
}

/// A single dataset entity and one event
pub const DATASET_YAML: &str = r#"
id: test-plugin-registry
entities:
  - name: dataset
    doc: Datasets hold tabular data.
    keyAspect: datasetKey
    aspects:
      - datasetKey
      - datasetProperties
      - status
events:
  - name: entityChangeEvent
"#;

/// Two entities sharing an aspect, one with a timeseries aspect
pub const CATALOG_YAML: &str = r#"
id: catalog
entities:
  - name: dataset
    keyAspect: datasetKey
    aspects:
      - datasetProperties
      - datasetProfile
      - status
  - name: chart
    keyAspect: chartKey
    aspects:
      - chartInfo
      - status
"#;

/// Patch extending the dataset entity
pub const PATCH_YAML: &str = r#"
id: glossary-plugin
entities:
  - name: Dataset
    aspects:
      - glossaryTerms
      - ownership
"#;

/// Document naming an aspect the schema source lacks
pub const UNKNOWN_ASPECT_YAML: &str = r#"
id: broken
entities:
  - name: dataset
    keyAspect: datasetKey
    aspects:
      - unknownAspect
"#;
