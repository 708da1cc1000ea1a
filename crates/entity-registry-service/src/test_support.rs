//! Shared fixtures for unit tests

use entity_registry_config::{EntitiesDocument, EntityDeclaration, EventDeclaration};
use entity_registry_core::{DataSchema, InMemorySchemaSource, RecordType};

fn aspect(source: &mut InMemorySchemaSource, name: &str, type_name: &str) {
    let qualified = format!("com.example.metadata.{}", type_name);
    source.register_aspect(name, DataSchema::record(qualified.clone()), RecordType::new(qualified));
}

pub(crate) fn schema_source() -> InMemorySchemaSource {
    let mut source = InMemorySchemaSource::new();
    aspect(&mut source, "datasetKey", "DatasetKey");
    aspect(&mut source, "datasetProperties", "DatasetProperties");
    aspect(&mut source, "status", "Status");
    aspect(&mut source, "ownership", "Ownership");
    source.register_aspect_schema("untypedAspect", DataSchema::record("com.example.metadata.Untyped"));
    source.register_event("entityChangeEvent", DataSchema::record("com.example.metadata.EntityChangeEvent"));
    source
}

pub(crate) fn dataset_document() -> EntitiesDocument {
    EntitiesDocument {
        id: Some("test-plugin-registry".to_string()),
        entities: vec![EntityDeclaration::new(
            "dataset",
            Some("datasetKey"),
            &["datasetKey", "datasetProperties", "status"],
        )],
        events: vec![EventDeclaration::new("entityChangeEvent")],
    }
}
