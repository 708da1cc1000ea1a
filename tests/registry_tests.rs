//! Registry Integration Tests
//!
//! Builds registries from YAML documents end to end and checks lookups,
//! ordering, stamping and merging across crates.

mod common;

use common::fixtures::{self, CATALOG_YAML, DATASET_YAML, PATCH_YAML, UNKNOWN_ASPECT_YAML};
use common::{config_registry, parser, patch_registry};
use entity_registry_config::{DocumentParser, ParserConfig};
use entity_registry_core::{AspectKind, RegistryError};
use entity_registry_service::{EntityRegistry, MergedEntityRegistry, PatchEntityRegistry};
use proptest::prelude::*;
use semver::Version;
use std::sync::Arc;

#[test]
fn test_dataset_registry_from_yaml() {
    let registry = patch_registry(DATASET_YAML, "test-plugin").unwrap();

    let dataset = registry.entity_spec("dataset").unwrap();
    assert_eq!(dataset.aspect_names(), vec!["datasetKey", "datasetProperties", "status"]);
    assert_eq!(dataset.key_aspect_name(), Some("datasetKey"));
    assert!(registry.entity_spec("Dataset").is_ok());
    assert!(registry.entity_spec("dataset_v2").unwrap_err().is_lookup_error());

    assert_eq!(registry.identifier(), "test-plugin-registry");
    assert_eq!(registry.aspect_specs().len(), 3);
    assert_eq!(registry.event_specs().len(), 1);
    assert_eq!(
        registry.to_string(),
        "PatchEntityRegistry[identifier=test-plugin-registry;\
         [entityName=dataset;aspects=[datasetKey,datasetProperties,status]]\
         [eventName=entitychangeevent]]"
    );
}

#[test]
fn test_unknown_aspect_fails_construction() {
    let err = patch_registry(UNKNOWN_ASPECT_YAML, "broken").unwrap_err();
    assert_eq!(err, RegistryError::UnknownAspect("unknownAspect".to_string()));
    assert!(err.is_configuration_error());
    assert_eq!(err.to_string(), "Aspect unknownAspect does not exist");
}

#[test]
fn test_missing_identifier_fails_construction() {
    let yaml = "entities:\n  - name: dataset\n    keyAspect: datasetKey\n";
    let err = patch_registry(yaml, "anonymous").unwrap_err();
    assert_eq!(err, RegistryError::MissingIdentifier);
}

#[test]
fn test_lookup_is_case_insensitive() {
    let registry = patch_registry(DATASET_YAML, "test-plugin").unwrap();

    let lower = registry.entity_spec("dataset").unwrap();
    let upper = registry.entity_spec("DATASET").unwrap();
    assert!(Arc::ptr_eq(lower, upper));

    let event = registry.event_spec("EntityChangeEvent").unwrap();
    assert_eq!(event.name(), "entityChangeEvent");
    assert!(registry.aspect_spec("DatasetProperties").is_ok());
}

#[test]
fn test_lookup_miss_keeps_requested_name() {
    let registry = patch_registry(DATASET_YAML, "test-plugin").unwrap();

    let err = registry.entity_spec("Chart").unwrap_err();
    assert!(err.is_lookup_error());
    assert_eq!(err.to_string(), "Failed to find entity with name Chart in EntityRegistry");
    assert_eq!(registry.event_spec("missing").unwrap_err(), RegistryError::EventNotFound("missing".to_string()));
}

#[test]
fn test_key_aspect_listed_only_in_key_slot() {
    let registry = patch_registry(CATALOG_YAML, "catalog").unwrap();

    let dataset = registry.entity_spec("dataset").unwrap();
    assert_eq!(
        dataset.aspect_names(),
        vec!["datasetKey", "datasetProperties", "datasetProfile", "status"]
    );
    let chart = registry.entity_spec("chart").unwrap();
    assert_eq!(chart.aspect_names(), vec!["chartKey", "chartInfo", "status"]);
}

#[test]
fn test_aspects_carry_registry_stamp() {
    let registry = patch_registry(CATALOG_YAML, "catalog").unwrap();

    for aspect in registry.aspect_specs().values() {
        assert_eq!(aspect.registry_name(), "catalog");
        assert_eq!(aspect.registry_version(), &Version::new(0, 0, 1));
    }
    assert_eq!(
        registry.aspect_spec("datasetProfile").unwrap().record_type().as_str(),
        fixtures::record_type_name("datasetProfile")
    );
}

#[test]
fn test_timeseries_aspects_exposed() {
    let registry = patch_registry(CATALOG_YAML, "catalog").unwrap();

    let dataset = registry.entity_spec("dataset").unwrap();
    let timeseries: Vec<_> = dataset.timeseries_aspects().map(|a| a.name()).collect();
    assert_eq!(timeseries, vec!["datasetProfile"]);
    assert_eq!(
        registry.aspect_spec("datasetprofile").unwrap().kind(),
        AspectKind::Timeseries
    );
}

#[test]
fn test_duplicate_entity_last_declaration_wins() {
    let yaml = r#"
id: duplicates
entities:
  - name: dataset
    keyAspect: datasetKey
    aspects: [datasetProperties]
  - name: Dataset
    keyAspect: datasetKey
    aspects: [ownership]
"#;
    let registry = patch_registry(yaml, "dup").unwrap();

    assert_eq!(registry.entity_specs().len(), 1);
    let dataset = registry.entity_spec("dataset").unwrap();
    assert_eq!(dataset.name(), "Dataset");
    assert_eq!(dataset.aspect_names(), vec!["datasetKey", "ownership"]);
    assert!(registry.aspect_spec("datasetProperties").is_err());
}

#[test]
fn test_partial_entity_in_patch_registry() {
    let registry = patch_registry(PATCH_YAML, "glossary").unwrap();

    let dataset = registry.entity_spec("dataset").unwrap();
    assert!(dataset.is_partial());
    assert_eq!(dataset.aspect_names(), vec!["glossaryTerms", "ownership"]);
}

#[test]
fn test_config_registry_rejects_partial_entity() {
    let err = config_registry(PATCH_YAML, "glossary").unwrap_err();
    assert_eq!(err, RegistryError::MissingKeyAspect("Dataset".to_string()));
}

#[test]
fn test_merge_patch_into_config_registry() {
    let base = config_registry(CATALOG_YAML, "core").unwrap();
    let patch = patch_registry(PATCH_YAML, "glossary").unwrap();

    let merged = MergedEntityRegistry::new(&base, &[&patch]).unwrap();
    let dataset = merged.entity_spec("DATASET").unwrap();

    assert_eq!(
        dataset.aspect_names(),
        vec![
            "datasetKey",
            "datasetProperties",
            "datasetProfile",
            "status",
            "glossaryTerms",
            "ownership"
        ]
    );
    assert_eq!(dataset.aspect_spec("glossaryTerms").unwrap().registry_name(), "glossary");
    assert_eq!(dataset.aspect_spec("datasetKey").unwrap().registry_name(), "core");
    assert_eq!(merged.registry_version(), &Version::new(1, 0, 0));
    assert!(merged.has_entity("chart"));
}

#[test]
fn test_string_limit_rejects_document() {
    let parser = DocumentParser::new(ParserConfig::default().with_max_serialized_string_length(8));
    let result = PatchEntityRegistry::from_yaml(
        &fixtures::schema_source(),
        &parser,
        DATASET_YAML,
        "limited",
        Version::new(0, 0, 1),
    );
    assert!(matches!(result, Err(RegistryError::InvalidDocument(_))));
}

#[test]
fn test_registry_shared_across_threads() {
    let registry = Arc::new(patch_registry(CATALOG_YAML, "catalog").unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.entity_spec("Chart").map(|spec| spec.aspect_names().len()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(3));
    }
}

fn entity_names() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(
        vec!["datasetProperties", "status", "ownership", "chartInfo", "glossaryTerms"],
        0..=5,
    )
    .prop_map(|names| names.into_iter().map(str::to_string).collect())
}

proptest! {
    #[test]
    fn yaml_entities_have_key_first(aspects in entity_names(), list_key in any::<bool>()) {
        let mut listed = aspects.clone();
        if list_key {
            listed.push("datasetKey".to_string());
        }
        let yaml = format!(
            "id: generated\nentities:\n  - name: dataset\n    keyAspect: datasetKey\n    aspects: [{}]\n",
            listed.join(", ")
        );

        let registry = PatchEntityRegistry::from_yaml(
            &fixtures::schema_source(),
            &parser(),
            &yaml,
            "generated",
            Version::new(0, 0, 1),
        ).unwrap();
        let names = registry.entity_spec("dataset").unwrap().aspect_names();

        prop_assert_eq!(names[0], "datasetKey");
        prop_assert_eq!(names.iter().filter(|n| **n == "datasetKey").count(), 1);
        prop_assert_eq!(names.len(), aspects.len() + 1);
    }
}
