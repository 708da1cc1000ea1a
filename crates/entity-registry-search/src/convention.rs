//! Search index naming convention
//!
//! Entity document indices are named `[prefix_]<entity>index_v2` and
//! timeseries aspect indices `[prefix_]<entity>_<aspect>aspect_v1`, all
//! lowercase. The fixed suffixes make it possible to address every index of
//! one family with a single wildcard pattern.

use entity_registry_core::{EntitySpec, RecordType};

/// Suffix of entity document indices
pub const ENTITY_INDEX_SUFFIX: &str = "index";
/// Version of the entity document index layout
pub const ENTITY_INDEX_VERSION: &str = "v2";
/// Suffix of timeseries aspect indices
pub const TIMESERIES_INDEX_SUFFIX: &str = "aspect";
/// Version of the timeseries aspect index layout
pub const TIMESERIES_INDEX_VERSION: &str = "v1";
/// Separator between prefix, names and versions
pub const SEPARATOR: &str = "_";

/// Maps entity and aspect names onto physical index names
pub trait IndexConvention: Send + Sync {
    /// Shared prefix, if any
    fn prefix(&self) -> Option<&str>;

    /// Index name for an already qualified logical base name
    fn index_name(&self, base_name: &str) -> String;

    /// Index named after a document's record type, by its simple name
    fn index_name_for_record_type(&self, record_type: &RecordType) -> String {
        self.index_name(record_type.simple_name())
    }

    /// Document index of an entity
    fn entity_index_name(&self, entity_name: &str) -> String;

    /// Document index of the entity described by `spec`
    fn entity_index_name_for_spec(&self, spec: &EntitySpec) -> String {
        self.entity_index_name(spec.name())
    }

    /// Timeseries index of one aspect of an entity
    fn timeseries_aspect_index_name(&self, entity_name: &str, aspect_name: &str) -> String;

    /// Wildcard pattern matching every entity document index
    fn all_entity_indices_pattern(&self) -> String;

    /// Wildcard pattern matching every timeseries aspect index
    fn all_timeseries_aspect_indices_pattern(&self) -> String;

    /// Inverse of [`entity_index_name`](Self::entity_index_name)
    ///
    /// Returns `None` when `index_name` does not have the expected prefix and
    /// suffix or names no entity.
    fn entity_name(&self, index_name: &str) -> Option<String>;
}

/// Default [`IndexConvention`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexConventionImpl {
    prefix: Option<String>,
}

impl IndexConventionImpl {
    /// Create a convention; an empty prefix counts as none
    pub fn new(prefix: Option<&str>) -> Self {
        Self {
            prefix: prefix
                .filter(|p| !p.is_empty())
                .map(str::to_lowercase),
        }
    }

    /// Convention without a prefix
    pub fn no_prefix() -> Self {
        Self::default()
    }

    fn prefix_part(&self) -> String {
        self.prefix
            .as_ref()
            .map(|p| format!("{}{}", p, SEPARATOR))
            .unwrap_or_default()
    }

    fn entity_index_suffix() -> String {
        format!("{}{}{}", ENTITY_INDEX_SUFFIX, SEPARATOR, ENTITY_INDEX_VERSION)
    }

    fn timeseries_index_suffix() -> String {
        format!("{}{}{}", TIMESERIES_INDEX_SUFFIX, SEPARATOR, TIMESERIES_INDEX_VERSION)
    }
}

impl IndexConvention for IndexConventionImpl {
    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn index_name(&self, base_name: &str) -> String {
        format!("{}{}", self.prefix_part(), base_name.to_lowercase())
    }

    fn entity_index_name(&self, entity_name: &str) -> String {
        self.index_name(&format!("{}{}", entity_name, Self::entity_index_suffix()))
    }

    fn timeseries_aspect_index_name(&self, entity_name: &str, aspect_name: &str) -> String {
        self.index_name(&format!(
            "{}{}{}{}",
            entity_name,
            SEPARATOR,
            aspect_name,
            Self::timeseries_index_suffix()
        ))
    }

    fn all_entity_indices_pattern(&self) -> String {
        format!("{}*{}", self.prefix_part(), Self::entity_index_suffix())
    }

    fn all_timeseries_aspect_indices_pattern(&self) -> String {
        format!("{}*{}", self.prefix_part(), Self::timeseries_index_suffix())
    }

    fn entity_name(&self, index_name: &str) -> Option<String> {
        let base = index_name.strip_prefix(self.prefix_part().as_str())?;
        let entity = base.strip_suffix(Self::entity_index_suffix().as_str())?;
        if entity.is_empty() {
            return None;
        }
        Some(entity.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_index_name() {
        let convention = IndexConventionImpl::no_prefix();
        assert_eq!(convention.entity_index_name("dataset"), "datasetindex_v2");
        assert_eq!(convention.entity_index_name("DataJob"), "datajobindex_v2");
    }

    #[test]
    fn test_entity_index_name_with_prefix() {
        let convention = IndexConventionImpl::new(Some("prod"));
        assert_eq!(convention.prefix(), Some("prod"));
        assert_eq!(convention.entity_index_name("dataset"), "prod_datasetindex_v2");
    }

    #[test]
    fn test_prefix_is_lowercased() {
        let convention = IndexConventionImpl::new(Some("PROD"));
        assert_eq!(convention.entity_index_name("dataset"), "prod_datasetindex_v2");
        assert_eq!(convention.entity_name("prod_datasetindex_v2").as_deref(), Some("dataset"));
    }

    #[test]
    fn test_empty_prefix_is_none() {
        let convention = IndexConventionImpl::new(Some(""));
        assert_eq!(convention, IndexConventionImpl::no_prefix());
        assert_eq!(convention.index_name("graph_service"), "graph_service");
    }

    #[test]
    fn test_timeseries_index_name() {
        let convention = IndexConventionImpl::new(Some("prod"));
        assert_eq!(
            convention.timeseries_aspect_index_name("dataset", "datasetProfile"),
            "prod_dataset_datasetprofileaspect_v1"
        );
    }

    #[test]
    fn test_index_name_prefix_only() {
        assert_eq!(IndexConventionImpl::new(Some("prod")).index_name("System_Metadata"), "prod_system_metadata");
        assert_eq!(IndexConventionImpl::no_prefix().index_name("System_Metadata"), "system_metadata");
    }

    #[test]
    fn test_index_name_for_record_type() {
        let ty = RecordType::new("com.example.DatasetProfile");
        assert_eq!(IndexConventionImpl::new(Some("prod")).index_name_for_record_type(&ty), "prod_datasetprofile");
        assert_eq!(IndexConventionImpl::no_prefix().index_name_for_record_type(&ty), "datasetprofile");
    }

    #[test]
    fn test_patterns() {
        let convention = IndexConventionImpl::new(Some("prod"));
        assert_eq!(convention.all_entity_indices_pattern(), "prod_*index_v2");
        assert_eq!(convention.all_timeseries_aspect_indices_pattern(), "prod_*aspect_v1");

        let convention = IndexConventionImpl::no_prefix();
        assert_eq!(convention.all_entity_indices_pattern(), "*index_v2");
        assert_eq!(convention.all_timeseries_aspect_indices_pattern(), "*aspect_v1");
    }

    #[test]
    fn test_entity_name_inverse() {
        let convention = IndexConventionImpl::new(Some("prod"));
        assert_eq!(convention.entity_name("prod_datasetindex_v2").as_deref(), Some("dataset"));
        assert_eq!(convention.entity_name("prod_datasetindex_v2_extra"), None);
        assert_eq!(convention.entity_name("dev_datasetindex_v2"), None);
        assert_eq!(convention.entity_name("datasetindex_v2"), None);
        assert_eq!(convention.entity_name("prod_index_v2"), None);
        assert_eq!(convention.entity_name("prod_dataset_datasetprofileaspect_v1"), None);
    }

    #[test]
    fn test_entity_name_inverse_without_prefix() {
        let convention = IndexConventionImpl::no_prefix();
        assert_eq!(convention.entity_name("datasetindex_v2").as_deref(), Some("dataset"));
        assert_eq!(convention.entity_name("index_v2"), None);
        assert_eq!(convention.entity_name("datasetindex_v1"), None);
    }
}
