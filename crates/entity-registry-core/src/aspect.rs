//! Aspect specifications

use semver::Version;
use serde::Serialize;
use std::fmt;

use crate::schema::DataSchema;
use crate::types::{AspectKind, RecordType, RegistryStamp};

/// Immutable description of one aspect as resolved by a registry
///
/// Built by [`EntitySpecBuilder::build_aspect_spec`](crate::builder::EntitySpecBuilder::build_aspect_spec)
/// with the building registry's stamp supplied up front. Two specs are equal
/// when they have the same name and come from the same registry.
#[derive(Debug, Clone, Serialize)]
pub struct AspectSpec {
    name: String,
    schema: DataSchema,
    record_type: RecordType,
    kind: AspectKind,
    auto_render: bool,
    registry: RegistryStamp,
}

impl AspectSpec {
    pub(crate) fn new(
        name: String,
        schema: DataSchema,
        record_type: RecordType,
        kind: AspectKind,
        auto_render: bool,
        registry: RegistryStamp,
    ) -> Self {
        Self {
            name,
            schema,
            record_type,
            kind,
            auto_render,
            registry,
        }
    }

    /// Aspect name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved structural schema
    pub fn schema(&self) -> &DataSchema {
        &self.schema
    }

    /// Resolved implementing type
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    /// Storage kind
    pub fn kind(&self) -> AspectKind {
        self.kind
    }

    pub fn is_timeseries(&self) -> bool {
        self.kind == AspectKind::Timeseries
    }

    pub fn auto_render(&self) -> bool {
        self.auto_render
    }

    /// Stamp of the registry that built this spec
    pub fn registry(&self) -> &RegistryStamp {
        &self.registry
    }

    pub fn registry_name(&self) -> &str {
        &self.registry.name
    }

    pub fn registry_version(&self) -> &Version {
        &self.registry.version
    }
}

impl PartialEq for AspectSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.registry == other.registry
    }
}

impl Eq for AspectSpec {}

impl fmt::Display for AspectSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AspectSpec({}, {}, {}, {})",
            self.name, self.record_type, self.kind, self.registry
        )
    }
}
