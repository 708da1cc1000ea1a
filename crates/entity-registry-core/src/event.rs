//! Event specifications

use serde::Serialize;
use std::fmt;

use crate::schema::DataSchema;

/// Immutable description of an event and its resolved schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSpec {
    name: String,
    schema: DataSchema,
}

impl EventSpec {
    pub(crate) fn new(name: String, schema: DataSchema) -> Self {
        Self { name, schema }
    }

    /// Event name as declared
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved event schema
    pub fn schema(&self) -> &DataSchema {
        &self.schema
    }
}

impl fmt::Display for EventSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventSpec({}, {})", self.name, self.schema.name)
    }
}
