//! Event resolution

use entity_registry_config::EntitiesDocument;
use entity_registry_core::{EventSpec, EventSpecBuilder, RegistryError, Result, SchemaSource};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolve every event declared in `document` against `source`
///
/// The result is keyed by lowercased event name. A later declaration with the
/// same name replaces an earlier one. Any event whose schema cannot be
/// resolved fails the whole resolution.
pub fn resolve_events(
    document: &EntitiesDocument,
    source: &dyn SchemaSource,
) -> Result<HashMap<String, Arc<EventSpec>>> {
    let builder = EventSpecBuilder::new();
    let mut events = HashMap::with_capacity(document.events.len());

    for event in &document.events {
        let schema_name = event.schema_name();
        let schema = source
            .event_schema(schema_name)
            .ok_or_else(|| RegistryError::UnknownEvent {
                event: event.name.clone(),
                schema: schema_name.to_string(),
            })?;

        let spec = builder.build_event_spec(&event.name, schema)?;
        debug!(event = %event.name, schema = schema_name, "Resolved event");

        if events.insert(event.name.to_lowercase(), Arc::new(spec)).is_some() {
            warn!(event = %event.name, "Event declared more than once, keeping the last declaration");
        }
    }

    Ok(events)
}
