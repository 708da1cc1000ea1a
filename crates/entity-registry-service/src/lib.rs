//! Entity registries
//!
//! This crate builds immutable registries of entity, event and aspect
//! specifications from decoded registry documents, and exposes them through
//! the [`EntityRegistry`] trait.
//!
//! # Registries
//!
//! - **PatchEntityRegistry**: built from one document; entities may omit their key aspect
//! - **ConfigEntityRegistry**: built from one document; every entity declares a key aspect
//! - **MergedEntityRegistry**: a base registry with patch registries merged in
//!
//! # Example
//!
//! ```rust,no_run
//! use entity_registry_config::{DocumentParser, ParserConfig};
//! use entity_registry_core::InMemorySchemaSource;
//! use entity_registry_service::{EntityRegistry, PatchEntityRegistry};
//! use semver::Version;
//!
//! # fn example(source: InMemorySchemaSource, yaml: &str) -> entity_registry_core::Result<()> {
//! let parser = DocumentParser::new(ParserConfig::load_or_default());
//! let document = parser.parse_str(yaml)?;
//! let registry = PatchEntityRegistry::new(&source, document, "my-plugin", Version::new(0, 0, 1))?;
//!
//! let dataset = registry.entity_spec("Dataset")?;
//! println!("{}", dataset);
//! # Ok(())
//! # }
//! ```

mod construction;
pub mod config_registry;
pub mod events;
pub mod merged;
pub mod patch;
pub mod registry;

#[cfg(test)]
mod test_support;

pub use config_registry::ConfigEntityRegistry;
pub use events::resolve_events;
pub use merged::MergedEntityRegistry;
pub use patch::PatchEntityRegistry;
pub use registry::EntityRegistry;
