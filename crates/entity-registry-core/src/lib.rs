//! Core domain models and types for the Entity Registry
//!
//! This crate contains the specification types a registry is made of
//! (aspects, entities, events), the builders that assemble them, the schema
//! source abstraction they are resolved against, and the shared error type.

pub mod aspect;
pub mod builder;
pub mod entity;
pub mod error;
pub mod event;
pub mod schema;
pub mod types;

// Re-exports for convenience
pub use aspect::AspectSpec;
pub use builder::{EntitySpecBuilder, EventSpecBuilder};
pub use entity::EntitySpec;
pub use error::{RegistryError, Result};
pub use event::EventSpec;
pub use schema::{AspectAnnotation, DataSchema, InMemorySchemaSource, SchemaField, SchemaSource};
pub use types::{AspectKind, RecordType, RegistryStamp};
