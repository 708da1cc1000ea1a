//! Registry document decoding
//!
//! This crate turns YAML registry documents into the plain
//! [`EntitiesDocument`] model that registries are built from, enforcing the
//! string-size limits of a [`ParserConfig`] along the way.

pub mod document;
pub mod parser;
pub mod settings;

pub use document::{EntitiesDocument, EntityDeclaration, EventDeclaration};
pub use parser::DocumentParser;
pub use settings::{ParserConfig, DEFAULT_MAX_SERIALIZED_STRING_LENGTH};
