//! YAML decoding of registry documents

use entity_registry_core::{RegistryError, Result};
use serde_yaml::Value;
use std::io::Read;
use tracing::{debug, instrument};

use crate::document::EntitiesDocument;
use crate::settings::ParserConfig;

/// Decodes registry documents under the limits of a [`ParserConfig`]
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    config: ParserConfig,
}

impl DocumentParser {
    /// Create a parser
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Limits in effect
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Decode a document from a string
    #[instrument(skip(self, yaml), fields(len = yaml.len()))]
    pub fn parse_str(&self, yaml: &str) -> Result<EntitiesDocument> {
        let value: Value = serde_yaml::from_str(yaml).map_err(invalid_document)?;
        self.decode(value)
    }

    /// Decode a document from a reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<EntitiesDocument> {
        let value: Value = serde_yaml::from_reader(reader).map_err(invalid_document)?;
        self.decode(value)
    }

    fn decode(&self, value: Value) -> Result<EntitiesDocument> {
        self.check_string_lengths(&value)?;

        let document: EntitiesDocument = serde_yaml::from_value(value).map_err(invalid_document)?;
        document.validate()?;

        debug!(
            entities = document.entities.len(),
            events = document.events.len(),
            "Decoded registry document"
        );
        Ok(document)
    }

    fn check_string_lengths(&self, value: &Value) -> Result<()> {
        let max = self.config.max_serialized_string_length;
        match value {
            Value::String(s) if s.len() > max => Err(RegistryError::InvalidDocument(format!(
                "String value length ({}) exceeds the maximum allowed ({})",
                s.len(),
                max
            ))),
            Value::Sequence(items) => items.iter().try_for_each(|item| self.check_string_lengths(item)),
            Value::Mapping(mapping) => mapping.iter().try_for_each(|(k, v)| {
                self.check_string_lengths(k)?;
                self.check_string_lengths(v)
            }),
            Value::Tagged(tagged) => self.check_string_lengths(&tagged.value),
            _ => Ok(()),
        }
    }
}

fn invalid_document(err: serde_yaml::Error) -> RegistryError {
    RegistryError::InvalidDocument(err.to_string())
}
