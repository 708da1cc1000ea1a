//! Parser configuration
//!
//! Settings are read once, at process start, from environment variables
//! prefixed with `INGESTION_` and then passed explicitly to the
//! [`DocumentParser`](crate::parser::DocumentParser).

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable prefix, e.g. `INGESTION_MAX_SERIALIZED_STRING_LENGTH=1000000`
pub const ENV_PREFIX: &str = "INGESTION";

/// Default upper bound on the length of any single string in a document
pub const DEFAULT_MAX_SERIALIZED_STRING_LENGTH: usize = 16_000_000;

/// Limits applied while decoding registry documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum length, in bytes, of any string key or value
    #[serde(default = "default_max_serialized_string_length")]
    pub max_serialized_string_length: usize,
}

fn default_max_serialized_string_length() -> usize {
    DEFAULT_MAX_SERIALIZED_STRING_LENGTH
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_serialized_string_length: default_max_serialized_string_length(),
        }
    }
}

impl ParserConfig {
    /// Set the maximum string length
    pub fn with_max_serialized_string_length(mut self, max: usize) -> Self {
        self.max_serialized_string_length = max;
        self
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed, or if
    /// the resulting limit is zero.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Load configuration from an explicit environment source
    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default(
                "max_serialized_string_length",
                DEFAULT_MAX_SERIALIZED_STRING_LENGTH as i64,
            )?
            .add_source(environment)
            .build()?;

        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Load configuration, falling back to defaults on error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("Failed to load parser configuration: {}", e);
            warn!("Using default parser configuration");
            Self::default()
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_serialized_string_length == 0 {
            return Err(ConfigError::Message(
                "max_serialized_string_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
