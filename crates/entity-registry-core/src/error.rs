//! Error types for the Entity Registry

use thiserror::Error;

/// Result type alias for Registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Main error type for Registry operations
///
/// Variants fall into two groups. Configuration errors are raised while a
/// registry is being built and abort the build entirely. Lookup errors are
/// raised by an already-built registry when a caller asks for a name it does
/// not hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The document carries no registry identifier
    #[error("Registry document is missing an identifier")]
    MissingIdentifier,

    /// Aspect identifier resolved to no schema
    #[error("Aspect {0} does not exist")]
    UnknownAspect(String),

    /// Aspect schema exists but its implementing type does not
    #[error("Aspect {0} has no implementing type")]
    UnknownAspectType(String),

    /// Event identifier resolved to no schema
    #[error("Event schema {schema} for event {event} does not exist")]
    UnknownEvent { event: String, schema: String },

    /// Entity declared without a key aspect where one is mandatory
    #[error("Entity {0} does not declare a key aspect")]
    MissingKeyAspect(String),

    /// Aspect schema is inconsistent with its declaration
    #[error("Invalid aspect schema: {0}")]
    InvalidAspectSchema(String),

    /// Document could not be decoded or failed required-field checks
    #[error("Invalid registry document: {0}")]
    InvalidDocument(String),

    /// Invalid registry version format
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// Any other configuration problem
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Entity lookup miss
    #[error("Failed to find entity with name {0} in EntityRegistry")]
    EntityNotFound(String),

    /// Event lookup miss
    #[error("Failed to find event with name {0} in EntityRegistry")]
    EventNotFound(String),

    /// Aspect lookup miss
    #[error("Failed to find aspect with name {0} in EntityRegistry")]
    AspectNotFound(String),
}

impl RegistryError {
    /// Whether this error aborts registry construction
    pub fn is_configuration_error(&self) -> bool {
        !self.is_lookup_error()
    }

    /// Whether this error was raised by a lookup against a built registry
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            RegistryError::EntityNotFound(_)
                | RegistryError::EventNotFound(_)
                | RegistryError::AspectNotFound(_)
        )
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::InvalidAspectSchema(err.to_string())
    }
}

impl From<semver::Error> for RegistryError {
    fn from(err: semver::Error) -> Self {
        RegistryError::InvalidVersion(err.to_string())
    }
}
