//! Search index naming for the Entity Registry
//!
//! Derives physical index names from entity and aspect names, and maps
//! entity index names back to the entity they hold.

pub mod convention;

pub use convention::{
    IndexConvention, IndexConventionImpl, ENTITY_INDEX_SUFFIX, ENTITY_INDEX_VERSION, SEPARATOR,
    TIMESERIES_INDEX_SUFFIX, TIMESERIES_INDEX_VERSION,
};
