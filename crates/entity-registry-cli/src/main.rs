//! Entity Registry command
//!
//! Builds a registry from a YAML document and a directory of JSON schemas,
//! then reports what it contains and the search indices it maps to.

mod schema_dir;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use entity_registry_config::{DocumentParser, ParserConfig};
use entity_registry_search::{IndexConvention, IndexConventionImpl};
use entity_registry_service::{ConfigEntityRegistry, EntityRegistry, PatchEntityRegistry};
use semver::Version;
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

use schema_dir::DirectorySchemaSource;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Registry document (YAML)
    #[arg(short, long, env = "ENTITY_REGISTRY_CONFIG")]
    config: PathBuf,

    /// Schema directory with `aspects/` and `events/` subdirectories
    #[arg(short, long, env = "ENTITY_REGISTRY_SCHEMAS")]
    schemas: PathBuf,

    /// Registry name stamped on every aspect
    #[arg(long, default_value = "local")]
    name: String,

    /// Registry version (semver)
    #[arg(id = "registry_version", long = "registry-version", default_value = "0.0.1")]
    registry_version: String,

    /// Search index prefix
    #[arg(long, env = "INDEX_PREFIX")]
    prefix: Option<String>,

    /// Require a key aspect on every entity
    #[arg(long)]
    strict: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let args = Args::parse();

    telemetry::init_with_config(
        telemetry::TelemetryConfig::new()
            .with_log_level(args.log_level.clone())
            .with_json_format(args.json_logs),
    );

    let version = parse_registry_version(&args.registry_version)
        .with_context(|| format!("Invalid registry version: {}", args.registry_version))?;

    let source = DirectorySchemaSource::load(&args.schemas)
        .with_context(|| format!("Failed to load schemas from {}", args.schemas.display()))?;
    info!(
        aspects = source.aspect_count(),
        events = source.event_count(),
        "Loaded schemas"
    );

    let parser = DocumentParser::new(ParserConfig::load_or_default());
    let file = File::open(&args.config)
        .with_context(|| format!("Failed to open {}", args.config.display()))?;
    let document = parser
        .parse_reader(file)
        .with_context(|| format!("Failed to parse {}", args.config.display()))?;

    let registry: Box<dyn EntityRegistry> = if args.strict {
        Box::new(ConfigEntityRegistry::new(&source, document, &args.name, version)?)
    } else {
        Box::new(PatchEntityRegistry::new(&source, document, &args.name, version)?)
    };

    info!(
        registry = %args.name,
        entities = registry.entity_specs().len(),
        aspects = registry.aspect_specs().len(),
        events = registry.event_specs().len(),
        "Registry built"
    );

    let convention = IndexConventionImpl::new(args.prefix.as_deref());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&json_report(registry.as_ref(), &convention))?);
    } else {
        print_report(registry.as_ref(), &convention);
    }

    Ok(())
}

fn parse_registry_version(version: &str) -> entity_registry_core::Result<Version> {
    Ok(Version::parse(version.trim())?)
}

fn sorted_entity_keys(registry: &dyn EntityRegistry) -> Vec<&String> {
    let mut keys: Vec<_> = registry.entity_specs().keys().collect();
    keys.sort();
    keys
}

fn print_report(registry: &dyn EntityRegistry, convention: &dyn IndexConvention) {
    println!("{}", registry);
    println!();
    for key in sorted_entity_keys(registry) {
        let spec = &registry.entity_specs()[key];
        println!("{} -> {}", spec.name(), convention.entity_index_name_for_spec(spec));
        for aspect in spec.timeseries_aspects() {
            println!(
                "  {} -> {}",
                aspect.name(),
                convention.timeseries_aspect_index_name(spec.name(), aspect.name())
            );
        }
    }
    println!();
    println!("entities:   {}", convention.all_entity_indices_pattern());
    println!("timeseries: {}", convention.all_timeseries_aspect_indices_pattern());
}

fn json_report(registry: &dyn EntityRegistry, convention: &dyn IndexConvention) -> serde_json::Value {
    let entities: Vec<_> = sorted_entity_keys(registry)
        .into_iter()
        .map(|key| {
            let spec = &registry.entity_specs()[key];
            let timeseries: Vec<_> = spec
                .timeseries_aspects()
                .map(|aspect| {
                    json!({
                        "aspect": aspect.name(),
                        "index": convention.timeseries_aspect_index_name(spec.name(), aspect.name()),
                    })
                })
                .collect();
            json!({
                "name": spec.name(),
                "keyAspect": spec.key_aspect_name(),
                "aspects": spec.aspect_names(),
                "index": convention.entity_index_name_for_spec(spec),
                "timeseries": timeseries,
            })
        })
        .collect();

    let mut events: Vec<_> = registry.event_specs().values().map(|e| e.name()).collect();
    events.sort_unstable();

    json!({
        "identifier": registry.identifier(),
        "registry": {
            "name": registry.registry_name(),
            "version": registry.registry_version().to_string(),
        },
        "entities": entities,
        "events": events,
        "patterns": {
            "entities": convention.all_entity_indices_pattern(),
            "timeseries": convention.all_timeseries_aspect_indices_pattern(),
        },
    })
}
