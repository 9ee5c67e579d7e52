use std::collections::HashSet;
use std::path::Path;

use tracing::warn;

use super::schema::CONFIG_SCHEMA;
use super::types::VantageConfig;
use crate::errors::VantageError;

/// Load the configuration: parse the given file, or fall back to defaults
/// when no file was specified.
pub async fn load_config(path: Option<&Path>) -> Result<VantageConfig, VantageError> {
    match path {
        Some(path) => parse_config(path).await,
        None => Ok(VantageConfig::default()),
    }
}

pub async fn parse_config(path: &Path) -> Result<VantageConfig, VantageError> {
    if !path.exists() {
        return Err(VantageError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(VantageError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: VantageConfig = serde_yaml::from_value(yaml)?;

    // Semantic validation
    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), VantageError> {
    // Convert YAML value to JSON for schema validation
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| VantageError::Config(format!("Config conversion error: {e}")))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| VantageError::Config(format!("Config conversion error: {e}")))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| VantageError::Config(format!("Schema compilation error: {e}")))?;

    if let Err(errors) = compiled.validate(&json_value) {
        // Warn but don't fail — schema validation is advisory; the semantic
        // checks below are what actually reject a config.
        for error in errors {
            warn!(validation_error = %format!("{} at {}", error, error.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

fn validate_semantics(config: &VantageConfig) -> Result<(), VantageError> {
    if config.regions.is_empty() {
        return Err(VantageError::Config(
            "At least one region must be configured".into(),
        ));
    }

    let mut seen = HashSet::new();
    for region in &config.regions {
        if !seen.insert(region) {
            return Err(VantageError::Config(format!(
                "Region '{region}' appears more than once"
            )));
        }
    }

    if config.deadline_secs == 0 {
        return Err(VantageError::Config(
            "deadline_secs must be at least 1".into(),
        ));
    }

    if config.stats.command.trim().is_empty() {
        return Err(VantageError::Config(
            "stats.command must not be empty".into(),
        ));
    }

    Ok(())
}
