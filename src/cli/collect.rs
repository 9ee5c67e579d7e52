use std::path::Path;
use std::sync::Arc;

use crate::cli::commands::CollectArgs;
use crate::collector::AggregationEngine;
use crate::config;
use crate::errors::VantageError;
use crate::provider::AwsInventorySource;

/// One-shot aggregation printed as JSON. Exits non-zero when every unit
/// failed, so scripted callers can tell a broken provider from an empty
/// account.
pub async fn handle_collect(args: CollectArgs) -> Result<(), VantageError> {
    let config = config::load_config(args.config.as_deref().map(Path::new)).await?;

    let source = Arc::new(AwsInventorySource::connect(&config).await);
    let engine = AggregationEngine::new(source, config.engine_config());
    let report = engine.collect().await;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    if report.is_total_failure() {
        return Err(VantageError::Internal(
            "aggregation failed for every unit".into(),
        ));
    }
    Ok(())
}
