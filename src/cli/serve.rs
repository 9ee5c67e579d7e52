use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::collector::AggregationEngine;
use crate::config;
use crate::errors::VantageError;
use crate::provider::AwsInventorySource;

pub async fn handle_serve(args: ServeArgs) -> Result<(), VantageError> {
    let config = config::load_config(args.config.as_deref().map(Path::new)).await?;
    info!(
        host = %args.host,
        port = args.port,
        regions = config.regions.len(),
        "Starting inventory server"
    );

    let source = Arc::new(AwsInventorySource::connect(&config).await);
    let engine = Arc::new(AggregationEngine::new(source, config.engine_config()));
    let app = api::build_router(api::AppState { engine });

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| VantageError::Server(format!("Server error: {e}")))?;

    Ok(())
}
