//! Per-region inventory collection.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::barrier::CompletionGuard;
use super::Contribution;
use crate::models::PartialFailure;
use crate::provider::InventorySource;

/// Collect the compute (and optionally database) inventory for one region.
///
/// A query error degrades this region's contribution and never touches
/// sibling regions; a compute failure does not skip the database query.
/// The guard signals the barrier on every exit path.
pub(crate) async fn collect_region(
    source: Arc<dyn InventorySource>,
    region: String,
    include_databases: bool,
    tx: mpsc::UnboundedSender<Contribution>,
    _guard: CompletionGuard,
    cancel: CancellationToken,
) {
    let unit = format!("region/{region}");

    let compute = tokio::select! {
        _ = cancel.cancelled() => return,
        result = source.compute_instances(&region) => result,
    };
    match compute {
        Ok(instances) => {
            debug!(region = %region, count = instances.len(), "Compute inventory collected");
            let _ = tx.send(Contribution::Compute(instances));
        }
        Err(e) => {
            warn!(region = %region, error = %e, "Compute inventory query failed");
            let _ = tx.send(Contribution::Failure(PartialFailure::new(
                unit.as_str(),
                e.failure_kind(),
                e.to_string(),
            )));
        }
    }

    if !include_databases {
        return;
    }

    let databases = tokio::select! {
        _ = cancel.cancelled() => return,
        result = source.database_instances(&region) => result,
    };
    match databases {
        Ok(databases) => {
            debug!(region = %region, count = databases.len(), "Database inventory collected");
            let _ = tx.send(Contribution::Databases(databases));
        }
        Err(e) => {
            warn!(region = %region, error = %e, "Database inventory query failed");
            let _ = tx.send(Contribution::Failure(PartialFailure::new(
                unit.as_str(),
                e.failure_kind(),
                e.to_string(),
            )));
        }
    }
}
