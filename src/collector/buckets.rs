//! Storage bucket collection: one account-scoped list query, then one
//! statistics fetch per bucket, fanned out concurrently.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::barrier::{CompletionBarrier, CompletionGuard};
use super::{Contribution, BUCKETS_UNIT};
use crate::models::{PartialFailure, StorageBucket};
use crate::provider::InventorySource;

/// Collect the bucket inventory. The bucket list is region-independent;
/// statistics are fetched per bucket with full fault isolation — one
/// bucket's failure never blocks another's fetch, and an inner barrier
/// sized to the bucket count gates this collector's own completion signal.
pub(crate) async fn collect_buckets(
    source: Arc<dyn InventorySource>,
    tx: mpsc::UnboundedSender<Contribution>,
    _guard: CompletionGuard,
    cancel: CancellationToken,
) {
    let listed = tokio::select! {
        _ = cancel.cancelled() => return,
        result = source.list_buckets() => result,
    };
    let buckets = match listed {
        Ok(buckets) => buckets,
        Err(e) => {
            warn!(error = %e, "Bucket list query failed");
            let _ = tx.send(Contribution::Failure(PartialFailure::new(
                BUCKETS_UNIT,
                e.failure_kind(),
                e.to_string(),
            )));
            return;
        }
    };
    info!(count = buckets.len(), "Bucket list collected");

    let inner = CompletionBarrier::new();
    let mut fetchers = JoinSet::new();
    for bucket in buckets {
        let fetcher_guard = inner.register(format!("bucket/{}", bucket.name));
        let source = source.clone();
        let tx = tx.clone();
        let cancel = cancel.clone();
        fetchers.spawn(async move {
            let _guard = fetcher_guard;
            let stats = tokio::select! {
                _ = cancel.cancelled() => return,
                result = source.bucket_stats(&bucket.name) => result,
            };
            match stats {
                Ok(stats) => {
                    let _ = tx.send(Contribution::Bucket(StorageBucket::from_summary(
                        bucket, stats,
                    )));
                }
                Err(e) => {
                    warn!(bucket = %bucket.name, error = %e, "Bucket statistics query failed");
                    let _ = tx.send(Contribution::Failure(PartialFailure::new(
                        format!("bucket/{}", bucket.name),
                        e.failure_kind(),
                        e.to_string(),
                    )));
                }
            }
        });
    }

    tokio::select! {
        _ = inner.wait() => {}
        _ = cancel.cancelled() => {
            fetchers.abort_all();
        }
    }
    while fetchers.join_next().await.is_some() {}
}
