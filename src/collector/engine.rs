//! The aggregation engine: fan-out, single-consumer merge, deadline.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::barrier::CompletionBarrier;
use super::{buckets, region, Contribution, BUCKETS_UNIT};
use crate::models::{PartialFailure, Report};
use crate::provider::InventorySource;

/// Explicit per-engine configuration; nothing about the region set is
/// process-global.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub regions: Vec<String>,
    pub include_databases: bool,
    pub deadline: Duration,
}

pub struct AggregationEngine {
    source: Arc<dyn InventorySource>,
    config: EngineConfig,
}

impl AggregationEngine {
    pub fn new(source: Arc<dyn InventorySource>, config: EngineConfig) -> Self {
        Self { source, config }
    }

    pub fn regions(&self) -> &[String] {
        &self.config.regions
    }

    /// Run one full aggregation. Infallible from the caller's perspective:
    /// per-unit failures degrade the report, a missed deadline truncates it,
    /// and the returned report always reflects every unit that completed.
    pub async fn collect(&self) -> Report {
        let mut report = Report::new();
        info!(
            snapshot_id = %report.snapshot_id,
            regions = self.config.regions.len(),
            include_databases = self.config.include_databases,
            "Collection started"
        );

        let barrier = CompletionBarrier::new();
        let cancel = CancellationToken::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut units = JoinSet::new();

        // Register every unit before launching any, so the barrier is sized
        // to the full fan-out up front.
        for region_name in &self.config.regions {
            let guard = barrier.register(format!("region/{region_name}"));
            units.spawn(region::collect_region(
                self.source.clone(),
                region_name.clone(),
                self.config.include_databases,
                tx.clone(),
                guard,
                cancel.child_token(),
            ));
        }
        let bucket_guard = barrier.register(BUCKETS_UNIT);
        units.spawn(buckets::collect_buckets(
            self.source.clone(),
            tx.clone(),
            bucket_guard,
            cancel.child_token(),
        ));
        drop(tx);

        // Single-consumer merge: this loop is the only writer to the report.
        // The channel closes once every unit has dropped its sender.
        let deadline = tokio::time::sleep(self.config.deadline);
        tokio::pin!(deadline);
        let mut timed_out = false;
        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(contribution) => report.absorb(contribution),
                    None => break,
                },
                _ = &mut deadline => {
                    timed_out = true;
                    break;
                }
            }
        }

        if timed_out {
            cancel.cancel();
            let pending = barrier.pending();
            warn!(
                snapshot_id = %report.snapshot_id,
                pending = ?pending,
                "Collection deadline elapsed; returning partial report"
            );
            for unit in pending {
                report.absorb(Contribution::Failure(PartialFailure::timeout(unit)));
            }
            units.abort_all();
            while units.join_next().await.is_some() {}
            // Keep contributions that were already in flight at the deadline.
            while let Ok(contribution) = rx.try_recv() {
                report.absorb(contribution);
            }
        } else {
            // The channel closing implies every unit finished, but the
            // barrier is the completion protocol: the report is not handed
            // out until each registered unit has signaled.
            barrier.wait().await;
        }

        info!(
            snapshot_id = %report.snapshot_id,
            compute_instances = report.compute_instances.len(),
            storage_buckets = report.storage_buckets.len(),
            database_instances = report.database_instances.len(),
            failures = report.failures.len(),
            "Collection complete"
        );
        report
    }
}
