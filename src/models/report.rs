use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bucket::StorageBucket;
use super::instance::{ComputeInstance, DatabaseInstance};

/// The aggregate result of one collection request.
///
/// Owned by a single engine invocation and mutated only by its merge loop;
/// once `collect` returns, the report is effectively immutable. Entity
/// ordering across regions and buckets is unspecified — consumers must treat
/// the collections as sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub snapshot_id: String,
    pub collected_at: DateTime<Utc>,
    pub compute_instances: Vec<ComputeInstance>,
    pub storage_buckets: Vec<StorageBucket>,
    pub database_instances: Vec<DatabaseInstance>,
    pub failures: Vec<PartialFailure>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            snapshot_id: Uuid::new_v4().to_string(),
            collected_at: Utc::now(),
            compute_instances: Vec::new(),
            storage_buckets: Vec::new(),
            database_instances: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn entity_count(&self) -> usize {
        self.compute_instances.len() + self.storage_buckets.len() + self.database_instances.len()
    }

    /// True when nothing at all was collected and at least one unit failed.
    /// The HTTP surface maps this to a distinguishable status code; a report
    /// from a genuinely empty account (no failures) is not a total failure.
    pub fn is_total_failure(&self) -> bool {
        self.entity_count() == 0 && !self.failures.is_empty()
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

/// Error taxonomy for failed units of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    SourceUnavailable,
    BucketStatsUnavailable,
    Timeout,
}

/// One failed unit of work, attached to the report so degraded responses
/// still name what is missing and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialFailure {
    pub unit: String,
    pub kind: FailureKind,
    pub message: String,
}

impl PartialFailure {
    pub fn new(unit: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(unit: impl Into<String>) -> Self {
        Self::new(
            unit,
            FailureKind::Timeout,
            "unit did not complete before the collection deadline",
        )
    }
}
