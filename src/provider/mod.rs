//! Inventory data sources.
//!
//! Every query the collectors issue goes through the [`InventorySource`]
//! trait: per-region compute and database inventories, the account-scoped
//! bucket list, and per-bucket statistics. Production uses the AWS-backed
//! implementation; tests substitute their own.

pub mod aws;
pub mod context;

pub use aws::AwsInventorySource;
pub use context::AwsContext;

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::models::{BucketStats, BucketSummary, ComputeInstance, DatabaseInstance};

#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Compute instances in one region.
    async fn compute_instances(&self, region: &str) -> Result<Vec<ComputeInstance>, SourceError>;

    /// Managed database instances in one region.
    async fn database_instances(&self, region: &str)
        -> Result<Vec<DatabaseInstance>, SourceError>;

    /// The account-scoped bucket list (not a per-region query).
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, SourceError>;

    /// Size and object count for one bucket.
    async fn bucket_stats(&self, bucket: &str) -> Result<BucketStats, SourceError>;
}
