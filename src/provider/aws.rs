//! AWS-backed inventory source.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::context::AwsContext;
use super::InventorySource;
use crate::config::VantageConfig;
use crate::errors::SourceError;
use crate::models::{BucketStats, BucketSummary, ComputeInstance, DatabaseInstance};
use crate::stats;

/// Inventory source backed by the AWS SDK, with one pre-loaded context per
/// configured region. Bucket statistics go through the external CLI query,
/// since the SDK exposes no aggregate call for them.
pub struct AwsInventorySource {
    contexts: HashMap<String, AwsContext>,
    bucket_region: String,
    stats_command: String,
}

impl AwsInventorySource {
    /// Load one SDK context per configured region, plus the region whose
    /// endpoint serves the account-scoped bucket list.
    pub async fn connect(config: &VantageConfig) -> Self {
        let mut contexts = HashMap::new();
        for region in config.regions.iter().chain([&config.bucket_region]) {
            if !contexts.contains_key(region) {
                debug!(region = %region, "Loading AWS context");
                contexts.insert(region.clone(), AwsContext::load(region).await);
            }
        }
        Self {
            contexts,
            bucket_region: config.bucket_region.clone(),
            stats_command: config.stats.command.clone(),
        }
    }

    fn context(&self, region: &str) -> Result<&AwsContext, SourceError> {
        self.contexts
            .get(region)
            .ok_or_else(|| SourceError::api("context lookup", format!("no AWS context loaded for region {region}")))
    }
}

#[async_trait]
impl InventorySource for AwsInventorySource {
    async fn compute_instances(&self, region: &str) -> Result<Vec<ComputeInstance>, SourceError> {
        let client = self.context(region)?.ec2_client();
        let response = client
            .describe_instances()
            .send()
            .await
            .map_err(|e| SourceError::api("ec2:DescribeInstances", DisplayErrorContext(e)))?;

        let mut instances = Vec::new();
        for reservation in response.reservations() {
            for instance in reservation.instances() {
                instances.push(ComputeInstance {
                    id: instance.instance_id().unwrap_or_default().to_string(),
                    region: region.to_string(),
                    state: instance
                        .state()
                        .and_then(|s| s.name())
                        .map(|n| n.as_str().to_string())
                        .unwrap_or_default(),
                    instance_type: instance
                        .instance_type()
                        .map(|t| t.as_str().to_string())
                        .unwrap_or_default(),
                    public_ip: instance.public_ip_address().map(str::to_string),
                    private_ip: instance.private_ip_address().map(str::to_string),
                    launch_time: instance.launch_time().and_then(to_utc),
                });
            }
        }
        Ok(instances)
    }

    async fn database_instances(
        &self,
        region: &str,
    ) -> Result<Vec<DatabaseInstance>, SourceError> {
        let client = self.context(region)?.rds_client();
        let response = client
            .describe_db_instances()
            .send()
            .await
            .map_err(|e| SourceError::api("rds:DescribeDBInstances", DisplayErrorContext(e)))?;

        let databases = response
            .db_instances()
            .iter()
            .map(|db| DatabaseInstance {
                name: db.db_instance_identifier().unwrap_or_default().to_string(),
                region: region.to_string(),
                state: db.db_instance_status().unwrap_or_default().to_string(),
                instance_class: db.db_instance_class().unwrap_or_default().to_string(),
                allocated_storage_gb: db.allocated_storage().unwrap_or_default(),
                master_username: db.master_username().map(str::to_string),
                publicly_accessible: db.publicly_accessible().unwrap_or_default(),
                auto_minor_upgrade: db.auto_minor_version_upgrade().unwrap_or_default(),
                created_at: db.instance_create_time().and_then(to_utc),
            })
            .collect();
        Ok(databases)
    }

    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, SourceError> {
        let client = self.context(&self.bucket_region)?.s3_client();
        let response = client
            .list_buckets()
            .send()
            .await
            .map_err(|e| SourceError::api("s3:ListBuckets", DisplayErrorContext(e)))?;

        let buckets = response
            .buckets()
            .iter()
            .filter_map(|bucket| {
                bucket.name().map(|name| BucketSummary {
                    name: name.to_string(),
                    created_at: bucket.creation_date().and_then(to_utc),
                })
            })
            .collect();
        Ok(buckets)
    }

    async fn bucket_stats(&self, bucket: &str) -> Result<BucketStats, SourceError> {
        let stats = stats::fetch_bucket_stats(&self.stats_command, bucket).await?;
        Ok(stats)
    }
}

/// The SDK and RDS/S3 crates share the same smithy timestamp type; convert
/// through epoch seconds rather than formatting round-trips.
fn to_utc(timestamp: &aws_sdk_ec2::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}
