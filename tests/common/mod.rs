#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use vantage::errors::SourceError;
use vantage::models::{BucketStats, BucketSummary, ComputeInstance, DatabaseInstance};
use vantage::provider::InventorySource;
use vantage::stats::StatsError;

/// Scriptable inventory source: per-region canned results, per-unit induced
/// failures, and optionally a region whose query never returns (for
/// deadline tests).
#[derive(Default)]
pub struct MockSource {
    compute: HashMap<String, Vec<ComputeInstance>>,
    failing_compute: HashSet<String>,
    hanging_compute: HashSet<String>,
    databases: HashMap<String, Vec<DatabaseInstance>>,
    buckets: Vec<BucketSummary>,
    bucket_list_fails: bool,
    stats: HashMap<String, BucketStats>,
    failing_stats: HashSet<String>,
    pub database_queries: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instances(mut self, region: &str, count: usize) -> Self {
        let instances = (0..count)
            .map(|n| instance(&format!("i-{region}-{n}"), region))
            .collect();
        self.compute.insert(region.to_string(), instances);
        self
    }

    pub fn with_failing_region(mut self, region: &str) -> Self {
        self.failing_compute.insert(region.to_string());
        self
    }

    pub fn with_hanging_region(mut self, region: &str) -> Self {
        self.hanging_compute.insert(region.to_string());
        self
    }

    pub fn with_databases(mut self, region: &str, count: usize) -> Self {
        let databases = (0..count)
            .map(|n| database(&format!("db-{region}-{n}"), region))
            .collect();
        self.databases.insert(region.to_string(), databases);
        self
    }

    pub fn with_bucket(mut self, name: &str, size_bytes: i64, object_count: i64) -> Self {
        self.buckets.push(BucketSummary {
            name: name.to_string(),
            created_at: Some(Utc::now()),
        });
        self.stats.insert(
            name.to_string(),
            BucketStats {
                size_bytes,
                object_count,
            },
        );
        self
    }

    pub fn with_failing_bucket(mut self, name: &str) -> Self {
        self.buckets.push(BucketSummary {
            name: name.to_string(),
            created_at: Some(Utc::now()),
        });
        self.failing_stats.insert(name.to_string());
        self
    }

    pub fn with_bucket_list_failure(mut self) -> Self {
        self.bucket_list_fails = true;
        self
    }
}

#[async_trait]
impl InventorySource for MockSource {
    async fn compute_instances(&self, region: &str) -> Result<Vec<ComputeInstance>, SourceError> {
        if self.hanging_compute.contains(region) {
            std::future::pending::<()>().await;
        }
        if self.failing_compute.contains(region) {
            return Err(SourceError::api(
                "ec2:DescribeInstances",
                format!("connection refused for {region}"),
            ));
        }
        Ok(self.compute.get(region).cloned().unwrap_or_default())
    }

    async fn database_instances(
        &self,
        region: &str,
    ) -> Result<Vec<DatabaseInstance>, SourceError> {
        self.database_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.databases.get(region).cloned().unwrap_or_default())
    }

    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, SourceError> {
        if self.bucket_list_fails {
            return Err(SourceError::api("s3:ListBuckets", "service unavailable"));
        }
        Ok(self.buckets.clone())
    }

    async fn bucket_stats(&self, bucket: &str) -> Result<BucketStats, SourceError> {
        if self.failing_stats.contains(bucket) {
            return Err(SourceError::Stats(StatsError::Parse(
                "expected a two-element array, got 0 elements".to_string(),
            )));
        }
        self.stats
            .get(bucket)
            .copied()
            .ok_or_else(|| SourceError::Malformed(format!("unknown bucket {bucket}")))
    }
}

pub fn instance(id: &str, region: &str) -> ComputeInstance {
    ComputeInstance {
        id: id.to_string(),
        region: region.to_string(),
        state: "running".to_string(),
        instance_type: "t3.micro".to_string(),
        public_ip: Some("198.51.100.7".to_string()),
        private_ip: Some("10.0.0.7".to_string()),
        launch_time: Some(Utc::now()),
    }
}

pub fn database(name: &str, region: &str) -> DatabaseInstance {
    DatabaseInstance {
        name: name.to_string(),
        region: region.to_string(),
        state: "available".to_string(),
        instance_class: "db.t3.micro".to_string(),
        allocated_storage_gb: 20,
        master_username: Some("admin".to_string()),
        publicly_accessible: false,
        auto_minor_upgrade: true,
        created_at: Some(Utc::now()),
    }
}
