use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry from the account-scoped bucket list, before statistics are
/// fetched for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// The two-number summary produced by the external statistics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    pub size_bytes: i64,
    pub object_count: i64,
}

/// A storage bucket with populated statistics. Buckets whose statistics
/// query failed are omitted from the report and recorded in its
/// partial-failures list instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageBucket {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub size_bytes: i64,
    pub object_count: i64,
}

impl StorageBucket {
    pub fn from_summary(summary: BucketSummary, stats: BucketStats) -> Self {
        Self {
            name: summary.name,
            created_at: summary.created_at,
            size_bytes: stats.size_bytes,
            object_count: stats.object_count,
        }
    }
}
