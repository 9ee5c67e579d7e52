use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::collector::EngineConfig;

/// Process-wide configuration, established at startup and passed into the
/// engine as an explicit value. Defaults mirror a stock deployment: the
/// historical two-region set, database inventory on, a one-minute deadline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VantageConfig {
    /// Regions whose compute/database inventories are queried.
    pub regions: Vec<String>,
    /// Whether to query the managed-database inventory per region.
    pub include_databases: bool,
    /// Upper bound on one full collection, in seconds.
    pub deadline_secs: u64,
    /// Region whose endpoint serves the account-scoped bucket list.
    pub bucket_region: String,
    pub stats: StatsConfig,
}

impl Default for VantageConfig {
    fn default() -> Self {
        Self {
            regions: vec!["us-west-2".to_string(), "us-east-1".to_string()],
            include_databases: true,
            deadline_secs: 60,
            bucket_region: "us-east-1".to_string(),
            stats: StatsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Program invoked for per-bucket statistics.
    pub command: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            command: "aws".to_string(),
        }
    }
}

impl VantageConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            regions: self.regions.clone(),
            include_databases: self.include_databases,
            deadline: self.deadline(),
        }
    }
}
