use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One compute instance as reported by a per-region inventory query.
///
/// Addresses and launch time are optional: the provider omits them for
/// instances that are stopped or still provisioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeInstance {
    pub id: String,
    pub region: String,
    pub state: String,
    pub instance_type: String,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,
    pub launch_time: Option<DateTime<Utc>>,
}

/// One managed database instance as reported by a per-region inventory query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInstance {
    pub name: String,
    pub region: String,
    pub state: String,
    pub instance_class: String,
    pub allocated_storage_gb: i32,
    pub master_username: Option<String>,
    pub publicly_accessible: bool,
    pub auto_minor_upgrade: bool,
    pub created_at: Option<DateTime<Utc>>,
}
