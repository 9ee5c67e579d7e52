//! Bucket statistics via the provider CLI.
//!
//! The storage SDK exposes no aggregate-statistics call, so size and object
//! count come from shelling out to the CLI's JMESPath query, one invocation
//! per bucket. Each invocation is its own failure domain.

use serde_json::Value;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::models::BucketStats;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to invoke statistics command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("statistics command exited with {status}: {stderr}")]
    Command {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("statistics output did not parse: {0}")]
    Parse(String),
}

/// Run the external statistics query for one bucket.
///
/// Expected output is a two-element JSON array: total size in bytes, then
/// object count. `kill_on_drop` ensures an aborted collection leaves no
/// stray subprocess behind.
pub async fn fetch_bucket_stats(program: &str, bucket: &str) -> Result<BucketStats, StatsError> {
    debug!(bucket = %bucket, "Fetching bucket statistics");

    let output = Command::new(program)
        .args([
            "s3api",
            "list-objects",
            "--bucket",
            bucket,
            "--output",
            "json",
            "--query",
            "[sum(Contents[].Size), length(Contents[])]",
        ])
        .kill_on_drop(true)
        .output()
        .await?;

    if !output.status.success() {
        return Err(StatsError::Command {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse_stats(&output.stdout)
}

/// Parse the `[totalSizeBytes, objectCount]` array.
///
/// The CLI emits `null` for the size sum of an empty bucket (JMESPath `sum`
/// over a missing array), so null elements read as zero. Anything else that
/// is not a number is a parse failure, not a crash.
fn parse_stats(raw: &[u8]) -> Result<BucketStats, StatsError> {
    let values: Vec<Value> =
        serde_json::from_slice(raw).map_err(|e| StatsError::Parse(e.to_string()))?;

    let [size, count] = values.as_slice() else {
        return Err(StatsError::Parse(format!(
            "expected a two-element array, got {} elements",
            values.len()
        )));
    };

    Ok(BucketStats {
        size_bytes: numeric(size)
            .ok_or_else(|| StatsError::Parse(format!("size is not numeric: {size}")))?,
        object_count: numeric(count)
            .ok_or_else(|| StatsError::Parse(format!("object count is not numeric: {count}")))?,
    })
}

fn numeric(value: &Value) -> Option<i64> {
    match value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}
