pub mod bucket;
pub mod instance;
pub mod report;

pub use bucket::{BucketStats, BucketSummary, StorageBucket};
pub use instance::{ComputeInstance, DatabaseInstance};
pub use report::{FailureKind, PartialFailure, Report};
