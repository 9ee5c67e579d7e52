//! Concurrent multi-source aggregation.
//!
//! The engine fans out one task per region plus one bucket-collector task,
//! all funneling typed contributions into a single-consumer channel. The
//! engine's merge loop is the only writer to the report, so concurrent
//! appends cannot interleave; completion is tracked by a counting barrier
//! with exactly one signal per unit.

pub mod barrier;
pub mod buckets;
pub mod engine;
pub mod region;

pub use barrier::{CompletionBarrier, CompletionGuard};
pub use engine::{AggregationEngine, EngineConfig};

use crate::models::{ComputeInstance, DatabaseInstance, PartialFailure, Report, StorageBucket};

/// Barrier unit name for the bucket collector.
pub(crate) const BUCKETS_UNIT: &str = "buckets";

/// One message from a collector task to the merge loop.
#[derive(Debug)]
pub enum Contribution {
    Compute(Vec<ComputeInstance>),
    Databases(Vec<DatabaseInstance>),
    Bucket(StorageBucket),
    Failure(PartialFailure),
}

impl Report {
    /// Apply one contribution. All report mutation goes through here, from
    /// the single merge consumer.
    pub fn absorb(&mut self, contribution: Contribution) {
        match contribution {
            Contribution::Compute(instances) => self.compute_instances.extend(instances),
            Contribution::Databases(databases) => self.database_instances.extend(databases),
            Contribution::Bucket(bucket) => self.storage_buckets.push(bucket),
            Contribution::Failure(failure) => self.failures.push(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BucketStats, BucketSummary, FailureKind};
    use chrono::Utc;

    fn instance(id: &str, region: &str) -> ComputeInstance {
        ComputeInstance {
            id: id.to_string(),
            region: region.to_string(),
            state: "running".to_string(),
            instance_type: "t3.micro".to_string(),
            public_ip: None,
            private_ip: Some("10.0.0.1".to_string()),
            launch_time: Some(Utc::now()),
        }
    }

    fn bucket(name: &str) -> StorageBucket {
        StorageBucket::from_summary(
            BucketSummary {
                name: name.to_string(),
                created_at: None,
            },
            BucketStats {
                size_bytes: 1024,
                object_count: 3,
            },
        )
    }

    #[test]
    fn absorb_appends_each_kind() {
        let mut report = Report::new();
        report.absorb(Contribution::Compute(vec![
            instance("i-1", "us-west-2"),
            instance("i-2", "us-west-2"),
        ]));
        report.absorb(Contribution::Bucket(bucket("logs")));
        report.absorb(Contribution::Failure(PartialFailure::new(
            "region/us-east-1",
            FailureKind::SourceUnavailable,
            "connection refused",
        )));

        assert_eq!(report.compute_instances.len(), 2);
        assert_eq!(report.storage_buckets.len(), 1);
        assert!(report.database_instances.is_empty());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn merge_is_deterministic_modulo_order() {
        // The same contributions in a different arrival order produce the
        // same entity sets.
        let make = |order: &[usize]| {
            let contributions = [
                Contribution::Compute(vec![instance("i-1", "us-west-2")]),
                Contribution::Compute(vec![instance("i-2", "us-east-1")]),
                Contribution::Bucket(bucket("a")),
                Contribution::Bucket(bucket("b")),
            ];
            let mut contributions: Vec<Option<Contribution>> =
                contributions.into_iter().map(Some).collect();
            let mut report = Report::new();
            for &i in order {
                report.absorb(contributions[i].take().expect("index reused"));
            }
            report
        };

        let forward = make(&[0, 1, 2, 3]);
        let backward = make(&[3, 2, 1, 0]);

        let ids = |r: &Report| {
            let mut ids: Vec<String> =
                r.compute_instances.iter().map(|i| i.id.clone()).collect();
            ids.sort();
            ids
        };
        let names = |r: &Report| {
            let mut names: Vec<String> =
                r.storage_buckets.iter().map(|b| b.name.clone()).collect();
            names.sort();
            names
        };

        assert_eq!(ids(&forward), ids(&backward));
        assert_eq!(names(&forward), names(&backward));
    }

    #[test]
    fn total_failure_requires_a_recorded_failure() {
        let mut report = Report::new();
        assert!(!report.is_total_failure(), "empty account is not a failure");

        report.absorb(Contribution::Failure(PartialFailure::timeout("buckets")));
        assert!(report.is_total_failure());

        report.absorb(Contribution::Compute(vec![instance("i-1", "us-west-2")]));
        assert!(!report.is_total_failure());
    }
}
