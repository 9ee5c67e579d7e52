//! Counting completion barrier.
//!
//! One primitive replaces the mixed wait-group/channel signaling this kind of
//! fan-out tends to accumulate: every unit of work is registered by name
//! before launch and holds a guard that signals the barrier exactly once on
//! every exit path — success, failure, cancellation, or panic unwind.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

#[derive(Clone, Default)]
pub struct CompletionBarrier {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    pending: Mutex<HashSet<String>>,
    notify: Notify,
}

impl Inner {
    fn lock_pending(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CompletionBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit of work before launching it. Unit names must be
    /// unique within one barrier.
    pub fn register(&self, unit: impl Into<String>) -> CompletionGuard {
        let unit = unit.into();
        let inserted = self.inner.lock_pending().insert(unit.clone());
        debug_assert!(inserted, "duplicate barrier unit: {unit}");
        CompletionGuard {
            inner: self.inner.clone(),
            unit: Some(unit),
        }
    }

    /// Resolve once every registered unit has signaled. Returns immediately
    /// if nothing is (or was ever) registered.
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Register interest before the emptiness check so a signal
            // arriving between the check and the await is not lost.
            notified.as_mut().enable();
            if self.inner.lock_pending().is_empty() {
                return;
            }
            notified.await;
        }
    }

    /// Names of units that have not yet signaled, sorted for stable output.
    pub fn pending(&self) -> Vec<String> {
        let mut units: Vec<String> = self.inner.lock_pending().iter().cloned().collect();
        units.sort();
        units
    }
}

/// Held by one unit of work; signals the barrier when dropped. Dropping is
/// the only way to signal, so a unit cannot signal twice and cannot forget
/// to signal on an early return.
pub struct CompletionGuard {
    inner: Arc<Inner>,
    unit: Option<String>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(unit) = self.unit.take() {
            let mut pending = self.inner.lock_pending();
            pending.remove(&unit);
            let empty = pending.is_empty();
            drop(pending);
            if empty {
                self.inner.notify.notify_waiters();
            }
        }
    }
}
