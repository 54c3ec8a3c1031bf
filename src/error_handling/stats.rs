//! Failure statistics tracking.
//!
//! Thread-safe counters for the failure categories seen during a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureType;

/// Thread-safe failure statistics tracker.
///
/// Every `FailureType` is initialized to zero on creation, so lookups never miss.
/// Shared across tasks with `Arc`.
pub struct FailureStats {
    failures: HashMap<FailureType, AtomicUsize>,
}

impl FailureStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for failure in FailureType::iter() {
            failures.insert(failure, AtomicUsize::new(0));
        }
        FailureStats { failures }
    }

    /// Increment a failure counter.
    pub fn increment(&self, failure: FailureType) {
        self.add(failure, 1);
    }

    /// Add `count` to a failure counter.
    pub fn add(&self, failure: FailureType, count: usize) {
        if let Some(counter) = self.failures.get(&failure) {
            counter.fetch_add(count, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in FailureStats initialization.",
                failure
            );
        }
    }

    /// Get the count for a failure type.
    pub fn get_count(&self, failure: FailureType) -> usize {
        self.failures
            .get(&failure)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total failure count across all failure types.
    pub fn total(&self) -> usize {
        FailureType::iter().map(|f| self.get_count(f)).sum()
    }
}

impl Default for FailureStats {
    fn default() -> Self {
        Self::new()
    }
}
