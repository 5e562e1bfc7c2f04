//! In-process request counters
//!
//! Encapsulated counter state with atomic fields. Callers only see
//! `record_success`, `record_validation_error`, and `snapshot`; the raw
//! counters are never exposed.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use thiserror::Error;

/// Number of iris classes. The per-class buckets are pre-seeded for labels
/// `0..NUM_CLASSES`; anything else out of the model is a defect.
pub const NUM_CLASSES: usize = 3;

/// Process-wide prediction counters. Zeroed at startup, reset only by
/// process restart.
#[derive(Debug, Default)]
pub struct Metrics {
    total_requests: AtomicU64,
    validation_errors: AtomicU64,
    predictions_by_class: [AtomicU64; NUM_CLASSES],
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub predictions_by_class: BTreeMap<String, u64>,
    pub validation_errors: u64,
}

#[derive(Debug, Error)]
#[error("model returned unexpected class label {0}")]
pub struct UnexpectedLabel(pub i64);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one successful request: the request counter moves by one, each
    /// predicted label bumps its class bucket.
    ///
    /// Every label is checked against the pre-seeded range before any
    /// counter moves, so a bad batch leaves the snapshot untouched.
    pub fn record_success(&self, labels: &[i64]) -> Result<(), UnexpectedLabel> {
        for &label in labels {
            if label < 0 || label >= NUM_CLASSES as i64 {
                return Err(UnexpectedLabel(label));
            }
        }

        self.total_requests.fetch_add(1, Ordering::Relaxed);
        for &label in labels {
            self.predictions_by_class[label as usize].fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Tally one rejected request.
    pub fn record_validation_error(&self) {
        self.validation_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Read-only snapshot with no side effects.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut by_class = BTreeMap::new();
        for (class, counter) in self.predictions_by_class.iter().enumerate() {
            by_class.insert(class.to_string(), counter.load(Ordering::Relaxed));
        }

        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            predictions_by_class: by_class,
            validation_errors: self.validation_errors.load(Ordering::Relaxed),
        }
    }
}
