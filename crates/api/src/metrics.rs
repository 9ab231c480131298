use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use analyze::BatchResult;

pub struct Metrics {
    // Counters
    total_batches: AtomicUsize,
    failed_batches: AtomicUsize,
    documents_succeeded: AtomicUsize,
    documents_failed: AtomicUsize,

    // Timing (in microseconds)
    total_batch_time_us: AtomicU64,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_batches: AtomicUsize::new(0),
            failed_batches: AtomicUsize::new(0),
            documents_succeeded: AtomicUsize::new(0),
            documents_failed: AtomicUsize::new(0),
            total_batch_time_us: AtomicU64::new(0),
        })
    }

    /// Record a finished batch. `batch_failed` marks batches where no
    /// document succeeded.
    pub fn record_batch(&self, result: &BatchResult, batch_failed: bool) {
        self.total_batches.fetch_add(1, Ordering::Relaxed);
        if batch_failed {
            self.failed_batches.fetch_add(1, Ordering::Relaxed);
        }
        self.documents_succeeded
            .fetch_add(result.succeeded(), Ordering::Relaxed);
        self.documents_failed
            .fetch_add(result.failed(), Ordering::Relaxed);
        self.total_batch_time_us
            .fetch_add(result.elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let batches = self.total_batches.load(Ordering::Relaxed);
        let total_us = self.total_batch_time_us.load(Ordering::Relaxed) as f64;

        MetricsSnapshot {
            total_batches: batches,
            failed_batches: self.failed_batches.load(Ordering::Relaxed),
            documents_succeeded: self.documents_succeeded.load(Ordering::Relaxed),
            documents_failed: self.documents_failed.load(Ordering::Relaxed),
            avg_batch_time_ms: if batches > 0 {
                total_us / batches as f64 / 1000.0
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_batches: usize,
    pub failed_batches: usize,
    pub documents_succeeded: usize,
    pub documents_failed: usize,
    pub avg_batch_time_ms: f64,
}
