//! Thread-safe running statistics for health reporting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::domain::EngineStats;

/// Running request counters, safe under unsynchronized concurrent
/// `record` calls from simultaneous verifications.
///
/// Fields are independently atomic rather than guarded by one lock: a
/// snapshot taken while requests are in flight may skew by a request
/// between fields, which is acceptable for health reporting.
#[derive(Debug)]
pub struct StatsRecorder {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    total_latency_ms: AtomicU64,
    started: Instant,
}

impl StatsRecorder {
    /// Creates a recorder with all counters at zero. The start time is
    /// fixed here and never reset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            successful_requests: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Records one request outcome.
    ///
    /// Every call increments `total_requests` and accumulates latency;
    /// only successful outcomes increment `successful_requests`.
    pub fn record(&self, success: bool, latency_ms: u64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        }
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
    }

    /// Point-in-time snapshot.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn snapshot(&self) -> EngineStats {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let successful_requests = self.successful_requests.load(Ordering::Relaxed);
        let total_latency_ms = self.total_latency_ms.load(Ordering::Relaxed);

        let avg_latency_ms = if total_requests == 0 {
            0.0
        } else {
            total_latency_ms as f64 / total_requests as f64
        };

        EngineStats {
            total_requests,
            successful_requests,
            avg_latency_ms,
            uptime: self.started.elapsed(),
        }
    }
}

impl Default for StatsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state() {
        let recorder = StatsRecorder::new();
        let stats = recorder.snapshot();
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.successful_requests, 0);
        assert_eq!(stats.avg_latency_ms, 0.0);
    }

    #[test]
    fn test_failures_count_toward_totals_only() {
        let recorder = StatsRecorder::new();
        recorder.record(true, 10);
        recorder.record(false, 30);

        let stats = recorder.snapshot();
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.successful_requests, 1);
        // Failed requests still accumulate latency.
        assert!((stats.avg_latency_ms - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_counters_are_monotone() {
        let recorder = StatsRecorder::new();
        let mut last_total = 0;
        let mut last_successful = 0;

        for i in 0..20 {
            recorder.record(i % 3 == 0, 5);
            let stats = recorder.snapshot();
            assert!(stats.total_requests > last_total);
            assert!(stats.successful_requests >= last_successful);
            assert!(stats.successful_requests <= stats.total_requests);
            last_total = stats.total_requests;
            last_successful = stats.successful_requests;
        }
        assert_eq!(recorder.snapshot().total_requests, 20);
    }

    #[test]
    fn test_concurrent_recording_loses_nothing() {
        let recorder = std::sync::Arc::new(StatsRecorder::new());
        let threads: u64 = 8;
        let per_thread: u64 = 500;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let recorder = std::sync::Arc::clone(&recorder);
                std::thread::spawn(move || {
                    for i in 0..per_thread {
                        recorder.record((t + i) % 2 == 0, 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("recording thread panicked");
        }

        let stats = recorder.snapshot();
        assert_eq!(stats.total_requests, threads * per_thread);
        assert_eq!(stats.successful_requests, threads * per_thread / 2);
        assert!((stats.avg_latency_ms - 1.0).abs() < f64::EPSILON);
    }
}
