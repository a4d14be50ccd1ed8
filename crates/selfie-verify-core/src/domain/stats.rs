//! Engine statistics snapshot.

use std::time::Duration;

/// Point-in-time statistics snapshot for health reporting.
///
/// Produced by [`StatsRecorder::snapshot`](crate::stats::StatsRecorder::snapshot);
/// counters are monotonically non-decreasing over the engine's lifetime.
#[derive(Debug, Clone, Copy)]
pub struct EngineStats {
    /// Requests observed since engine construction, including failures.
    pub total_requests: u64,
    /// Requests that produced a successful result.
    pub successful_requests: u64,
    /// Mean end-to-end latency; 0 before the first request.
    pub avg_latency_ms: f64,
    /// Time elapsed since engine construction.
    pub uptime: Duration,
}
