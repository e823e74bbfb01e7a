//! Shared health state for the /health endpoint.
//! Updated by the analysis handler, read by `get_health`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;

/// Process-wide request counters. Analyses themselves share nothing.
pub struct HealthState {
    started_at: Instant,
    analyses_completed: AtomicU64,
    analyses_failed: AtomicU64,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            started_at: Instant::now(),
            analyses_completed: AtomicU64::new(0),
            analyses_failed: AtomicU64::new(0),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_analysis(&self, failed: bool) {
        let counter = if failed {
            &self.analyses_failed
        } else {
            &self.analyses_completed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> HealthResponse {
        HealthResponse {
            status: "ok",
            uptime_secs: self.started_at.elapsed().as_secs(),
            analyses_completed: self.analyses_completed.load(Ordering::Relaxed),
            analyses_failed: self.analyses_failed.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub analyses_completed: u64,
    pub analyses_failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_completed_and_failed_separately() {
        let health = HealthState::new();
        health.record_analysis(false);
        health.record_analysis(false);
        health.record_analysis(true);

        let snap = health.snapshot();
        assert_eq!(snap.status, "ok");
        assert_eq!(snap.analyses_completed, 2);
        assert_eq!(snap.analyses_failed, 1);
    }
}
