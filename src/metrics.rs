//! Vendor-agnostic metrics for permission checks.
//!
//! Install a [`MetricsSink`] once at startup to receive a [`CheckStats`]
//! for every store-backed check (`check_permission` and
//! `PermissionEvaluator::evaluate`). Until a sink is set, nothing is
//! recorded.
//!
//! ```ignore
//! use acca_access::metrics::{CheckStats, MetricsSink};
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! struct DenyCounter(AtomicU64);
//!
//! impl MetricsSink for DenyCounter {
//!     fn on_check(&self, stats: &CheckStats) {
//!         if !stats.allowed {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//! }
//!
//! acca_access::metrics::set_sink(Arc::new(DenyCounter(AtomicU64::new(0))));
//! ```

use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::warn;

/// One finished permission check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckStats {
    /// Wall-clock time for the whole check.
    pub duration: Duration,
    /// Time spent waiting on the permission store. Zero when the check was
    /// decided before the store was consulted.
    pub fetch_duration: Duration,
    pub allowed: bool,
    pub resource: String,
    pub action: String,
}

/// Receives check metrics. Called synchronously on the request path, so
/// implementations should not block.
pub trait MetricsSink: Send + Sync {
    fn on_check(&self, stats: &CheckStats);
}

static SINK: OnceLock<Arc<dyn MetricsSink>> = OnceLock::new();

/// Set the global metrics sink. Only the first call takes effect.
pub fn set_sink(sink: Arc<dyn MetricsSink>) {
    if SINK.set(sink).is_err() {
        warn!(
            "Metrics sink was already initialized. Ignoring subsequent set_sink call."
        );
    }
}

pub(crate) fn record_check(
    allowed: bool,
    duration: Duration,
    fetch_duration: Duration,
    resource: &str,
    action: &str,
) {
    let Some(sink) = SINK.get() else {
        return;
    };
    sink.on_check(&CheckStats {
        duration,
        fetch_duration,
        allowed,
        resource: resource.to_string(),
        action: action.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_stats_serialize() {
        let stats = CheckStats {
            duration: Duration::from_millis(2),
            fetch_duration: Duration::from_millis(1),
            allowed: false,
            resource: "nilai".to_string(),
            action: "delete".to_string(),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["allowed"], false);
        assert_eq!(json["resource"], "nilai");
        assert_eq!(json["duration"]["secs"], 0);
    }
}
