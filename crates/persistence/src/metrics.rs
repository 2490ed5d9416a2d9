//! Database metrics collection.
//!
//! Query durations are recorded through the `metrics` facade; without an
//! installed recorder the calls are no-ops.

use metrics::histogram;
use std::time::Instant;

/// Histogram name for query durations.
pub const QUERY_DURATION_METRIC: &str = "auth_db_query_duration_seconds";

/// Record database query duration.
pub fn record_query_duration(query_name: &'static str, duration_secs: f64) {
    histogram!(QUERY_DURATION_METRIC, "query" => query_name).record(duration_secs);
}

/// A helper to time database operations and record metrics.
///
/// Usage:
/// ```ignore
/// let timer = QueryTimer::new("find_account_by_email");
/// let result = sqlx::query_as::<_, AccountEntity>(...).fetch_all(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    /// Create a new timer for the given query name.
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration to metrics.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_query_duration(self.query_name, duration);
    }
}
