use crate::traffic::TrafficReport;
use chrono::Utc;
use core::time::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

const LOG_TARGET: &str = "     cache";

/// In-memory TTL cache of traffic reports, keyed by username.
///
/// Entries expire based on the report's own fetch timestamp; expired entries
/// stay in the map until the next `put` replaces them.
#[derive(Debug)]
pub struct TrafficCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Arc<TrafficReport>>>,
}

impl TrafficCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a fresh report for a user, if one is cached.
    pub async fn get(&self, username: &str) -> Option<Arc<TrafficReport>> {
        let entries = self.entries.lock().await;
        let report = entries.get(&Self::key(username))?;

        let age = Utc::now().signed_duration_since(report.timestamp);

        // Future timestamps (clock skew) count as fresh
        if age.num_seconds() < 0 {
            log::debug!(target: LOG_TARGET, "Cache timestamp is in the future for '{username}' (clock skew detected), treating as fresh");
            return Some(Arc::clone(report));
        }

        let age = age.to_std().unwrap_or(Duration::MAX);
        if age < self.ttl {
            log::debug!(target: LOG_TARGET, "Cache hit for '{username}' (age: {:.0}s)", age.as_secs_f64());
            Some(Arc::clone(report))
        } else {
            log::debug!(target: LOG_TARGET, "Cache expired for '{username}' (age: {:.0}s, TTL: {:.0}s)", age.as_secs_f64(), self.ttl.as_secs_f64());
            None
        }
    }

    /// Store a freshly fetched report and hand back a shared handle to it.
    pub async fn put(&self, username: &str, report: TrafficReport) -> Arc<TrafficReport> {
        let report = Arc::new(report);
        let mut entries = self.entries.lock().await;
        let _ = entries.insert(Self::key(username), Arc::clone(&report));
        report
    }

    /// GitHub usernames are case-insensitive
    fn key(username: &str) -> String {
        username.to_ascii_lowercase()
    }
}
