//! Fetching and aggregating per-repository traffic data.

mod cache;
mod model;
mod provider;

pub use cache::TrafficCache;
pub use model::{DailySample, DayTotals, RepoTraffic, TrafficReport, aggregate_daily};
pub use provider::Provider;
