//! Prometheus scrape endpoint and request metrics

pub mod handlers;
pub mod middleware;

pub use handlers::{prometheus_metrics, MetricsState};
pub use middleware::track_http_metrics;
