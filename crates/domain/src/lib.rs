#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod metrics;
mod service;
mod statistics;
mod zones;

pub use error::{ReadError, StorageError};
pub use metrics::{DailyMetrics, DailyMetricsRecord, LoadStats, MetricsError, training_load_stats};
pub use service::{
    DEFAULT_LOOKBACK_DAYS, DEFAULT_RESTING_HEART_RATE, Dashboard, MetricsRepository, Service,
};
pub use statistics::{linear_trend, mean, min_max_normalized};
pub use zones::{Readiness, ReadinessError, ZoneBounds, adaptive_zone_bounds};
