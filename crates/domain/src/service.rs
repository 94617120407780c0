use std::collections::BTreeMap;

use log::{debug, error};

use crate::{
    DailyMetrics, DailyMetricsRecord, LoadStats, ReadError, Readiness, StorageError, ZoneBounds,
    adaptive_zone_bounds, training_load_stats,
};

/// Resting heart rate assumed when the vendor does not report one.
pub const DEFAULT_RESTING_HEART_RATE: u32 = 60;

/// Number of days of history requested from the vendor by default.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

#[allow(async_fn_in_trait)]
pub trait MetricsRepository {
    async fn read_daily_metrics(
        &self,
        lookback_days: u32,
    ) -> Result<Vec<DailyMetricsRecord>, ReadError>;
    async fn read_resting_heart_rate(&self) -> Result<Option<u32>, ReadError>;
    async fn read_max_heart_rate(&self) -> Result<u32, ReadError>;
}

/// The values displayed by the dashboard, derived from one window of daily
/// metrics.
pub struct Dashboard {
    pub load: LoadStats,
    pub readiness_score: f32,
    pub activity_score: f32,
    pub hrv_balance: f32,
    pub resting_heart_rate: u32,
    pub max_heart_rate: u32,
    pub zones: BTreeMap<u8, ZoneBounds>,
}

pub struct Service<R> {
    repository: R,
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func.await;
        if let Err(ref err) = result {
            match err {
                ReadError::Storage(StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            }
        }
        result
    }};
}

impl<R: MetricsRepository> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Assemble the dashboard for the default lookback window.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::NotFound` for an empty metrics window and
    /// propagates repository and validation failures.
    pub async fn read_dashboard(&self) -> Result<Dashboard, ReadError> {
        self.read_dashboard_for(DEFAULT_LOOKBACK_DAYS).await
    }

    pub async fn read_dashboard_for(&self, lookback_days: u32) -> Result<Dashboard, ReadError> {
        let records = log_on_error!(
            self.repository.read_daily_metrics(lookback_days),
            "read",
            "daily metrics"
        )?;
        let mut metrics = records
            .into_iter()
            .map(DailyMetrics::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ReadError::Other(err.into()))?;
        // Latest-value semantics require ascending order by day.
        metrics.sort_by_key(|m| m.day);

        let latest = metrics.last().ok_or(ReadError::NotFound)?;
        let readiness = Readiness::from_score(latest.readiness_score)
            .map_err(|err| ReadError::Other(err.into()))?;
        let readiness_score = latest.readiness_score;
        let activity_score = latest.activity_score;
        let hrv_balance = latest.hrv_balance;

        let load = training_load_stats(&metrics);
        let acr = load.load_ratio().unwrap_or(1.0);

        let resting_heart_rate = log_on_error!(
            self.repository.read_resting_heart_rate(),
            "read",
            "resting heart rate"
        )?
        .unwrap_or(DEFAULT_RESTING_HEART_RATE);
        let max_heart_rate = log_on_error!(
            self.repository.read_max_heart_rate(),
            "read",
            "max heart rate"
        )?;

        let zones = adaptive_zone_bounds(resting_heart_rate, max_heart_rate, readiness, acr);

        Ok(Dashboard {
            load,
            readiness_score,
            activity_score,
            hrv_balance,
            resting_heart_rate,
            max_heart_rate,
            zones,
        })
    }
}
