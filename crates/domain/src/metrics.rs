use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::statistics::{linear_trend, mean, min_max_normalized};

/// One day of vendor-reported metrics as delivered by the data-fetch layer.
///
/// Individual metrics may be absent if the vendor omitted them for a day.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetricsRecord {
    pub day: NaiveDate,
    pub activity_score: Option<f32>,
    pub medium_activity_met_minutes: Option<f32>,
    pub high_activity_met_minutes: Option<f32>,
    pub average_met_minutes: Option<f32>,
    pub training_volume: Option<f32>,
    pub readiness_score: Option<f32>,
    pub hrv_balance: Option<f32>,
}

/// A validated day of metrics with all required fields present.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyMetrics {
    pub day: NaiveDate,
    pub activity_score: f32,
    pub medium_activity_met_minutes: f32,
    pub high_activity_met_minutes: f32,
    pub average_met_minutes: f32,
    pub training_volume: f32,
    pub readiness_score: f32,
    pub hrv_balance: f32,
}

impl TryFrom<DailyMetricsRecord> for DailyMetrics {
    type Error = MetricsError;

    fn try_from(record: DailyMetricsRecord) -> Result<Self, Self::Error> {
        Ok(DailyMetrics {
            day: record.day,
            activity_score: require(record.activity_score, "activity_score")?,
            medium_activity_met_minutes: require(
                record.medium_activity_met_minutes,
                "medium_activity_met_minutes",
            )?,
            high_activity_met_minutes: require(
                record.high_activity_met_minutes,
                "high_activity_met_minutes",
            )?,
            average_met_minutes: require(record.average_met_minutes, "average_met_minutes")?,
            training_volume: require(record.training_volume, "training_volume")?,
            readiness_score: require(record.readiness_score, "readiness_score")?,
            hrv_balance: require(record.hrv_balance, "hrv_balance")?,
        })
    }
}

fn require(value: Option<f32>, field: &'static str) -> Result<f32, MetricsError> {
    let value = value.ok_or(MetricsError::MissingField(field))?;

    if value < 0.0 {
        return Err(MetricsError::NegativeValue(field));
    }

    Ok(value)
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MetricsError {
    #[error("missing required field {0}")]
    MissingField(&'static str),
    #[error("{0} must be non-negative")]
    NegativeValue(&'static str),
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct LoadStats {
    pub index: Vec<(NaiveDate, f32)>,
    pub trend: Vec<(NaiveDate, f32)>,
}

impl LoadStats {
    /// Ratio of the latest training load index to the mean over the whole
    /// window, the acute:chronic reduction consumed by the zone adapter.
    ///
    /// `None` if the series is empty or its mean is not positive.
    #[must_use]
    pub fn load_ratio(&self) -> Option<f32> {
        let values = self.index.iter().map(|(_, v)| *v).collect::<Vec<_>>();
        let mean = mean(&values)?;

        if mean > 0.0 {
            Some(self.index.last()?.1 / mean)
        } else {
            None
        }
    }
}

/// Calculate the per-day training load index over a window of daily metrics.
///
/// Each of the five activity columns is min-max normalized across the entire
/// window and the index of a day is the sum of its five normalized values.
/// The normalization denominator depends on the whole window, so values are
/// comparable within one window but change when the window is extended.
///
/// The order of the input is preserved in both result series. A column that
/// is constant across the window (including a window of a single day)
/// contributes 0 to every day.
#[must_use]
pub fn training_load_stats(metrics: &[DailyMetrics]) -> LoadStats {
    let columns: [Vec<f32>; 5] = [
        metrics.iter().map(|m| m.activity_score).collect(),
        metrics
            .iter()
            .map(|m| m.medium_activity_met_minutes)
            .collect(),
        metrics
            .iter()
            .map(|m| m.high_activity_met_minutes)
            .collect(),
        metrics.iter().map(|m| m.training_volume).collect(),
        metrics.iter().map(|m| m.average_met_minutes).collect(),
    ];
    let normalized = columns.map(|column| min_max_normalized(&column));

    let index = metrics
        .iter()
        .enumerate()
        .map(|(i, m)| (m.day, normalized.iter().map(|column| column[i]).sum()))
        .collect::<Vec<(NaiveDate, f32)>>();
    let trend = linear_trend(&index);

    LoadStats { index, trend }
}
