use chrono::NaiveDate;

/// Scale a series of values to the range [0, 1] using min-max normalization.
///
/// The minimum of the series maps to 0 and the maximum to 1. A series without
/// at least two distinct values has no defined scale; every value is mapped
/// to 0 in that case so that a flat metric contributes nothing to sums of
/// normalized series.
#[must_use]
pub fn min_max_normalized(values: &[f32]) -> Vec<f32> {
    let Some(min) = values.iter().copied().reduce(f32::min) else {
        return vec![];
    };
    let Some(max) = values.iter().copied().reduce(f32::max) else {
        return vec![];
    };

    let range = max - min;

    if range > 0.0 {
        values.iter().map(|v| (v - min) / range).collect()
    } else {
        vec![0.0; values.len()]
    }
}

#[must_use]
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        #[allow(clippy::cast_precision_loss)]
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }
}

/// Fit a least-squares line to a series of (date, value) pairs.
///
/// The fit is computed over the positions of the values, not over calendar
/// distances, matching a series with one value per day. The result contains
/// the fitted value for every input date in input order. Series with fewer
/// than two values are returned unchanged.
#[must_use]
pub fn linear_trend(data: &[(NaiveDate, f32)]) -> Vec<(NaiveDate, f32)> {
    if data.len() < 2 {
        return data.to_vec();
    }

    #[allow(clippy::cast_precision_loss)]
    let len = data.len() as f32;
    let mean_x = (len - 1.0) / 2.0;
    let mean_y = data.iter().map(|(_, v)| v).sum::<f32>() / len;

    let mut xx = 0.0;
    let mut xy = 0.0;

    #[allow(clippy::cast_precision_loss)]
    for (i, (_, v)) in data.iter().enumerate() {
        let dx = i as f32 - mean_x;
        xx += dx * dx;
        xy += dx * (v - mean_y);
    }

    let slope = xy / xx;
    let intercept = mean_y - slope * mean_x;

    #[allow(clippy::cast_precision_loss)]
    data.iter()
        .enumerate()
        .map(|(i, (date, _))| (*date, intercept + slope * i as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty_series(&[], vec![])]
    #[case::single_value(&[4.2], vec![0.0])]
    #[case::constant_series(&[3.0, 3.0, 3.0], vec![0.0, 0.0, 0.0])]
    #[case::two_distinct_values(&[2.0, 4.0], vec![0.0, 1.0])]
    #[case::multiple_values(&[10.0, 20.0, 15.0, 30.0], vec![0.0, 0.5, 0.25, 1.0])]
    #[case::unsorted_extremes(&[5.0, 1.0, 3.0, 9.0, 7.0], vec![0.5, 0.0, 0.25, 1.0, 0.75])]
    fn test_min_max_normalized(#[case] values: &[f32], #[case] expected: Vec<f32>) {
        assert_eq!(min_max_normalized(values), expected);
    }

    #[test]
    fn test_min_max_normalized_bounds() {
        let values = [17.0, 4.0, 23.0, 8.0, 4.5, 19.0];
        let normalized = min_max_normalized(&values);

        assert!(normalized.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(normalized[1], 0.0);
        assert_eq!(normalized[2], 1.0);
    }

    #[rstest]
    #[case::empty_series(&[], None)]
    #[case::single_value(&[4.0], Some(4.0))]
    #[case::multiple_values(&[1.0, 2.0, 6.0], Some(3.0))]
    fn test_mean(#[case] values: &[f32], #[case] expected: Option<f32>) {
        assert_eq!(mean(values), expected);
    }

    #[rstest]
    #[case::empty_series(&[], vec![])]
    #[case::single_value(&[(0, 4.0)], vec![(0, 4.0)])]
    #[case::constant_series(
        &[(0, 2.0), (1, 2.0), (2, 2.0)],
        vec![(0, 2.0), (1, 2.0), (2, 2.0)]
    )]
    #[case::two_values(&[(0, 1.0), (1, 3.0)], vec![(0, 1.0), (1, 3.0)])]
    #[case::increasing_series(
        &[(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0)],
        vec![(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0)]
    )]
    #[case::with_outlier(
        &[(0, 0.0), (1, 0.0), (2, 3.0)],
        vec![(0, -0.5), (1, 1.0), (2, 2.5)]
    )]
    fn test_linear_trend(#[case] input: &[(i32, f32)], #[case] expected: Vec<(i32, f32)>) {
        let result = linear_trend(
            &input
                .iter()
                .map(|(d, v)| (from_num_days(*d), *v))
                .collect::<Vec<_>>(),
        );

        assert_eq!(result.len(), expected.len());
        for ((date, value), (expected_date, expected_value)) in result.iter().zip(&expected) {
            assert_eq!(*date, from_num_days(*expected_date));
            assert_approx_eq!(value, expected_value, 1e-5);
        }
    }

    fn from_num_days(days: i32) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(days).unwrap()
    }
}
