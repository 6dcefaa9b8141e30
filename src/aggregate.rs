//! Calendar bucketing of raw samples into weekly or monthly means.
//!
//! This is the data pipeline behind the Weekly and Monthly views: one scan
//! over the raw samples, grouping by calendar week (Sunday-keyed) or month,
//! then averaging each bucket. Output buckets keep the order in which their
//! keys were first seen in the input.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::types::{AggregatedPoint, Granularity, Sample};

/// Failure to assign a sample to a calendar bucket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    /// The sample's timestamp is not a recognizable calendar date. The
    /// index and the raw string identify the offending record; whether to
    /// abort or skip is the caller's policy.
    #[error("sample #{index} has an unparseable timestamp: {timestamp:?}")]
    InvalidTimestamp { index: usize, timestamp: String },
}

/// Group samples by calendar week or month and average each bucket.
///
/// Every sample contributes to exactly one bucket; a bucket's value is the
/// unweighted arithmetic mean of its members. Buckets appear in the output
/// in first-seen-key order, so unsorted input is never silently reordered.
/// Empty input yields empty output.
pub fn aggregate(
    samples: &[Sample],
    granularity: Granularity,
) -> Result<Vec<AggregatedPoint>, AggregateError> {
    // First-seen order is contractual, so keys are tracked in a parallel
    // list next to the sum/count accumulator map.
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, (f64, usize)> = HashMap::new();

    for (index, sample) in samples.iter().enumerate() {
        let date = parse_timestamp(&sample.timestamp).ok_or_else(|| {
            AggregateError::InvalidTimestamp {
                index,
                timestamp: sample.timestamp.clone(),
            }
        })?;

        let key = bucket_key(date, granularity);
        match buckets.get_mut(&key) {
            Some((sum, count)) => {
                *sum += sample.value;
                *count += 1;
            }
            None => {
                buckets.insert(key.clone(), (sample.value, 1));
                order.push(key);
            }
        }
    }

    Ok(order
        .into_iter()
        .map(|key| {
            let (sum, count) = buckets[&key];
            AggregatedPoint {
                timestamp: key,
                value: sum / count as f64,
            }
        })
        .collect())
}

/// Parse a timestamp into its calendar date.
///
/// Accepts a plain date, a naive datetime, or an RFC 3339 datetime. The
/// written calendar date is used as-is; no timezone conversion is applied.
fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// Derive the bucket key for a calendar date.
///
/// Weeks start on Sunday and key as that Sunday's ISO date; months key as
/// `YYYY-MM`. Each call computes from a fresh `NaiveDate`, so no date
/// value is ever shared or mutated between samples.
fn bucket_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Week => {
            let sunday = date - Duration::days(i64::from(date.weekday().num_days_from_sunday()));
            sunday.format("%Y-%m-%d").to_string()
        }
        Granularity::Month => format!("{:04}-{:02}", date.year(), date.month()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(timestamp: &str, value: f64) -> Sample {
        Sample {
            timestamp: timestamp.to_string(),
            value,
        }
    }

    #[test]
    fn monthly_means_per_calendar_month() {
        let samples = vec![
            sample("2024-01-01", 10.0),
            sample("2024-01-02", 20.0),
            sample("2024-02-05", 30.0),
        ];

        let points = aggregate(&samples, Granularity::Month).unwrap();
        assert_eq!(
            points,
            vec![
                AggregatedPoint {
                    timestamp: "2024-01".to_string(),
                    value: 15.0,
                },
                AggregatedPoint {
                    timestamp: "2024-02".to_string(),
                    value: 30.0,
                },
            ]
        );
    }

    #[test]
    fn weekly_keys_on_the_weeks_sunday() {
        // Monday and Tuesday of the week starting Sunday 2024-03-03.
        let samples = vec![sample("2024-03-04", 5.0), sample("2024-03-05", 15.0)];

        let points = aggregate(&samples, Granularity::Week).unwrap();
        assert_eq!(
            points,
            vec![AggregatedPoint {
                timestamp: "2024-03-03".to_string(),
                value: 10.0,
            }]
        );
    }

    #[test]
    fn saturday_and_next_sunday_land_in_different_weeks() {
        let samples = vec![sample("2024-03-09", 1.0), sample("2024-03-10", 2.0)];

        let points = aggregate(&samples, Granularity::Week).unwrap();
        let keys: Vec<&str> = points.iter().map(|p| p.timestamp.as_str()).collect();
        assert_eq!(keys, vec!["2024-03-03", "2024-03-10"]);
    }

    #[test]
    fn weeks_span_year_boundaries() {
        // Tuesday 2024-12-31 and Wednesday 2025-01-01 share the week that
        // started on Sunday 2024-12-29.
        let samples = vec![sample("2024-12-31", 4.0), sample("2025-01-01", 6.0)];

        let points = aggregate(&samples, Granularity::Week).unwrap();
        assert_eq!(
            points,
            vec![AggregatedPoint {
                timestamp: "2024-12-29".to_string(),
                value: 5.0,
            }]
        );
    }

    #[test]
    fn output_order_is_first_seen_not_chronological() {
        let samples = vec![
            sample("2024-02-10", 1.0),
            sample("2024-01-03", 2.0),
            sample("2024-02-20", 3.0),
        ];

        let points = aggregate(&samples, Granularity::Month).unwrap();
        let keys: Vec<&str> = points.iter().map(|p| p.timestamp.as_str()).collect();
        assert_eq!(keys, vec!["2024-02", "2024-01"]);
        assert_eq!(points[0].value, 2.0);
        assert_eq!(points[1].value, 2.0);
    }

    #[test]
    fn every_sample_lands_in_exactly_one_bucket() {
        let samples = vec![
            sample("2024-03-01", 1.0),
            sample("2024-03-04", 2.0),
            sample("2024-03-05", 3.0),
            sample("2024-03-11", 4.0),
            sample("2024-03-12", 5.0),
        ];

        let points = aggregate(&samples, Granularity::Week).unwrap();
        // Fri 03-01 belongs to the 02-25 week, Mon/Tue 03-04/05 to the
        // 03-03 week, Mon/Tue 03-11/12 to the 03-10 week.
        assert_eq!(points.len(), 3);
        // Recover per-bucket counts through the means: total mass in the
        // output must equal the total mass of the input.
        let counts = [1.0, 2.0, 2.0];
        let total: f64 = points
            .iter()
            .zip(counts)
            .map(|(p, count)| p.value * count)
            .sum();
        let input_total: f64 = samples.iter().map(|s| s.value).sum();
        assert!((total - input_total).abs() < 1e-9);
    }

    #[test]
    fn bucket_mean_matches_arithmetic_mean() {
        let values = [3.5, 7.25, 11.0, 0.25];
        let samples: Vec<Sample> = values
            .iter()
            .map(|&v| sample("2024-06-15", v))
            .collect();

        let points = aggregate(&samples, Granularity::Month).unwrap();
        assert_eq!(points.len(), 1);
        let expected = values.iter().sum::<f64>() / values.len() as f64;
        assert!((points[0].value - expected).abs() < 1e-12);
    }

    #[test]
    fn datetime_timestamps_bucket_by_their_date() {
        let samples = vec![
            sample("2024-03-04T23:59:59", 5.0),
            sample("2024-03-05T00:00:00.500", 15.0),
            sample("2024-03-06T12:00:00+02:00", 10.0),
        ];

        let points = aggregate(&samples, Granularity::Week).unwrap();
        assert_eq!(
            points,
            vec![AggregatedPoint {
                timestamp: "2024-03-03".to_string(),
                value: 10.0,
            }]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(aggregate(&[], Granularity::Week).unwrap(), vec![]);
        assert_eq!(aggregate(&[], Granularity::Month).unwrap(), vec![]);
    }

    #[test]
    fn invalid_timestamp_identifies_the_record() {
        let samples = vec![sample("2024-01-01", 1.0), sample("not-a-date", 2.0)];

        let err = aggregate(&samples, Granularity::Month).unwrap_err();
        assert_eq!(
            err,
            AggregateError::InvalidTimestamp {
                index: 1,
                timestamp: "not-a-date".to_string(),
            }
        );
        assert!(err.to_string().contains("sample #1"));
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn single_sample_bucket_is_a_no_op_average() {
        let samples = vec![sample("2024-05-20", 42.5)];
        let points = aggregate(&samples, Granularity::Week).unwrap();
        assert_eq!(points[0].value, 42.5);
    }
}
