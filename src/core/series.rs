//! Aggregation of forecast samples into chart-ready daily series.
//!
//! Forecast providers report samples in 3-hour UTC steps. Samples are bucketed
//! by the calendar date they fall on in a caller-supplied time zone; the weather
//! pipeline uses the local zone of the running process, so the grouping (and
//! therefore the daily means) depends on the configured `TZ`.

use chrono::{Local, NaiveDate, TimeZone};

/// Maximum number of days in a daily series.
pub const MAX_DAYS: usize = 7;

/// One forecast sample as reported by the weather provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    /// Degrees Celsius
    pub temperature: f64,
    pub condition: String,
}

/// Mean temperature of all samples sharing a calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub mean_temperature: f64,
}

/// Groups samples by calendar date in `tz` and averages each day.
///
/// Dates appear in first-seen order and at most [`MAX_DAYS`] are returned.
/// Means are rounded to the nearest integer with halves rounding up.
pub fn aggregate_daily<Tz: TimeZone>(observations: &[RawObservation], tz: &Tz) -> Vec<DailyAggregate> {
    let mut buckets: Vec<(NaiveDate, f64, usize)> = Vec::new();

    for obs in observations {
        let Some(dt) = tz.timestamp_opt(obs.timestamp, 0).single() else {
            continue;
        };
        let date = dt.date_naive();

        match buckets.iter_mut().find(|(d, _, _)| *d == date) {
            Some((_, sum, count)) => {
                *sum += obs.temperature;
                *count += 1;
            }
            None => buckets.push((date, obs.temperature, 1)),
        }
    }

    buckets
        .into_iter()
        .take(MAX_DAYS)
        .map(|(date, sum, count)| DailyAggregate {
            date,
            mean_temperature: round_half_up(sum / count as f64),
        })
        .collect()
}

/// [`aggregate_daily`] in the local time zone of the running process.
pub fn aggregate_daily_local(observations: &[RawObservation]) -> Vec<DailyAggregate> {
    aggregate_daily(observations, &Local)
}

/// Rounds to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let rounded = value.round();
    // `round` sends negative halves away from zero
    if value - value.trunc() == -0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}
