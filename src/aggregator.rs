//! Activity aggregation
//!
//! Filters raw activity records down to valid runs, buckets them by UTC
//! calendar day and derives whole-period statistics.

use chrono::{DateTime, NaiveDate};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::models::{ActivityRecord, DayAggregate, PeriodStatistics};

/// UTC calendar day of a unix timestamp, `None` when out of chrono's range
pub fn utc_day(sign_date: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(sign_date, 0).map(|dt| dt.date_naive())
}

/// Group valid runs into per-day buckets, keyed and ordered by date.
///
/// Invalid records and records with unrepresentable timestamps are skipped.
pub fn aggregate_by_day(records: &[ActivityRecord]) -> BTreeMap<NaiveDate, DayAggregate> {
    let mut days: BTreeMap<NaiveDate, DayAggregate> = BTreeMap::new();

    for record in records.iter().filter(|r| r.is_valid_run()) {
        let Some(date) = utc_day(record.sign_date) else {
            warn!(sign_date = record.sign_date, "Skipping run with out-of-range timestamp");
            continue;
        };

        days.entry(date)
            .or_insert_with(|| DayAggregate::new(date))
            .add(record);
    }

    days
}

/// Compute period statistics over the valid runs in `records`.
///
/// Returns [`AnalysisError::NoValidRuns`] when nothing survives filtering.
pub fn analyze(records: &[ActivityRecord]) -> Result<PeriodStatistics, AnalysisError> {
    let days = aggregate_by_day(records);

    let (Some(&start), Some(&end)) = (days.keys().next(), days.keys().next_back()) else {
        debug!(records = records.len(), "No valid runs after filtering");
        return Err(AnalysisError::NoValidRuns);
    };

    let mut total_km = 0.0;
    let mut total_time = 0i64;
    let mut total_runs = 0u32;
    let mut all_paces: Vec<i64> = Vec::new();

    for day in days.values() {
        total_km += day.km;
        total_time += day.time;
        total_runs += day.count;
        all_paces.extend_from_slice(&day.paces);
    }

    let avg_pace = all_paces.iter().map(|&p| p as f64).mean();

    let mut sorted = all_paces;
    sorted.sort_unstable();
    let fastest_pace = sorted[0];
    let slowest_pace = sorted[sorted.len() - 1];
    let median_pace = sorted[sorted.len() / 2];

    let total_days = ((end - start).num_days() + 1) as u32;
    let max_distance = records
        .iter()
        .filter(|r| r.is_valid_run() && utc_day(r.sign_date).is_some())
        .map(|r| r.run_km)
        .fold(f64::MIN, f64::max);

    let stats = PeriodStatistics {
        total_days,
        active_days: days.len() as u32,
        start,
        end,
        total_runs,
        total_km,
        total_time,
        avg_daily_km: total_km / total_days as f64,
        frequency: total_runs as f64 / total_days as f64,
        avg_pace,
        fastest_pace,
        slowest_pace,
        median_pace,
        avg_distance: total_km / total_runs as f64,
        max_distance,
    };

    debug!(
        runs = stats.total_runs,
        days = stats.total_days,
        start = %stats.start,
        end = %stats.end,
        "Aggregated activity period"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-01T08:00:00Z
    const DAY1: i64 = 1_709_280_000;
    const DAY: i64 = 86_400;

    fn run(km: f64, pace: i64, sign_date: i64) -> ActivityRecord {
        ActivityRecord::new(km, (km * pace as f64) as i64, pace, sign_date)
    }

    #[test]
    fn test_all_invalid_returns_sentinel() {
        let records = vec![
            ActivityRecord::new(0.4, 600, 400, DAY1),
            ActivityRecord::new(5.0, 30, 6, DAY1),
        ];
        assert_eq!(analyze(&records), Err(AnalysisError::NoValidRuns));
        assert_eq!(analyze(&[]), Err(AnalysisError::NoValidRuns));
    }

    #[test]
    fn test_avg_pace_is_unweighted_per_run() {
        let records = vec![
            run(5.0, 300, DAY1),
            run(1.0, 600, DAY1 + DAY),
            run(1.0, 600, DAY1 + DAY + 60),
            run(1.0, 600, DAY1 + DAY + 120),
        ];
        let stats = analyze(&records).unwrap();
        assert!((stats.avg_pace - 525.0).abs() < 1e-9);
        assert_eq!(stats.total_runs, 4);
    }

    #[test]
    fn test_median_is_upper_median() {
        let records = vec![
            run(2.0, 600, DAY1),
            run(2.0, 300, DAY1),
            run(2.0, 500, DAY1),
            run(2.0, 400, DAY1),
        ];
        let stats = analyze(&records).unwrap();
        assert_eq!(stats.median_pace, 500);
        assert_eq!(stats.fastest_pace, 300);
        assert_eq!(stats.slowest_pace, 600);
    }

    #[test]
    fn test_days_grouped_by_utc_date() {
        // 23:30 UTC and 00:30 UTC the next day fall into separate buckets
        let late = DAY1 + 15 * 3600 + 1800;
        let records = vec![run(3.0, 400, late), run(3.0, 400, late + 3600)];
        let days = aggregate_by_day(&records);
        assert_eq!(days.len(), 2);
        assert_eq!(
            days.keys().next().copied(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_period_span_counts_rest_days() {
        let records = vec![run(4.0, 360, DAY1), run(6.0, 360, DAY1 + 3 * DAY)];
        let stats = analyze(&records).unwrap();

        assert_eq!(stats.total_days, 4);
        assert_eq!(stats.active_days, 2);
        assert_eq!(stats.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(stats.end, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert!((stats.frequency - 0.5).abs() < 1e-9);
        assert!((stats.avg_daily_km - 2.5).abs() < 1e-9);
        assert!((stats.avg_distance - 5.0).abs() < 1e-9);
        assert!((stats.max_distance - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_records_do_not_touch_statistics() {
        let records = vec![
            run(3.0, 400, DAY1),
            ActivityRecord::new(42.0, 10, 1, DAY1 + 10 * DAY),
        ];
        let stats = analyze(&records).unwrap();
        assert_eq!(stats.total_days, 1);
        assert!((stats.max_distance - 3.0).abs() < 1e-9);
    }
}
