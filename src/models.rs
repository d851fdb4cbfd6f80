use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum distance (exclusive) for a record to count as a run
pub const MIN_RUN_KM: f64 = 0.5;

/// Minimum duration in seconds (exclusive) for a record to count as a run
pub const MIN_RUN_SECONDS: i64 = 60;

/// A single activity as delivered by the activity log export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Distance covered in kilometers
    #[serde(default)]
    pub run_km: f64,

    /// Moving time in seconds
    #[serde(default)]
    pub run_time: i64,

    /// Average pace in seconds per kilometer
    #[serde(default)]
    pub run_pace: i64,

    /// Start of the activity as unix epoch seconds
    #[serde(default)]
    pub sign_date: i64,
}

impl ActivityRecord {
    pub fn new(run_km: f64, run_time: i64, run_pace: i64, sign_date: i64) -> Self {
        Self {
            run_km,
            run_time,
            run_pace,
            sign_date,
        }
    }

    /// A record is a valid run when it is longer than 0.5 km and lasted more than a minute.
    pub fn is_valid_run(&self) -> bool {
        self.run_km > MIN_RUN_KM && self.run_time > MIN_RUN_SECONDS
    }
}

/// Activity export payload: either a bare list or wrapped in `{"activities": [...]}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ActivityPayload {
    Wrapped { activities: Vec<ActivityRecord> },
    Bare(Vec<ActivityRecord>),
}

impl ActivityPayload {
    /// Parse an activity export in either shape
    pub fn parse(input: &str) -> crate::Result<Vec<ActivityRecord>> {
        Ok(serde_json::from_str::<Self>(input)?.into_records())
    }

    pub fn into_records(self) -> Vec<ActivityRecord> {
        match self {
            ActivityPayload::Wrapped { activities } => activities,
            ActivityPayload::Bare(records) => records,
        }
    }
}

/// Totals for a single UTC calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayAggregate {
    /// Calendar day these totals belong to
    pub date: NaiveDate,

    /// Sum of distances in kilometers
    pub km: f64,

    /// Sum of moving time in seconds
    pub time: i64,

    /// Number of valid runs on this day
    pub count: u32,

    /// Pace of every run in the order the runs were seen
    pub paces: Vec<i64>,
}

impl DayAggregate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            km: 0.0,
            time: 0,
            count: 0,
            paces: Vec::new(),
        }
    }

    pub fn add(&mut self, record: &ActivityRecord) {
        self.km += record.run_km;
        self.time += record.run_time;
        self.count += 1;
        self.paces.push(record.run_pace);
    }
}

/// Whole-period statistics derived from the valid runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStatistics {
    /// Calendar days from `start` to `end` inclusive, rest days included
    pub total_days: u32,

    /// Days with at least one valid run
    pub active_days: u32,

    pub start: NaiveDate,
    pub end: NaiveDate,

    pub total_runs: u32,
    pub total_km: f64,

    /// Total moving time in seconds
    pub total_time: i64,

    pub avg_daily_km: f64,

    /// Runs per calendar day
    pub frequency: f64,

    /// Unweighted mean of every run's pace, seconds per km
    pub avg_pace: f64,
    pub fastest_pace: i64,
    pub slowest_pace: i64,

    /// Upper median of all paces
    pub median_pace: i64,

    pub avg_distance: f64,
    pub max_distance: f64,
}
