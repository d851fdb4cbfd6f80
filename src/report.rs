//! Analysis report envelope
//!
//! Combines aggregation, classification and recommendations into the JSON
//! document consumed by the presentation layer, with figures rounded and
//! paces/durations formatted for display.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use crate::aggregator;
use crate::classifier::classify;
use crate::error::AnalysisError;
use crate::format::{format_duration, format_pace, round_to};
use crate::locale::Locale;
use crate::models::{ActivityRecord, PeriodStatistics};
use crate::recommendations::recommend;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSection {
    pub days: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySection {
    pub total_runs: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_km: Decimal,
    /// `H:MM:SS` or `M:SS`
    pub total_time: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_daily_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub frequency: Decimal,
}

/// Paces formatted as `M'SS"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceSection {
    pub avg: String,
    pub fastest: String,
    pub slowest: String,
    pub median: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceSection {
    #[serde(with = "rust_decimal::serde::float")]
    pub avg: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub period: PeriodSection,
    pub summary: SummarySection,
    pub pace: PaceSection,
    pub distance: DistanceSection,
    /// Frequency, distance and pace labels joined with `、`
    pub characteristics: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// Either a full report or the `{"error": ...}` sentinel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Report(Box<AnalysisReport>),
    Error(ErrorEnvelope),
}

impl AnalysisOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisOutcome::Error(_))
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisOutcome::Report(report) => Some(report),
            AnalysisOutcome::Error(_) => None,
        }
    }
}

impl From<AnalysisError> for AnalysisOutcome {
    fn from(err: AnalysisError) -> Self {
        AnalysisOutcome::Error(ErrorEnvelope {
            error: err.to_string(),
        })
    }
}

impl AnalysisReport {
    pub fn from_statistics(stats: &PeriodStatistics, locale: Locale) -> Self {
        let characteristics = classify(stats);
        let recommendations = recommend(stats)
            .iter()
            .map(|r| r.message(locale).to_string())
            .collect();

        Self {
            period: PeriodSection {
                days: stats.total_days,
                start: stats.start,
                end: stats.end,
            },
            summary: SummarySection {
                total_runs: stats.total_runs,
                total_km: round_to(stats.total_km, 2),
                total_time: format_duration(stats.total_time),
                avg_daily_km: round_to(stats.avg_daily_km, 2),
                frequency: round_to(stats.frequency, 1),
            },
            pace: PaceSection {
                avg: format_pace(stats.avg_pace),
                fastest: format_pace(stats.fastest_pace as f64),
                slowest: format_pace(stats.slowest_pace as f64),
                median: format_pace(stats.median_pace as f64),
            },
            distance: DistanceSection {
                avg: round_to(stats.avg_distance, 2),
                max: round_to(stats.max_distance, 2),
            },
            characteristics: characteristics.joined(locale),
            recommendations,
        }
    }
}

/// Run the whole pipeline over raw activity records
pub fn analyze_activities(records: &[ActivityRecord], locale: Locale) -> AnalysisOutcome {
    match aggregator::analyze(records) {
        Ok(stats) => {
            let report = AnalysisReport::from_statistics(&stats, locale);
            info!(
                runs = report.summary.total_runs,
                days = report.period.days,
                characteristics = %report.characteristics,
                "Analysis complete"
            );
            AnalysisOutcome::Report(Box::new(report))
        }
        Err(err) => err.into(),
    }
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Render a report as a two-column terminal table
pub fn render_table(report: &AnalysisReport) -> String {
    let row = |metric, value: String| ReportRow { metric, value };
    let mut rows = vec![
        row(
            "Period",
            format!(
                "{} to {} ({} days)",
                report.period.start, report.period.end, report.period.days
            ),
        ),
        row("Total runs", report.summary.total_runs.to_string()),
        row("Total distance (km)", report.summary.total_km.to_string()),
        row("Total time", report.summary.total_time.clone()),
        row("Daily distance (km)", report.summary.avg_daily_km.to_string()),
        row("Runs per day", report.summary.frequency.to_string()),
        row("Average pace", report.pace.avg.clone()),
        row("Fastest pace", report.pace.fastest.clone()),
        row("Slowest pace", report.pace.slowest.clone()),
        row("Median pace", report.pace.median.clone()),
        row("Average distance (km)", report.distance.avg.to_string()),
        row("Longest run (km)", report.distance.max.to_string()),
        row("Characteristics", report.characteristics.clone()),
    ];
    for advice in &report.recommendations {
        rows.push(row("Advice", advice.clone()));
    }

    Table::new(rows).with(Style::rounded()).to_string()
}
