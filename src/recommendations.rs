//! Rule-based training advice
//!
//! Every rule is checked independently; several may fire for one period.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::models::PeriodStatistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// More than 1.5 runs per day
    KeepHighFrequency,
    /// Fewer than 0.5 runs per day
    IncreaseFrequency,
    /// Average run shorter than 3 km
    IncreaseDistance,
    /// Average pace slower than 9:00/km
    SlowPaceSuitsRecovery,
}

struct Rule {
    applies: fn(&PeriodStatistics) -> bool,
    advice: Recommendation,
}

const RULES: &[Rule] = &[
    Rule {
        applies: |s| s.frequency > 1.5,
        advice: Recommendation::KeepHighFrequency,
    },
    Rule {
        applies: |s| s.frequency < 0.5,
        advice: Recommendation::IncreaseFrequency,
    },
    Rule {
        applies: |s| s.avg_distance < 3.0,
        advice: Recommendation::IncreaseDistance,
    },
    Rule {
        applies: |s| s.avg_pace > 540.0,
        advice: Recommendation::SlowPaceSuitsRecovery,
    },
];

impl Recommendation {
    pub fn message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Recommendation::KeepHighFrequency, Locale::Zh) => "保持当前高频次，适合健康维持",
            (Recommendation::IncreaseFrequency, Locale::Zh) => "建议增加运动频率，每周至少3-4次",
            (Recommendation::IncreaseDistance, Locale::Zh) => "可以适当增加单次距离，提升耐力",
            (Recommendation::SlowPaceSuitsRecovery, Locale::Zh) => "当前配速偏慢，适合减脂和恢复",
            (Recommendation::KeepHighFrequency, Locale::En) => {
                "Keep up the current high frequency, it suits long-term health"
            }
            (Recommendation::IncreaseFrequency, Locale::En) => {
                "Run more often, at least 3-4 sessions per week"
            }
            (Recommendation::IncreaseDistance, Locale::En) => {
                "Gradually increase single-session distance to build endurance"
            }
            (Recommendation::SlowPaceSuitsRecovery, Locale::En) => {
                "Current pace is on the slow side, well suited to fat loss and recovery"
            }
        }
    }
}

/// Evaluate every rule in table order
pub fn recommend(stats: &PeriodStatistics) -> Vec<Recommendation> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(stats))
        .map(|rule| rule.advice)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stats(frequency: f64, avg_distance: f64, avg_pace: f64) -> PeriodStatistics {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        PeriodStatistics {
            total_days: 1,
            active_days: 1,
            start: day,
            end: day,
            total_runs: 1,
            total_km: avg_distance,
            total_time: 0,
            avg_daily_km: avg_distance,
            frequency,
            avg_pace,
            fastest_pace: avg_pace as i64,
            slowest_pace: avg_pace as i64,
            median_pace: avg_pace as i64,
            avg_distance,
            max_distance: avg_distance,
        }
    }

    #[test]
    fn test_no_rule_fires() {
        assert!(recommend(&stats(1.0, 5.0, 360.0)).is_empty());
    }

    #[test]
    fn test_rules_co_occur() {
        let advice = recommend(&stats(2.0, 1.5, 600.0));
        assert_eq!(
            advice,
            vec![
                Recommendation::KeepHighFrequency,
                Recommendation::IncreaseDistance,
                Recommendation::SlowPaceSuitsRecovery,
            ]
        );
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        assert!(recommend(&stats(1.5, 3.0, 540.0)).is_empty());
        assert!(recommend(&stats(0.5, 3.0, 540.0)).is_empty());
        assert_eq!(
            recommend(&stats(0.49, 3.0, 540.0)),
            vec![Recommendation::IncreaseFrequency]
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Recommendation::IncreaseFrequency.message(Locale::Zh),
            "建议增加运动频率，每周至少3-4次"
        );
        assert!(Recommendation::IncreaseDistance
            .message(Locale::En)
            .contains("distance"));
    }
}
