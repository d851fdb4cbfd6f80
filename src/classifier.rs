//! Qualitative training classification
//!
//! Three independent axes (frequency, distance, pace), each bucketed by
//! strict thresholds over [`PeriodStatistics`].

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::models::PeriodStatistics;

/// Separator between characteristic labels in the report
pub const LABEL_SEPARATOR: &str = "、";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrequencyBucket {
    High,
    Moderate,
    Low,
}

impl FrequencyBucket {
    /// Above 1.3 runs per day is high, below 0.7 is low
    pub fn from_frequency(frequency: f64) -> Self {
        if frequency > 1.3 {
            FrequencyBucket::High
        } else if frequency < 0.7 {
            FrequencyBucket::Low
        } else {
            FrequencyBucket::Moderate
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (FrequencyBucket::High, Locale::Zh) => "高频次",
            (FrequencyBucket::Moderate, Locale::Zh) => "中等频次",
            (FrequencyBucket::Low, Locale::Zh) => "低频次",
            (FrequencyBucket::High, Locale::En) => "high-frequency",
            (FrequencyBucket::Moderate, Locale::En) => "moderate-frequency",
            (FrequencyBucket::Low, Locale::En) => "low-frequency",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceBucket {
    Short,
    Moderate,
    Long,
}

impl DistanceBucket {
    /// Under 2.5 km per run is short, over 5 km is long
    pub fn from_avg_distance(avg_km: f64) -> Self {
        if avg_km < 2.5 {
            DistanceBucket::Short
        } else if avg_km > 5.0 {
            DistanceBucket::Long
        } else {
            DistanceBucket::Moderate
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (DistanceBucket::Short, Locale::Zh) => "短距离",
            (DistanceBucket::Moderate, Locale::Zh) => "中等距离",
            (DistanceBucket::Long, Locale::Zh) => "长距离",
            (DistanceBucket::Short, Locale::En) => "short-distance",
            (DistanceBucket::Moderate, Locale::En) => "moderate-distance",
            (DistanceBucket::Long, Locale::En) => "long-distance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaceBucket {
    RecoveryAerobic,
    AerobicBase,
    Tempo,
    SpeedWork,
}

impl PaceBucket {
    /// Slower than 10:00/km is recovery, 7:00 aerobic base, 5:30 tempo
    pub fn from_avg_pace(avg_pace: f64) -> Self {
        if avg_pace > 600.0 {
            PaceBucket::RecoveryAerobic
        } else if avg_pace > 420.0 {
            PaceBucket::AerobicBase
        } else if avg_pace > 330.0 {
            PaceBucket::Tempo
        } else {
            PaceBucket::SpeedWork
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (PaceBucket::RecoveryAerobic, Locale::Zh) => "恢复性有氧",
            (PaceBucket::AerobicBase, Locale::Zh) => "有氧基础",
            (PaceBucket::Tempo, Locale::Zh) => "tempo 节奏",
            (PaceBucket::SpeedWork, Locale::Zh) => "速度训练",
            (PaceBucket::RecoveryAerobic, Locale::En) => "recovery aerobic",
            (PaceBucket::AerobicBase, Locale::En) => "aerobic base",
            (PaceBucket::Tempo, Locale::En) => "tempo",
            (PaceBucket::SpeedWork, Locale::En) => "speed work",
        }
    }
}

/// One bucket per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristics {
    pub frequency: FrequencyBucket,
    pub distance: DistanceBucket,
    pub pace: PaceBucket,
}

impl Characteristics {
    /// Labels in display order: frequency, distance, pace
    pub fn labels(&self, locale: Locale) -> [&'static str; 3] {
        [
            self.frequency.label(locale),
            self.distance.label(locale),
            self.pace.label(locale),
        ]
    }

    pub fn joined(&self, locale: Locale) -> String {
        self.labels(locale).join(LABEL_SEPARATOR)
    }
}

pub fn classify(stats: &PeriodStatistics) -> Characteristics {
    Characteristics {
        frequency: FrequencyBucket::from_frequency(stats.frequency),
        distance: DistanceBucket::from_avg_distance(stats.avg_distance),
        pace: PaceBucket::from_avg_pace(stats.avg_pace),
    }
}
