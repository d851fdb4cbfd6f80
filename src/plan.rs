//! Training plan preview
//!
//! Renders a fetched plan list for review: entries grouped into weeks, each
//! entry's notation decoded, type and intensity codes turned into labels,
//! plus a per-type and per-intensity summary.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::warn;

use crate::error::PlanError;
use crate::locale::Locale;
use crate::notation::NotationDecoder;

/// Workout category code used by the plan platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlanType {
    Easy,
    Rest,
    Aerobic,
    LongSlowDistance,
    MarathonPace,
    Threshold,
    Interval,
    Repetition,
    Fartlek,
    Combination,
    Variable,
    Strength,
    MaxHeartRateTest,
    AerobicDriftTest,
    Other,
    /// Code this crate does not know; shown as written
    Unknown(String),
}

impl PlanType {
    pub fn code(&self) -> &str {
        match self {
            PlanType::Easy => "qingsong",
            PlanType::Rest => "xiuxi",
            PlanType::Aerobic => "e",
            PlanType::LongSlowDistance => "lsd",
            PlanType::MarathonPace => "m",
            PlanType::Threshold => "t",
            PlanType::Interval => "i",
            PlanType::Repetition => "r",
            PlanType::Fartlek => "ft",
            PlanType::Combination => "com",
            PlanType::Variable => "ch",
            PlanType::Strength => "jili",
            PlanType::MaxHeartRateTest => "max",
            PlanType::AerobicDriftTest => "drift",
            PlanType::Other => "other",
            PlanType::Unknown(code) => code,
        }
    }

    pub fn label(&self, locale: Locale) -> String {
        let label = match (self, locale) {
            (PlanType::Unknown(code), _) => return code.clone(),
            (PlanType::Easy, Locale::Zh) => "轻松跑",
            (PlanType::Rest, Locale::Zh) => "休息日",
            (PlanType::Aerobic, Locale::Zh) => "有氧训练",
            (PlanType::LongSlowDistance, Locale::Zh) => "长距离慢跑",
            (PlanType::MarathonPace, Locale::Zh) => "马拉松配速",
            (PlanType::Threshold, Locale::Zh) => "阈值训练",
            (PlanType::Interval, Locale::Zh) => "间歇训练",
            (PlanType::Repetition, Locale::Zh) => "速度训练",
            (PlanType::Fartlek, Locale::Zh) => "法特莱克",
            (PlanType::Combination, Locale::Zh) => "组合训练",
            (PlanType::Variable, Locale::Zh) => "变速训练",
            (PlanType::Strength, Locale::Zh) => "肌力训练",
            (PlanType::MaxHeartRateTest, Locale::Zh) => "最大心率测试",
            (PlanType::AerobicDriftTest, Locale::Zh) => "有氧稳定测试",
            (PlanType::Other, Locale::Zh) => "其他",
            (PlanType::Easy, Locale::En) => "easy run",
            (PlanType::Rest, Locale::En) => "rest day",
            (PlanType::Aerobic, Locale::En) => "aerobic",
            (PlanType::LongSlowDistance, Locale::En) => "long slow distance",
            (PlanType::MarathonPace, Locale::En) => "marathon pace",
            (PlanType::Threshold, Locale::En) => "threshold",
            (PlanType::Interval, Locale::En) => "intervals",
            (PlanType::Repetition, Locale::En) => "repetitions",
            (PlanType::Fartlek, Locale::En) => "fartlek",
            (PlanType::Combination, Locale::En) => "combination",
            (PlanType::Variable, Locale::En) => "variable pace",
            (PlanType::Strength, Locale::En) => "strength",
            (PlanType::MaxHeartRateTest, Locale::En) => "max heart rate test",
            (PlanType::AerobicDriftTest, Locale::En) => "aerobic drift test",
            (PlanType::Other, Locale::En) => "other",
        };
        label.to_string()
    }
}

impl From<String> for PlanType {
    fn from(code: String) -> Self {
        match code.as_str() {
            "qingsong" => PlanType::Easy,
            "xiuxi" => PlanType::Rest,
            "e" => PlanType::Aerobic,
            "lsd" => PlanType::LongSlowDistance,
            "m" => PlanType::MarathonPace,
            "t" => PlanType::Threshold,
            "i" => PlanType::Interval,
            "r" => PlanType::Repetition,
            "ft" => PlanType::Fartlek,
            "com" => PlanType::Combination,
            "ch" => PlanType::Variable,
            "jili" => PlanType::Strength,
            "max" => PlanType::MaxHeartRateTest,
            "drift" => PlanType::AerobicDriftTest,
            "other" => PlanType::Other,
            _ => PlanType::Unknown(code),
        }
    }
}

impl From<PlanType> for String {
    fn from(plan_type: PlanType) -> Self {
        plan_type.code().to_string()
    }
}

impl Default for PlanType {
    fn default() -> Self {
        PlanType::Unknown(String::new())
    }
}

/// Session intensity code (`weight` on the platform)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Intensity {
    High,
    Medium,
    Low,
    Optional,
    Unknown(String),
}

impl Intensity {
    pub fn code(&self) -> &str {
        match self {
            Intensity::High => "q1",
            Intensity::Medium => "q2",
            Intensity::Low => "q3",
            Intensity::Optional => "xuanxiu",
            Intensity::Unknown(code) => code,
        }
    }

    pub fn label(&self, locale: Locale) -> String {
        let label = match (self, locale) {
            (Intensity::Unknown(code), _) => return code.clone(),
            (Intensity::High, Locale::Zh) => "🔴 高强度",
            (Intensity::Medium, Locale::Zh) => "🟠 中强度",
            (Intensity::Low, Locale::Zh) => "🟢 低强度",
            (Intensity::Optional, Locale::Zh) => "🔵 恢复/选修",
            (Intensity::High, Locale::En) => "🔴 high",
            (Intensity::Medium, Locale::En) => "🟠 medium",
            (Intensity::Low, Locale::En) => "🟢 low",
            (Intensity::Optional, Locale::En) => "🔵 recovery/optional",
        };
        label.to_string()
    }
}

impl From<String> for Intensity {
    fn from(code: String) -> Self {
        match code.as_str() {
            "q1" => Intensity::High,
            "q2" => Intensity::Medium,
            "q3" => Intensity::Low,
            "xuanxiu" => Intensity::Optional,
            _ => Intensity::Unknown(code),
        }
    }
}

impl From<Intensity> for String {
    fn from(intensity: Intensity) -> Self {
        intensity.code().to_string()
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity::Unknown(String::new())
    }
}

/// One scheduled session as returned by the plan export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Session date, `YYYY-MM-DD` optionally followed by a time
    pub start: String,

    #[serde(default)]
    pub title: String,

    /// Compact workout notation
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "type")]
    pub plan_type: PlanType,

    #[serde(default)]
    pub weight: Intensity,

    #[serde(default)]
    pub description: Option<String>,
}

impl PlanEntry {
    pub fn date(&self) -> Result<NaiveDate, PlanError> {
        self.start
            .get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
            .ok_or_else(|| PlanError::InvalidDate {
                value: self.start.clone(),
            })
    }
}

/// Plan export payload: `{"plans": [...]}` or a bare list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlanPayload {
    Wrapped { plans: Vec<PlanEntry> },
    Bare(Vec<PlanEntry>),
}

impl PlanPayload {
    /// Parse a plan export in either shape
    pub fn parse(input: &str) -> crate::Result<Vec<PlanEntry>> {
        Ok(serde_json::from_str::<Self>(input)?.into_entries())
    }

    pub fn into_entries(self) -> Vec<PlanEntry> {
        match self {
            PlanPayload::Wrapped { plans } => plans,
            PlanPayload::Bare(plans) => plans,
        }
    }
}

pub fn weekday_label(date: NaiveDate, locale: Locale) -> &'static str {
    const ZH: [&str; 7] = ["周日", "周一", "周二", "周三", "周四", "周五", "周六"];
    const EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    let idx = date.weekday().num_days_from_sunday() as usize;
    match locale {
        Locale::Zh => ZH[idx],
        Locale::En => EN[idx],
    }
}

/// A dated entry inside a week
#[derive(Debug, Clone, PartialEq)]
pub struct DatedEntry<'a> {
    pub date: NaiveDate,
    pub entry: &'a PlanEntry,
}

/// Group entries into 7-day weeks counted from the first dated entry.
///
/// Week numbers start at 1; entries dated before the anchor land in week 0 or
/// below. Entries with unreadable dates are left out.
pub fn group_by_week(entries: &[PlanEntry]) -> BTreeMap<i64, Vec<DatedEntry<'_>>> {
    let mut weeks: BTreeMap<i64, Vec<DatedEntry<'_>>> = BTreeMap::new();
    let mut anchor: Option<NaiveDate> = None;

    for entry in entries {
        let date = match entry.date() {
            Ok(date) => date,
            Err(e) => {
                warn!(title = %entry.title, "Skipping plan entry: {}", e);
                continue;
            }
        };
        let first = *anchor.get_or_insert(date);
        let week = (date - first).num_days().div_euclid(7) + 1;
        weeks.entry(week).or_default().push(DatedEntry { date, entry });
    }

    weeks
}

/// Entry counts by type and by intensity, in order of first appearance
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanSummary {
    pub total: usize,
    pub by_type: Vec<(PlanType, usize)>,
    pub by_intensity: Vec<(Intensity, usize)>,
}

fn bump<K: PartialEq + Clone>(counts: &mut Vec<(K, usize)>, key: &K) {
    match counts.iter_mut().find(|(k, _)| k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key.clone(), 1)),
    }
}

pub fn summarize(entries: &[PlanEntry]) -> PlanSummary {
    let mut summary = PlanSummary {
        total: entries.len(),
        ..PlanSummary::default()
    };
    for entry in entries {
        bump(&mut summary.by_type, &entry.plan_type);
        bump(&mut summary.by_intensity, &entry.weight);
    }
    summary
}

struct Headings {
    title: &'static str,
    week: (&'static str, &'static str),
    plan_type: &'static str,
    intensity: &'static str,
    summary: &'static str,
    total: (&'static str, &'static str),
    by_type: &'static str,
    by_intensity: &'static str,
    times: &'static str,
}

fn headings(locale: Locale) -> Headings {
    match locale {
        Locale::Zh => Headings {
            title: "训练计划预览",
            week: ("第 ", " 周"),
            plan_type: "类型",
            intensity: "强度",
            summary: "计划摘要",
            total: ("总训练日: ", " 天"),
            by_type: "按类型:",
            by_intensity: "按强度:",
            times: " 次",
        },
        Locale::En => Headings {
            title: "Training plan preview",
            week: ("Week ", ""),
            plan_type: "Type",
            intensity: "Intensity",
            summary: "Plan summary",
            total: ("Total sessions: ", ""),
            by_type: "By type:",
            by_intensity: "By intensity:",
            times: "",
        },
    }
}

/// Render the full preview text for a plan list
pub fn render_preview(
    entries: &[PlanEntry],
    decoder: &NotationDecoder,
) -> Result<String, std::fmt::Error> {
    let locale = decoder.locale();
    let h = headings(locale);
    let rule = "=".repeat(60);
    let mut out = String::new();

    writeln!(out, "{rule}\n{}\n{rule}", h.title)?;

    for (week, dated) in group_by_week(entries) {
        writeln!(out, "\n{}{}{}\n{}", h.week.0, week, h.week.1, "-".repeat(60))?;
        for (idx, DatedEntry { date, entry }) in dated.iter().enumerate() {
            writeln!(
                out,
                "\n{}. {} {}",
                idx + 1,
                date.format("%Y-%m-%d"),
                weekday_label(*date, locale)
            )?;
            writeln!(out, "   {}", entry.title)?;
            writeln!(out, "   {}", decoder.decode(&entry.name))?;
            writeln!(out, "   {}: {}", h.plan_type, entry.plan_type.label(locale))?;
            writeln!(out, "   {}: {}", h.intensity, entry.weight.label(locale))?;
            if let Some(description) = entry.description.as_deref().filter(|d| !d.is_empty()) {
                writeln!(out, "   {}", description)?;
            }
        }
    }

    let summary = summarize(entries);
    writeln!(out, "\n{rule}\n{}\n{rule}", h.summary)?;
    writeln!(out, "{}{}{}", h.total.0, summary.total, h.total.1)?;
    writeln!(out, "\n{}", h.by_type)?;
    for (plan_type, count) in &summary.by_type {
        writeln!(out, "  {}: {}{}", plan_type.label(locale), count, h.times)?;
    }
    writeln!(out, "\n{}", h.by_intensity)?;
    for (intensity, count) in &summary.by_intensity {
        writeln!(out, "  {}: {}{}", intensity.label(locale), count, h.times)?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: &str, name: &str, plan_type: &str, weight: &str) -> PlanEntry {
        PlanEntry {
            start: start.to_string(),
            title: format!("session {}", start),
            name: name.to_string(),
            plan_type: PlanType::from(plan_type.to_string()),
            weight: Intensity::from(weight.to_string()),
            description: None,
        }
    }

    #[test]
    fn test_codes_round_trip_through_serde() {
        let json = r#"{"start": "2024-03-04", "title": "间歇", "name": "{400m@(PACE+4'00~4'10)}x8", "type": "i", "weight": "q1"}"#;
        let parsed: PlanEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.plan_type, PlanType::Interval);
        assert_eq!(parsed.weight, Intensity::High);

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["type"], "i");
        assert_eq!(value["weight"], "q1");
    }

    #[test]
    fn test_unknown_codes_pass_through() {
        let t = PlanType::from("yoga".to_string());
        assert_eq!(t.label(Locale::Zh), "yoga");
        assert_eq!(Intensity::from("q9".to_string()).label(Locale::Zh), "q9");
        assert_eq!(PlanType::Strength.label(Locale::Zh), "肌力训练");
    }

    #[test]
    fn test_weekday_label() {
        // 2024-03-03 was a Sunday
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert_eq!(weekday_label(sunday, Locale::Zh), "周日");
        assert_eq!(weekday_label(sunday.succ_opt().unwrap(), Locale::En), "Mon");
    }

    #[test]
    fn test_group_by_week() {
        let entries = vec![
            entry("2024-03-04", "休息", "xiuxi", "xuanxiu"),
            entry("2024-03-10 00:00:00", "5km@", "qingsong", "q3"),
            entry("2024-03-11", "5km@", "qingsong", "q3"),
            entry("not a date", "5km@", "qingsong", "q3"),
            entry("2024-03-25", "5km@", "lsd", "q2"),
        ];
        let weeks = group_by_week(&entries);

        assert_eq!(weeks.keys().copied().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(weeks[&1].len(), 2);
        assert_eq!(weeks[&2][0].date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    }

    #[test]
    fn test_invalid_date() {
        let bad = entry("03/04/2024", "", "e", "q3");
        assert_eq!(
            bad.date(),
            Err(PlanError::InvalidDate {
                value: "03/04/2024".to_string()
            })
        );
    }

    #[test]
    fn test_parse_plan_export() {
        let entries =
            PlanPayload::parse(r#"[{"start": "2024-03-04", "title": "轻松跑", "name": "5km@", "type": "qingsong", "weight": "q3"}]"#)
                .unwrap();
        assert_eq!(entries[0].plan_type, PlanType::Easy);

        let err = PlanPayload::parse(r#"{"plans": "none"}"#).unwrap_err();
        assert!(matches!(err, crate::PacePlanError::Json(_)));
    }

    #[test]
    fn test_render_preview_english() {
        let decoder = NotationDecoder::new(Locale::En).unwrap();
        let entries = vec![entry("2024-03-04", "1km@", "qingsong", "q3")];

        let text = render_preview(&entries, &decoder).unwrap();
        assert!(text.contains("Week 1"));
        assert!(text.contains("2024-03-04 Mon"));
        assert!(text.contains("1 kilometer\n"));
        assert!(text.contains("Total sessions: 1"));
    }

    #[test]
    fn test_summary_keeps_first_appearance_order() {
        let entries = vec![
            entry("2024-03-04", "", "t", "q1"),
            entry("2024-03-05", "", "qingsong", "q3"),
            entry("2024-03-06", "", "t", "q1"),
        ];
        let summary = summarize(&entries);

        assert_eq!(summary.total, 3);
        assert_eq!(
            summary.by_type,
            vec![(PlanType::Threshold, 2), (PlanType::Easy, 1)]
        );
        assert_eq!(
            summary.by_intensity,
            vec![(Intensity::High, 2), (Intensity::Low, 1)]
        );
    }

    #[test]
    fn test_render_preview() {
        let decoder = NotationDecoder::new(Locale::Zh).unwrap();
        let mut entries = vec![
            entry("2024-03-04", "{400m@(PACE+4'00~4'10)}x8", "i", "q1"),
            entry("2024-03-05", "休息", "xiuxi", "xuanxiu"),
        ];
        entries[0].description = Some("注意热身".to_string());

        let text = render_preview(&entries, &decoder).unwrap();

        assert!(text.contains("训练计划预览"));
        assert!(text.contains("第 1 周"));
        assert!(text.contains("2024-03-04 周一"));
        assert!(text.contains("【400米(配速 4'00-4'10)】×8组"));
        assert!(text.contains("休息日"));
        assert!(text.contains("注意热身"));
        assert!(text.contains("间歇训练: 1 次"));
        assert!(text.contains("总训练日: 2 天"));
    }
}
