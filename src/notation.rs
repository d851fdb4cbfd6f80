//! Workout notation decoder
//!
//! Coaches write plan entries in a compact notation such as
//! `{400m@(PACE+4'00~4'10)}x8`. The decoder turns that into display text by
//! running an ordered table of rewrite rules over the string. Each rule is a
//! regex paired with a parser producing a [`WorkoutToken`]; a rule's output
//! is the input of the next one. Text no rule recognizes is copied verbatim,
//! so decoding never fails.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NotationError;
use crate::locale::Locale;

/// Field values that mean the whole day is a rest day
const REST_LITERALS: [&str; 2] = ["休息", "rest"];

/// Training-intensity zone kinds found in `@(KIND+LO~HI)` annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Heart-rate reserve fraction, `HRR`
    HeartRateReserve,
    Vdot,
    /// Target pace, `M'SS` bounds
    Pace,
    /// Threshold, written `t/` or `t+`
    Threshold,
    /// Perceived effort, `EFFORT`
    Effort,
}

impl ZoneKind {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ZoneKind::HeartRateReserve, Locale::Zh) => "心率区间",
            (ZoneKind::Vdot, _) => "VDOT",
            (ZoneKind::Pace, Locale::Zh) => "配速",
            (ZoneKind::Threshold, Locale::Zh) => "阈值",
            (ZoneKind::Effort, Locale::Zh) => "尽力程度",
            (ZoneKind::HeartRateReserve, Locale::En) => "heart rate reserve",
            (ZoneKind::Pace, Locale::En) => "pace",
            (ZoneKind::Threshold, Locale::En) => "threshold",
            (ZoneKind::Effort, Locale::En) => "effort",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    Minutes,
    Kilometers,
    Meters,
    Seconds,
}

impl UnitKind {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "min" => Some(UnitKind::Minutes),
            "km" => Some(UnitKind::Kilometers),
            "m" => Some(UnitKind::Meters),
            "s" => Some(UnitKind::Seconds),
            _ => None,
        }
    }

    pub fn word(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (UnitKind::Minutes, Locale::Zh) => "分钟",
            (UnitKind::Kilometers, Locale::Zh) => "公里",
            (UnitKind::Meters, Locale::Zh) => "米",
            (UnitKind::Seconds, Locale::Zh) => "秒",
            (UnitKind::Minutes, Locale::En) => "minutes",
            (UnitKind::Kilometers, Locale::En) => "kilometers",
            (UnitKind::Meters, Locale::En) => "meters",
            (UnitKind::Seconds, Locale::En) => "seconds",
        }
    }
}

/// A decoded fragment of a notation string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutToken {
    RestDay,
    ZoneAnnotation { kind: ZoneKind, lo: String, hi: String },
    /// `@(rest)` inside a workout, e.g. jog recovery between reps
    RestMarker,
    UnitSuffix { kind: UnitKind, magnitude: String },
    IntervalGroup { body: String, repeats: u32 },
    Literal(String),
}

impl WorkoutToken {
    pub fn render(&self, locale: Locale) -> String {
        match self {
            WorkoutToken::RestDay => match locale {
                Locale::Zh => "休息日".to_string(),
                Locale::En => "rest day".to_string(),
            },
            WorkoutToken::ZoneAnnotation { kind, lo, hi } => {
                format!("({} {}-{})", kind.label(locale), lo, hi)
            }
            WorkoutToken::RestMarker => match locale {
                Locale::Zh => "(休息)".to_string(),
                Locale::En => "(rest)".to_string(),
            },
            WorkoutToken::UnitSuffix { kind, magnitude } => match locale {
                Locale::Zh => format!("{}{}", magnitude, kind.word(locale)),
                Locale::En => {
                    let word = kind.word(locale);
                    if magnitude.parse::<f64>().is_ok_and(|m| m == 1.0) {
                        format!("{} {}", magnitude, word.trim_end_matches('s'))
                    } else {
                        format!("{} {}", magnitude, word)
                    }
                }
            },
            WorkoutToken::IntervalGroup { body, repeats } => match locale {
                Locale::Zh => format!("【{}】×{}组", body, repeats),
                Locale::En => format!("【{}】×{} sets", body, repeats),
            },
            WorkoutToken::Literal(text) => text.clone(),
        }
    }
}

type Parser = fn(&Captures<'_>) -> Option<WorkoutToken>;

struct RuleSpec {
    name: &'static str,
    pattern: &'static str,
    parse: Parser,
}

// Zone patterns start with an optional `<digit><unit>` lead. The lead and its
// `@` are re-emitted so the unit rule still sees `20min@` after the zone
// annotation has been rewritten.
const RULES: &[RuleSpec] = &[
    RuleSpec {
        name: "hrr",
        pattern: r"(?P<lead>\d(?:min|km|m|s))?@\(HRR\+([\d.]+)~([\d.]+)\)",
        parse: |c| zone(ZoneKind::HeartRateReserve, c),
    },
    RuleSpec {
        name: "vdot",
        pattern: r"(?P<lead>\d(?:min|km|m|s))?@\(VDOT\+([\d.]+)~([\d.]+)\)",
        parse: |c| zone(ZoneKind::Vdot, c),
    },
    RuleSpec {
        name: "pace",
        pattern: r"(?P<lead>\d(?:min|km|m|s))?@\(PACE\+([\d']+)~([\d']+)\)",
        parse: |c| zone(ZoneKind::Pace, c),
    },
    RuleSpec {
        name: "threshold",
        pattern: r"(?P<lead>\d(?:min|km|m|s))?@\(t[/+]([\d.]+)~([\d.]+)\)",
        parse: |c| zone(ZoneKind::Threshold, c),
    },
    RuleSpec {
        name: "rest",
        pattern: r"(?P<lead>\d(?:min|km|m|s))?@\(rest\)",
        parse: |_| Some(WorkoutToken::RestMarker),
    },
    RuleSpec {
        name: "effort",
        pattern: r"(?P<lead>\d(?:min|km|m|s))?@\(EFFORT\+([\d.]+)~([\d.]+)\)",
        parse: |c| zone(ZoneKind::Effort, c),
    },
    RuleSpec {
        name: "unit",
        pattern: r"(\d+(?:\.\d+)?)(min|km|m|s)@",
        parse: |c| {
            Some(WorkoutToken::UnitSuffix {
                kind: UnitKind::from_suffix(c.get(2)?.as_str())?,
                magnitude: c.get(1)?.as_str().to_string(),
            })
        },
    },
    RuleSpec {
        name: "interval",
        pattern: r"\{([^}]+)\}x(\d+)",
        parse: |c| {
            Some(WorkoutToken::IntervalGroup {
                body: c.get(1)?.as_str().to_string(),
                repeats: c.get(2)?.as_str().parse().ok()?,
            })
        },
    },
];

fn zone(kind: ZoneKind, caps: &Captures<'_>) -> Option<WorkoutToken> {
    Some(WorkoutToken::ZoneAnnotation {
        kind,
        lo: caps.get(2)?.as_str().to_string(),
        hi: caps.get(3)?.as_str().to_string(),
    })
}

struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    parse: Parser,
}

impl RewriteRule {
    /// Split `text` into tokens: recognized matches plus verbatim gaps
    fn tokenize(&self, text: &str) -> Vec<WorkoutToken> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for caps in self.pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                tokens.push(WorkoutToken::Literal(text[last..whole.start()].to_string()));
            }

            match (self.parse)(&caps) {
                Some(token) => {
                    if let Some(lead) = caps.name("lead") {
                        tokens.push(WorkoutToken::Literal(format!("{}@", lead.as_str())));
                    }
                    tokens.push(token);
                }
                // Matched the shape but not the content: keep it as written
                None => tokens.push(WorkoutToken::Literal(whole.as_str().to_string())),
            }
            last = whole.end();
        }

        if last < text.len() {
            tokens.push(WorkoutToken::Literal(text[last..].to_string()));
        }

        tokens
    }
}

/// Compiled rule table for one output locale
pub struct NotationDecoder {
    locale: Locale,
    rules: Vec<RewriteRule>,
}

impl NotationDecoder {
    pub fn new(locale: Locale) -> Result<Self, NotationError> {
        let rules = RULES
            .iter()
            .map(|entry| {
                Regex::new(entry.pattern)
                    .map(|pattern| RewriteRule {
                        name: entry.name,
                        pattern,
                        parse: entry.parse,
                    })
                    .map_err(|source| NotationError::InvalidPattern {
                        rule: entry.name,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { locale, rules })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Decode a plan entry's `name` field into display text
    pub fn decode(&self, name: &str) -> String {
        if REST_LITERALS.contains(&name) {
            return WorkoutToken::RestDay.render(self.locale);
        }

        let mut text = name.to_string();
        for rule in &self.rules {
            let tokens = rule.tokenize(&text);
            if tokens.iter().all(|t| matches!(t, WorkoutToken::Literal(_))) {
                continue;
            }
            debug!(rule = rule.name, tokens = tokens.len(), "Rewrite rule applied");
            text = tokens.iter().map(|t| t.render(self.locale)).collect();
        }

        text
    }
}
