//! Integration tests for workout notation decoding and plan preview
//!
//! Covers the decoder through the public API, the way plan exports use it.

use paceplan::plan::{render_preview, summarize, PlanType};
use paceplan::{Locale, NotationDecoder, PlanPayload};
use proptest::prelude::*;

fn zh() -> NotationDecoder {
    NotationDecoder::new(Locale::Zh).unwrap()
}

#[test]
fn test_rest_literal_is_exact() {
    let decoder = zh();
    assert_eq!(decoder.decode("休息"), "休息日");
    // Not a whole-field match, so it is just text
    assert_eq!(decoder.decode("休息一下"), "休息一下");
}

#[test]
fn test_zone_rewritten_before_grouping() {
    let decoder = zh();
    assert_eq!(decoder.decode("20min@(HRR+0.6~0.7)"), "20分钟(心率区间 0.6-0.7)");
    assert_eq!(
        decoder.decode("{400m@(PACE+4'00~4'10)}x8"),
        "【400米(配速 4'00-4'10)】×8组"
    );
}

#[test]
fn test_unknown_zone_kind_passes_through() {
    assert_eq!(zh().decode("@(UNKNOWN+1~2)"), "@(UNKNOWN+1~2)");
    assert_eq!(
        NotationDecoder::new(Locale::En)
            .unwrap()
            .decode("@(UNKNOWN+1~2)"),
        "@(UNKNOWN+1~2)"
    );
}

#[test]
fn test_composite_workout() {
    let decoded = zh().decode("15min@(HRR+0.5~0.6)+{1km@(t/0.88~0.92)+200m@(rest)}x5+10min@(HRR+0.5~0.6)");
    assert_eq!(
        decoded,
        "15分钟(心率区间 0.5-0.6)+【1公里(阈值 0.88-0.92)+200米(休息)】×5组+10分钟(心率区间 0.5-0.6)"
    );
}

#[test]
fn test_english_rendering() {
    let decoder = NotationDecoder::new(Locale::En).unwrap();
    assert_eq!(decoder.decode("rest"), "rest day");
    assert_eq!(
        decoder.decode("{30s@(EFFORT+8~9)+90s@(rest)}x6"),
        "【30 seconds(effort 8-9)+90 seconds(rest)】×6 sets"
    );
}

#[test]
fn test_plan_export_preview() {
    let export = r#"{
        "fetchedAt": "2024-03-03T10:00:00Z",
        "period": {"start": "2024-03-04", "range": "42 days"},
        "total": 3,
        "plans": [
            {"start": "2024-03-04", "title": "轻松跑", "name": "40min@(HRR+0.6~0.7)", "type": "qingsong", "weight": "q3"},
            {"start": "2024-03-06", "title": "间歇", "name": "{400m@(PACE+4'00~4'10)}x8", "type": "i", "weight": "q1", "description": "充分热身"},
            {"start": "2024-03-11", "title": "休息", "name": "休息", "type": "xiuxi", "weight": "xuanxiu"}
        ]
    }"#;
    let entries = PlanPayload::parse(export).unwrap();

    let summary = summarize(&entries);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.by_type[0], (PlanType::Easy, 1));

    let text = render_preview(&entries, &zh()).unwrap();
    assert!(text.contains("第 1 周"));
    assert!(text.contains("第 2 周"));
    assert!(text.contains("40分钟(心率区间 0.6-0.7)"));
    assert!(text.contains("【400米(配速 4'00-4'10)】×8组"));
    assert!(text.contains("2024-03-11 周一"));
    assert!(text.contains("🔴 高强度: 1 次"));
}

fn notation_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,3}(min|km|m|s)@",
        "@\\((HRR|VDOT|EFFORT)\\+[0-9.]{1,4}~[0-9.]{1,4}\\)",
        "@\\(PACE\\+[0-9']{1,4}~[0-9']{1,4}\\)",
        Just("@(rest)".to_string()),
        Just("+".to_string()),
        "[a-z一-龥 ]{0,4}",
    ]
}

fn notation() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(notation_fragment(), 0..6),
        any::<bool>(),
        1u32..20,
    )
        .prop_map(|(parts, grouped, reps)| {
            let body = parts.concat();
            if grouped && !body.is_empty() {
                format!("{{{}}}x{}", body, reps)
            } else {
                body
            }
        })
}

proptest! {
    #[test]
    fn test_decoding_is_idempotent(raw in notation()) {
        let decoder = zh();
        let once = decoder.decode(&raw);
        prop_assert_eq!(decoder.decode(&once), once);
    }

    #[test]
    fn test_text_without_markers_is_unchanged(raw in "[a-zA-Z0-9 ,.一-龥]{0,30}") {
        prop_assume!(raw != "rest" && raw != "休息");
        prop_assert_eq!(zh().decode(&raw), raw);
    }
}
