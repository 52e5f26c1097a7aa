//! Property tests for breakpoint resolution and merging.

use proptest::prelude::*;
use responsive_stylesheet::{
    deep_merge, get_responsive_style, get_server_responsive_style, parse_style_values,
    Breakpoints, ColorScheme, ColorVars, ParseContext, Platform, StyleSink,
};
use serde_json::{json, Map, Value};

const NAMES: [&str; 5] = ["xs", "sm", "md", "lg", "xl"];

fn breakpoints(thresholds: &[u32]) -> Breakpoints {
    let mut bp = Breakpoints::new().add("xs", 0);
    for (name, t) in NAMES[1..].iter().zip(thresholds) {
        bp = bp.add(*name, *t);
    }
    bp
}

fn parse(style: &Value, bp: &Breakpoints, platform: Platform) -> responsive_stylesheet::ParsedStyle {
    let color_vars = ColorVars::new();
    let ctx = ParseContext {
        breakpoints: bp,
        color_vars: &color_vars,
        scheme: ColorScheme::Light,
        platform,
        mounted: false,
    };
    parse_style_values(style.as_object().unwrap(), &ctx)
}

/// Value of the largest threshold not above `width`, if any.
fn expected_at(bp: &Breakpoints, values: &[(usize, i64)], width: u32) -> Option<i64> {
    values
        .iter()
        .filter_map(|(i, v)| bp.threshold(NAMES[*i]).map(|t| (t, *v)))
        .filter(|(t, _)| *t <= width)
        .max_by_key(|(t, _)| *t)
        .map(|(_, v)| v)
}

fn responsive(values: &[(usize, i64)]) -> Value {
    let map: Map<String, Value> = values
        .iter()
        .map(|(i, v)| (NAMES[*i].to_string(), json!(v)))
        .collect();
    json!({ "zIndex": map })
}

proptest! {
    #[test]
    fn literal_styles_ignore_width(
        padding in 1i64..100,
        color in "[a-z]{3,8}",
        width in 0u32..3000,
    ) {
        let bp = breakpoints(&[300, 600, 900, 1200]);
        let style = json!({ "padding": padding, "color": color });
        let parsed = parse(&style, &bp, Platform::Ios);
        let resolved = get_responsive_style(&parsed, &bp, width as f64);
        prop_assert_eq!(Value::Object(resolved), style);
    }

    #[test]
    fn largest_satisfied_breakpoint_wins(
        mut thresholds in prop::collection::vec(1u32..2000, 4),
        values in prop::collection::btree_map(0usize..5, 1i64..1000, 1..5),
        width in 0u32..2500,
    ) {
        thresholds.sort_unstable();
        thresholds.dedup();
        let bp = breakpoints(&thresholds);
        let values: Vec<(usize, i64)> = values
            .into_iter()
            .filter(|(i, _)| bp.contains(NAMES[*i]))
            .collect();
        let parsed = parse(&responsive(&values), &bp, Platform::Ios);

        let resolved = get_responsive_style(&parsed, &bp, width as f64);
        prop_assert_eq!(resolved.get("zIndex").and_then(Value::as_i64), expected_at(&bp, &values, width));
    }

    #[test]
    fn generated_rules_match_client_merge(
        values in prop::collection::btree_map(0usize..5, 1i64..1000, 1..5),
        width in 0u32..1500,
    ) {
        let bp = breakpoints(&[300, 600, 900, 1200]);
        let values: Vec<(usize, i64)> = values.into_iter().collect();
        let parsed = parse(&responsive(&values), &bp, Platform::Web);
        let sink = StyleSink::new();
        get_server_responsive_style(&parsed, "c", &bp, &sink);

        // Emulate the cascade: the last applicable rule wins.
        let mut applied = None;
        for rule in sink.rules() {
            let min_width = rule
                .strip_prefix("@media (min-width: ")
                .and_then(|rest| rest.split("px").next())
                .map(|n| n.parse::<u32>().unwrap())
                .unwrap_or(0);
            if min_width <= width {
                let value = rule.split("z-index: ").nth(1).unwrap();
                applied = Some(value.split(' ').next().unwrap().parse::<i64>().unwrap());
            }
        }

        let client = get_responsive_style(&parsed, &bp, width as f64);
        prop_assert_eq!(applied, client.get("zIndex").and_then(Value::as_i64));
    }

    #[test]
    fn deep_merge_with_self_is_identity(
        entries in prop::collection::btree_map("[a-z]{1,4}", 0i64..50, 0..6),
        nested in prop::collection::btree_map("[a-z]{1,4}", "[a-z]{1,6}", 0..4),
    ) {
        let mut value = json!(entries);
        value["nested"] = json!(nested);
        prop_assert_eq!(deep_merge(value.clone(), value.clone()), value);
    }

    #[test]
    fn resolution_is_stable_across_calls(
        values in prop::collection::btree_map(0usize..5, 1i64..1000, 1..5),
        width in 0u32..1500,
    ) {
        let bp = breakpoints(&[300, 600, 900, 1200]);
        let values: Vec<(usize, i64)> = values.into_iter().collect();
        let parsed = parse(&responsive(&values), &bp, Platform::Android);
        let first = get_responsive_style(&parsed, &bp, width as f64);
        let second = get_responsive_style(&parsed, &bp, width as f64);
        prop_assert_eq!(first, second);
    }
}
