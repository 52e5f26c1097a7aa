//! Splitting a style into default values and per-breakpoint overrides.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::value::StyleValues;
use crate::breakpoints::Breakpoints;
use crate::merge::{deep_merge, merge_maps};
use crate::platform::Platform;
use crate::theme::{ColorScheme, ColorVars};
use crate::util::is_falsy;

/// Composite properties whose sub-keys may each be responsive.
pub const NESTED_KEYS: &[&str] = &["shadowOffset", "textShadowOffset"];

/// The transform list property; each entry may be responsive.
pub const TRANSFORM_KEY: &str = "transform";

/// Inputs the parser reads besides the style itself.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    pub breakpoints: &'a Breakpoints,
    pub color_vars: &'a ColorVars,
    pub scheme: ColorScheme,
    pub platform: Platform,
    pub mounted: bool,
}

impl ParseContext<'_> {
    /// Resolves `var(--NAME)` strings once styles resolve on the client.
    ///
    /// Before that, on the markup surface, references pass through so the
    /// generated rules can use the custom properties.
    fn leaf(&self, value: &Value) -> Value {
        if let Value::String(s) = value {
            if self.platform.resolves_on_client(self.mounted) {
                if let Some(resolved) = self.color_vars.resolve(s, self.scheme) {
                    return resolved;
                }
            }
        }
        value.clone()
    }
}

/// A style split by breakpoint.
///
/// `initial` holds breakpoint-independent values (including those keyed by
/// the zero-width default breakpoint). `queries` maps each other breakpoint
/// to just the properties it overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStyle {
    pub initial: StyleValues,
    pub queries: IndexMap<String, StyleValues>,
}

impl ParsedStyle {
    fn query_mut(&mut self, breakpoint: &str) -> &mut StyleValues {
        self.queries.entry(breakpoint.to_string()).or_default()
    }
}

/// Parses one style-values object.
///
/// Per property:
///
/// 1. Falsy values are skipped.
/// 2. Literals, arrays and opaque platform colors go to `initial`.
/// 3. `shadowOffset`/`textShadowOffset` objects are parsed recursively and
///    folded back under their key.
/// 4. `transform` lists are parsed entry by entry; a breakpoint that
///    overrides any entry receives the whole list with its overrides applied.
/// 5. Other objects are breakpoint mappings. Names missing from the
///    breakpoint table are ignored; the zero-width breakpoint folds into
///    `initial`.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::{parse_style_values, Breakpoints, ColorScheme, ColorVars, ParseContext, Platform};
/// use serde_json::json;
///
/// let breakpoints = Breakpoints::new().add("xs", 0).add("md", 500);
/// let color_vars = ColorVars::new();
/// let ctx = ParseContext {
///     breakpoints: &breakpoints,
///     color_vars: &color_vars,
///     scheme: ColorScheme::Light,
///     platform: Platform::Ios,
///     mounted: true,
/// };
///
/// let style = json!({ "padding": 4, "color": { "xs": "red", "md": "blue", "huge": "green" } });
/// let parsed = parse_style_values(style.as_object().unwrap(), &ctx);
///
/// assert_eq!(serde_json::Value::Object(parsed.initial), json!({ "padding": 4, "color": "red" }));
/// assert_eq!(serde_json::Value::Object(parsed.queries["md"].clone()), json!({ "color": "blue" }));
/// assert!(!parsed.queries.contains_key("huge"));
/// ```
pub fn parse_style_values(style: &StyleValues, ctx: &ParseContext<'_>) -> ParsedStyle {
    let mut parsed = ParsedStyle::default();

    for (key, value) in style {
        if is_falsy(value) {
            log::trace!("skipping falsy style value for {}", key);
            continue;
        }

        match value {
            Value::Object(map) if !ctx.platform.is_platform_color(value) => {
                if NESTED_KEYS.contains(&key.as_str()) {
                    parse_nested(&mut parsed, key, map, ctx);
                } else {
                    parse_breakpoint_map(&mut parsed, key, map, ctx);
                }
            }
            Value::Array(entries) if key == TRANSFORM_KEY => {
                parse_transform(&mut parsed, entries, ctx);
            }
            _ => {
                parsed.initial.insert(key.clone(), ctx.leaf(value));
            }
        }
    }

    parsed
}

fn parse_nested(parsed: &mut ParsedStyle, key: &str, map: &Map<String, Value>, ctx: &ParseContext<'_>) {
    let sub = parse_style_values(map, ctx);

    if !sub.initial.is_empty() {
        let merged = match parsed.initial.get_mut(key) {
            Some(existing) => deep_merge(std::mem::take(existing), Value::Object(sub.initial)),
            None => Value::Object(sub.initial),
        };
        parsed.initial.insert(key.to_string(), merged);
    }

    for (breakpoint, overrides) in sub.queries {
        let query = parsed.query_mut(&breakpoint);
        let merged = match query.get_mut(key) {
            Some(existing) => deep_merge(std::mem::take(existing), Value::Object(overrides)),
            None => Value::Object(overrides),
        };
        query.insert(key.to_string(), merged);
    }
}

fn parse_transform(parsed: &mut ParsedStyle, entries: &[Value], ctx: &ParseContext<'_>) {
    let subs: Vec<ParsedStyle> = entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| parse_style_values(entry, ctx))
        .collect();
    if subs.is_empty() {
        return;
    }

    let mut touched: Vec<&str> = Vec::new();
    for sub in &subs {
        for breakpoint in sub.queries.keys() {
            if !touched.contains(&breakpoint.as_str()) {
                touched.push(breakpoint);
            }
        }
    }
    let touched = ctx.breakpoints.sort_names(touched);

    // CSS replaces the whole transform list, so each breakpoint carries
    // every entry with the overrides of all smaller breakpoints applied.
    let mut layered: Vec<StyleValues> = subs.iter().map(|sub| sub.initial.clone()).collect();
    let mut per_breakpoint: Vec<(String, Value)> = Vec::new();
    for breakpoint in touched {
        for (entry, sub) in layered.iter_mut().zip(&subs) {
            if let Some(overrides) = sub.queries.get(breakpoint) {
                *entry = merge_maps(std::mem::take(entry), overrides.clone());
            }
        }
        let list = layered.iter().cloned().map(Value::Object).collect();
        per_breakpoint.push((breakpoint.to_string(), Value::Array(list)));
    }

    let initial = subs
        .into_iter()
        .map(|sub| Value::Object(sub.initial))
        .collect();
    parsed.initial.insert(TRANSFORM_KEY.to_string(), Value::Array(initial));

    for (breakpoint, list) in per_breakpoint {
        parsed.query_mut(&breakpoint).insert(TRANSFORM_KEY.to_string(), list);
    }
}

fn parse_breakpoint_map(
    parsed: &mut ParsedStyle,
    key: &str,
    map: &Map<String, Value>,
    ctx: &ParseContext<'_>,
) {
    for (breakpoint, value) in map {
        match ctx.breakpoints.threshold(breakpoint) {
            Some(0) => {
                parsed.initial.insert(key.to_string(), ctx.leaf(value));
            }
            Some(_) => {
                parsed.query_mut(breakpoint).insert(key.to_string(), ctx.leaf(value));
            }
            None => log::trace!("ignoring unknown breakpoint {} for {}", breakpoint, key),
        }
    }
}
