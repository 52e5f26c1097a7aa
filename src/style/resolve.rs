//! Turning parsed styles into merged objects or injected CSS rules.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use serde_json::Value;

use super::parse::{parse_style_values, ParseContext, ParsedStyle, TRANSFORM_KEY};
use super::value::{ClassMarker, ResolvedStyle, StyleValues};
use crate::breakpoints::Breakpoints;
use crate::config::Config;
use crate::merge::merge_maps;
use crate::platform::Platform;
use crate::sink::StyleSink;
use crate::theme::ColorScheme;
use crate::util::{camel_to_kebab, css_value};
use crate::viewport::Dimensions;

/// Prefix of every generated class name.
pub const CLASS_PREFIX: &str = "responsive-";

const HASH_HEX_LEN: usize = 12;

/// Merges `initial` with every breakpoint satisfied by `width`.
///
/// Breakpoints apply in ascending threshold order, so when two satisfied
/// breakpoints set the same property the larger one wins.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::{get_responsive_style, parse_style_values, Breakpoints, ColorScheme, ColorVars, ParseContext, Platform};
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
/// let style = json!({ "backgroundColor": { "xs": "red", "md": "blue" } });
/// let parsed = parse_style_values(style.as_object().unwrap(), &ctx);
///
/// let wide = get_responsive_style(&parsed, &breakpoints, 600.0);
/// assert_eq!(wide.get("backgroundColor"), Some(&json!("blue")));
/// let narrow = get_responsive_style(&parsed, &breakpoints, 499.0);
/// assert_eq!(narrow.get("backgroundColor"), Some(&json!("red")));
/// ```
pub fn get_responsive_style(parsed: &ParsedStyle, breakpoints: &Breakpoints, width: f64) -> StyleValues {
    let names = breakpoints.sort_names(parsed.queries.keys().map(String::as_str));
    let merged = names.into_iter().fold(parsed.initial.clone(), |acc, name| {
        match (breakpoints.threshold(name), parsed.queries.get(name)) {
            (Some(threshold), Some(overrides)) if f64::from(threshold) <= width => {
                merge_maps(acc, overrides.clone())
            }
            _ => acc,
        }
    });
    strip_empty_transforms(merged)
}

/// Drops transform entries left empty because their only values sit at
/// breakpoints the viewport does not satisfy. Native transforms require
/// exactly one key per entry.
fn strip_empty_transforms(mut style: StyleValues) -> StyleValues {
    let emptied = match style.get_mut(TRANSFORM_KEY) {
        Some(Value::Array(entries)) => {
            entries.retain(|entry| !matches!(entry, Value::Object(map) if map.is_empty()));
            entries.is_empty()
        }
        _ => false,
    };
    if emptied {
        style.shift_remove(TRANSFORM_KEY);
    }
    style
}

/// Emits `parsed` as CSS rules under `.class_name` and returns the marker.
///
/// The base rule carries `initial`; each breakpoint with a non-zero
/// threshold gets its own rule wrapped in `@media (min-width: Npx)`, in
/// ascending threshold order. When `initial` renders to no declarations no
/// base rule is written; the class then applies only through its media
/// rules. Every declaration is `!important` so inline
/// styles reconciled before hydration cannot override it. The sink
/// deduplicates, so resolving the same style repeatedly injects nothing new.
pub fn get_server_responsive_style(
    parsed: &ParsedStyle,
    class_name: &str,
    breakpoints: &Breakpoints,
    sink: &StyleSink,
) -> ClassMarker {
    let selector = format!(".{}", class_name);

    let base = css_declarations(&parsed.initial);
    if !base.is_empty() {
        sink.insert(format!("{}{{{}}}", selector, base));
    }

    for name in breakpoints.sort_names(parsed.queries.keys().map(String::as_str)) {
        let Some(threshold) = breakpoints.threshold(name).filter(|t| *t > 0) else {
            continue;
        };
        let Some(overrides) = parsed.queries.get(name) else {
            continue;
        };
        let declarations = css_declarations(overrides);
        if declarations.is_empty() {
            continue;
        }
        sink.insert(format!(
            "@media (min-width: {}px) {{ {}{{{}}} }}",
            threshold, selector, declarations
        ));
    }

    ClassMarker::new(class_name)
}

/// Renders style values as `!important` CSS declarations.
///
/// Properties whose values CSS cannot express are left out.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::css_declarations;
/// use serde_json::json;
///
/// let values = json!({ "backgroundColor": "red", "paddingTop": 4 });
/// assert_eq!(
///     css_declarations(values.as_object().unwrap()),
///     "background-color: red !important; padding-top: 4px !important;"
/// );
/// ```
pub fn css_declarations(values: &StyleValues) -> String {
    values
        .iter()
        .filter_map(|(property, value)| {
            let css = css_value(property, value);
            if css.is_none() {
                log::trace!("{} has no CSS form; left out of generated rule", property);
            }
            css.map(|css| format!("{}: {} !important;", camel_to_kebab(property), css))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deterministic class name for one style.
///
/// Hashes the style name together with its values, so identical
/// declarations map to the same selector across renders and processes.
pub fn class_name_for(style_name: &str, values: &StyleValues) -> String {
    let mut hasher = Sha256::new();
    hasher.update(style_name.as_bytes());
    hasher.update(b":");
    hasher.update(serde_json::Value::Object(values.clone()).to_string().as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{}{}", CLASS_PREFIX, &digest[..HASH_HEX_LEN])
}

/// Everything resolution reads, captured from a provider snapshot.
///
/// Cheap to clone; dynamic styles keep one so each call resolves against
/// the live viewport.
#[derive(Clone)]
pub struct ResolveEnv {
    pub config: Rc<Config>,
    pub scheme: ColorScheme,
    pub platform: Platform,
    pub mounted: bool,
    pub viewport: Rc<Cell<Dimensions>>,
    pub sink: Arc<StyleSink>,
}

impl ResolveEnv {
    pub fn parse_context(&self) -> ParseContext<'_> {
        ParseContext {
            breakpoints: &self.config.breakpoints,
            color_vars: &self.config.color_vars,
            scheme: self.scheme,
            platform: self.platform,
            mounted: self.mounted,
        }
    }

    /// Parses and resolves the style named `name`.
    ///
    /// Uses the client merge when [`Platform::resolves_on_client`] holds,
    /// and the rule-emitting path otherwise.
    pub fn resolve(&self, name: &str, values: &StyleValues) -> ResolvedStyle {
        let parsed = parse_style_values(values, &self.parse_context());
        if self.platform.resolves_on_client(self.mounted) {
            let width = self.viewport.get().width;
            ResolvedStyle::Inline(get_responsive_style(&parsed, &self.config.breakpoints, width))
        } else {
            let class_name = class_name_for(name, values);
            ResolvedStyle::Class(get_server_responsive_style(
                &parsed,
                &class_name,
                &self.config.breakpoints,
                &self.sink,
            ))
        }
    }
}

impl fmt::Debug for ResolveEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveEnv")
            .field("scheme", &self.scheme)
            .field("platform", &self.platform)
            .field("mounted", &self.mounted)
            .field("viewport", &self.viewport.get())
            .finish()
    }
}
