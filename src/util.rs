//! Helpers for value truthiness and CSS text conversion.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid camel-case pattern"));

/// Properties whose numeric values are emitted without a `px` suffix.
pub const UNITLESS_PROPERTIES: &[&str] = &[
    "aspectRatio",
    "flex",
    "flexGrow",
    "flexShrink",
    "fontWeight",
    "opacity",
    "zIndex",
];

/// Returns `true` for values a style declaration treats as "not set".
///
/// Mirrors the truthiness declarations are authored against: `null`,
/// `false`, zero and the empty string are all falsy.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::is_falsy;
/// use serde_json::json;
///
/// assert!(is_falsy(&json!(0)));
/// assert!(is_falsy(&json!("")));
/// assert!(!is_falsy(&json!("red")));
/// ```
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Converts a camelCase property name to its kebab-case CSS form.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::camel_to_kebab;
///
/// assert_eq!(camel_to_kebab("backgroundColor"), "background-color");
/// assert_eq!(camel_to_kebab("borderTop2Width"), "border-top2-width");
/// ```
pub fn camel_to_kebab(name: &str) -> String {
    CAMEL_BOUNDARY.replace_all(name, "$1-$2").to_lowercase()
}

/// Formats a float the way it reads in a style declaration: integral
/// values drop the fraction.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

pub(crate) fn format_json_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        format_number(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Converts one style value into CSS declaration text for `property`.
///
/// Numbers (and strings that parse as numbers) receive a `px` suffix
/// unless the property is unitless. `transform` lists become CSS transform
/// functions. Returns `None` for values CSS cannot express (nested
/// objects, `null`).
pub fn css_value(property: &str, value: &Value) -> Option<String> {
    let unitless = UNITLESS_PROPERTIES.contains(&property);
    match value {
        Value::Number(n) => {
            let text = format_json_number(n);
            Some(if unitless { text } else { format!("{}px", text) })
        }
        Value::String(s) => {
            let numeric = !s.trim().is_empty() && s.trim().parse::<f64>().is_ok();
            Some(if numeric && !unitless {
                format!("{}px", s.trim())
            } else {
                s.clone()
            })
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(entries) if property == "transform" => transform_css(entries),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(format_json_number(n)),
                    _ => None,
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        Value::Null | Value::Object(_) => None,
    }
}

fn transform_css(entries: &[Value]) -> Option<String> {
    let mut functions = Vec::new();
    for entry in entries {
        let Value::Object(map) = entry else { continue };
        for (name, arg) in map {
            let text = match arg {
                Value::Number(n) => {
                    let n = format_json_number(n);
                    if name.starts_with("translate") || name == "perspective" {
                        format!("{}px", n)
                    } else {
                        n
                    }
                }
                Value::String(s) => s.clone(),
                Value::Array(values) => values
                    .iter()
                    .filter_map(|v| match v {
                        Value::Number(n) => Some(format_json_number(n)),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
                _ => continue,
            };
            functions.push(format!("{}({})", name, text));
        }
    }
    (!functions.is_empty()).then(|| functions.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_falsy() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!(0.0)));
        assert!(is_falsy(&json!("")));
        assert!(!is_falsy(&json!(1)));
        assert!(!is_falsy(&json!(true)));
        assert!(!is_falsy(&json!({})));
        assert!(!is_falsy(&json!([])));
    }

    #[test]
    fn test_camel_to_kebab() {
        assert_eq!(camel_to_kebab("color"), "color");
        assert_eq!(camel_to_kebab("backgroundColor"), "background-color");
        assert_eq!(camel_to_kebab("borderTopLeftRadius"), "border-top-left-radius");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(200.0), "200");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_css_value_numbers() {
        assert_eq!(css_value("width", &json!(10)).as_deref(), Some("10px"));
        assert_eq!(css_value("width", &json!(1.5)).as_deref(), Some("1.5px"));
        assert_eq!(css_value("opacity", &json!(0.5)).as_deref(), Some("0.5"));
        assert_eq!(css_value("width", &json!("12")).as_deref(), Some("12px"));
        assert_eq!(css_value("width", &json!("50vw")).as_deref(), Some("50vw"));
    }

    #[test]
    fn test_css_value_transform() {
        let value = json!([{ "scale": 2 }, { "translateX": 10 }, { "rotate": "45deg" }]);
        assert_eq!(
            css_value("transform", &value).as_deref(),
            Some("scale(2) translateX(10px) rotate(45deg)")
        );
    }

    #[test]
    fn test_css_value_unrepresentable() {
        assert_eq!(css_value("shadowOffset", &json!({ "width": 1 })), None);
        assert_eq!(css_value("color", &json!(null)), None);
    }
}
