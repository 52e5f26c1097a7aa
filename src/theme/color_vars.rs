//! Color variables and `var(--name)` indirection.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::adaptive::ColorScheme;

/// Selector for the rule that defines every variable's light (or only) value.
pub const ROOT_SCOPE_SELECTOR: &str = ":root";

/// Selector for the rule overriding paired variables with their dark value.
///
/// The hosting application toggles this class on the document root.
pub const DARK_SCOPE_SELECTOR: &str = ".dark";

static VAR_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^var\(--([A-Za-z0-9_-]+)\)$").expect("valid var() pattern"));

/// A color variable: one literal, or a light/dark pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorVar {
    Adaptive { light: String, dark: String },
    Literal(String),
}

impl ColorVar {
    pub fn adaptive(light: impl Into<String>, dark: impl Into<String>) -> Self {
        ColorVar::Adaptive {
            light: light.into(),
            dark: dark.into(),
        }
    }

    /// The value for `scheme`; literals ignore the scheme.
    pub fn for_scheme(&self, scheme: ColorScheme) -> &str {
        match self {
            ColorVar::Literal(value) => value,
            ColorVar::Adaptive { light, .. } if scheme == ColorScheme::Light => light,
            ColorVar::Adaptive { dark, .. } => dark,
        }
    }
}

impl From<&str> for ColorVar {
    fn from(value: &str) -> Self {
        ColorVar::Literal(value.to_string())
    }
}

impl From<String> for ColorVar {
    fn from(value: String) -> Self {
        ColorVar::Literal(value)
    }
}

impl From<(&str, &str)> for ColorVar {
    fn from((light, dark): (&str, &str)) -> Self {
        ColorVar::adaptive(light, dark)
    }
}

/// An ordered table of color variables.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::{ColorScheme, ColorVars};
/// use serde_json::json;
///
/// let vars = ColorVars::new()
///     .add("primary", ("#fff", "#000"))
///     .add("accent", "tomato");
///
/// assert_eq!(vars.resolve("var(--primary)", ColorScheme::Dark), Some(json!("#000")));
/// assert_eq!(vars.resolve("var(--accent)", ColorScheme::Dark), Some(json!("tomato")));
/// assert_eq!(vars.resolve("var(--missing)", ColorScheme::Dark), Some(json!(null)));
/// assert_eq!(vars.resolve("red", ColorScheme::Dark), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorVars {
    vars: IndexMap<String, ColorVar>,
}

impl ColorVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, returning the updated table for chaining.
    pub fn add(mut self, name: impl Into<String>, value: impl Into<ColorVar>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ColorVar> {
        self.vars.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Extracts `NAME` from a `var(--NAME)` reference.
    pub fn reference_name(value: &str) -> Option<&str> {
        VAR_REFERENCE
            .captures(value)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Resolves a `var(--NAME)` reference for `scheme`.
    ///
    /// Returns `None` when `value` is not a reference at all, and
    /// `Some(Value::Null)` when it references an unknown variable.
    pub fn resolve(&self, value: &str, scheme: ColorScheme) -> Option<Value> {
        let name = Self::reference_name(value)?;
        Some(match self.vars.get(name) {
            Some(var) => Value::String(var.for_scheme(scheme).to_string()),
            None => {
                log::trace!("unknown color variable --{}", name);
                Value::Null
            }
        })
    }

    /// CSS rules defining every variable as a custom property.
    ///
    /// The first rule scopes light (or only) values to `:root`; the second,
    /// present only when some variable is paired, scopes dark values to
    /// `.dark`.
    pub fn global_rules(&self) -> Vec<String> {
        let mut root = Vec::new();
        let mut dark = Vec::new();

        for (name, var) in &self.vars {
            match var {
                ColorVar::Literal(value) => root.push(format!("--{}: {};", name, value)),
                ColorVar::Adaptive {
                    light,
                    dark: dark_value,
                } => {
                    root.push(format!("--{}: {};", name, light));
                    dark.push(format!("--{}: {};", name, dark_value));
                }
            }
        }

        [(ROOT_SCOPE_SELECTOR, root), (DARK_SCOPE_SELECTOR, dark)]
            .into_iter()
            .filter(|(_, decls)| !decls.is_empty())
            .map(|(selector, decls)| format!("{} {{ {} }}", selector, decls.join(" ")))
            .collect()
    }
}

impl<S: Into<String>, V: Into<ColorVar>> FromIterator<(S, V)> for ColorVars {
    fn from_iter<T: IntoIterator<Item = (S, V)>>(iter: T) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
