//! Theme struct for design tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tree of design tokens (colors, spacing, radii...) read by style
/// declarations.
///
/// Tokens are addressed by dotted paths. Values are arbitrary JSON, so a
/// color token may hold a literal (`"#0af"`) or a color-variable reference
/// (`"var(--primary)"`) that resolves per scheme.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::Theme;
/// use serde_json::json;
///
/// let theme = Theme::new()
///     .add("colors.primary", "var(--primary)")
///     .add("space.md", 16);
///
/// assert_eq!(theme.get("colors.primary"), Some(&json!("var(--primary)")));
/// assert_eq!(theme.get("space.md"), Some(&json!(16)));
/// assert_eq!(theme.get("space.xl"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    tokens: Map<String, Value>,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a theme from a JSON object. Anything else yields an empty theme.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(tokens) => Self { tokens },
            _ => Self::default(),
        }
    }

    /// Sets the token at a dotted `path`, creating intermediate groups.
    ///
    /// A scalar in the way of the path is replaced by a group.
    pub fn add(mut self, path: &str, value: impl Into<Value>) -> Self {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((leaf, groups)) = segments.split_last() else {
            return self;
        };
        let mut node = &mut self.tokens;
        for segment in groups {
            let entry = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(group) = entry else {
                return self;
            };
            node = group;
        }
        node.insert(leaf.to_string(), value.into());
        self
    }

    /// Looks up the token at a dotted `path`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.tokens.get(first)?, |node, segment| node.get(segment))
    }

    /// Looks up a string token, falling back to `""` when absent.
    pub fn str(&self, path: &str) -> &str {
        self.get(path).and_then(Value::as_str).unwrap_or_default()
    }

    /// Returns the top-level token groups.
    pub fn tokens(&self) -> &Map<String, Value> {
        &self.tokens
    }

    /// Layers this theme over `base`, one top-level group at a time.
    ///
    /// Groups present in both are shallow-merged (this theme's tokens win);
    /// groups present in only one side are kept as they are.
    pub fn with_defaults(&self, base: &Theme) -> Theme {
        let mut tokens = base.tokens.clone();
        for (group, value) in &self.tokens {
            let merged = match (tokens.get(group), value) {
                (Some(Value::Object(defaults)), Value::Object(overrides)) => {
                    let mut merged = defaults.clone();
                    for (k, v) in overrides {
                        merged.insert(k.clone(), v.clone());
                    }
                    Value::Object(merged)
                }
                _ => value.clone(),
            };
            tokens.insert(group.clone(), merged);
        }
        Theme { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
