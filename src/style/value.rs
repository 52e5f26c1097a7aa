//! Resolved style types.

use serde::Serialize;
use serde_json::{Map, Value};

/// A style-values object: property name to literal or per-breakpoint mapping.
pub type StyleValues = Map<String, Value>;

/// Reference to generated CSS rules, attached in place of inline styles.
///
/// Serializes to the shape the markup renderer recognises as a class
/// reference: `{"$$css": true, "responsiveStyles": "<class>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassMarker {
    #[serde(rename = "$$css")]
    css: bool,
    #[serde(rename = "responsiveStyles")]
    class_name: String,
}

impl ClassMarker {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            css: true,
            class_name: class_name.into(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

/// The outcome of resolving one style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedStyle {
    /// A merged style object (native surfaces, or markup after mount).
    Inline(StyleValues),
    /// A class whose rules live in the style sink (markup before mount).
    Class(ClassMarker),
}

impl ResolvedStyle {
    /// The merged style object, if resolved on the client.
    pub fn as_inline(&self) -> Option<&StyleValues> {
        match self {
            ResolvedStyle::Inline(values) => Some(values),
            ResolvedStyle::Class(_) => None,
        }
    }

    /// The generated class name, if resolved to rules.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            ResolvedStyle::Inline(_) => None,
            ResolvedStyle::Class(marker) => Some(marker.class_name()),
        }
    }

    /// Looks up one property of an inline style.
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.as_inline().and_then(|values| values.get(property))
    }
}
