//! Rendering surface detection and the literal-vs-numeric mode switch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The rendering surface styles are resolved for.
///
/// [`Platform::Web`] is the markup surface: before a component has mounted
/// it receives generated CSS rules instead of merged style objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Ios,
    Android,
    Web,
}

impl Platform {
    /// Returns `true` for the markup-based surface.
    pub fn is_markup(self) -> bool {
        matches!(self, Platform::Web)
    }

    /// Whether styles should be merged into plain objects for the current
    /// mount state.
    ///
    /// Native surfaces always resolve on the client. The markup surface does
    /// so only once the component has mounted; before that, rules are
    /// emitted into the style sink.
    pub fn resolves_on_client(self, mounted: bool) -> bool {
        !self.is_markup() || mounted
    }

    /// Whether unit helpers should compute numbers rather than CSS
    /// expressions. Same condition as [`Platform::resolves_on_client`].
    pub fn uses_numeric_units(self, mounted: bool) -> bool {
        self.resolves_on_client(mounted)
    }

    /// Returns `true` if `value` is an opaque platform color object that
    /// must be passed through untouched rather than read as a
    /// per-breakpoint mapping.
    pub fn is_platform_color(self, value: &Value) -> bool {
        let Value::Object(map) = value else {
            return false;
        };
        match self {
            Platform::Web => matches!(map.get("semantic"), Some(Value::Object(_))),
            Platform::Android => matches!(map.get("resource_paths"), Some(Value::Object(_))),
            Platform::Ios => false,
        }
    }
}
