//! Scheme selection for providers.

use serde::{Deserialize, Serialize};

use super::adaptive::{detect_color_scheme, ColorScheme};

/// Either a fixed color scheme or the one the OS reports.
///
/// Providers resolve this every time they build a context, so a
/// [`SchemeChoice::System`] provider follows the detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeChoice {
    /// Always light. This is also what an unspecified scheme means.
    #[default]
    Light,
    /// Always dark.
    Dark,
    /// Ask the scheme detector.
    System,
}

impl SchemeChoice {
    /// Resolves to a concrete scheme.
    pub fn resolve(self) -> ColorScheme {
        match self {
            SchemeChoice::Light => ColorScheme::Light,
            SchemeChoice::Dark => ColorScheme::Dark,
            SchemeChoice::System => detect_color_scheme(),
        }
    }
}

impl From<ColorScheme> for SchemeChoice {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => SchemeChoice::Light,
            ColorScheme::Dark => SchemeChoice::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::set_color_scheme_detector;
    use serial_test::serial;

    #[test]
    fn test_fixed_choices() {
        assert_eq!(SchemeChoice::Light.resolve(), ColorScheme::Light);
        assert_eq!(SchemeChoice::Dark.resolve(), ColorScheme::Dark);
        assert_eq!(SchemeChoice::from(ColorScheme::Dark), SchemeChoice::Dark);
    }

    #[test]
    #[serial]
    fn test_system_choice_uses_detector() {
        set_color_scheme_detector(|| ColorScheme::Dark);
        assert_eq!(SchemeChoice::System.resolve(), ColorScheme::Dark);

        // Reset to default for other tests
        set_color_scheme_detector(|| ColorScheme::Light);
        assert_eq!(SchemeChoice::System.resolve(), ColorScheme::Light);
    }
}
