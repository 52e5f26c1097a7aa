//! Light/dark color scheme with OS detection.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// The active color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }
}

type SchemeDetector = fn() -> ColorScheme;

static SCHEME_DETECTOR: Lazy<Mutex<SchemeDetector>> = Lazy::new(|| Mutex::new(os_scheme_detector));

/// Overrides the detector used to determine whether the user prefers a light or dark scheme.
///
/// This is useful for testing or when the host application tracks the
/// preference itself.
pub fn set_color_scheme_detector(detector: SchemeDetector) {
    let mut guard = SCHEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Returns the scheme reported by the current detector.
pub fn detect_color_scheme() -> ColorScheme {
    let detector = SCHEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_scheme_detector() -> ColorScheme {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorScheme::Dark,
        OsThemeMode::Light => ColorScheme::Light,
    }
}
