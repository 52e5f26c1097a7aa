//! Design tokens, color variables and light/dark scheme selection.
//!
//! This module provides:
//!
//! - [`Theme`]: A tree of design tokens read by style declarations
//! - [`ColorVars`]: Named colors with optional light/dark variants, referenced
//!   from styles as `var(--name)`
//! - [`ColorScheme`]: Light or dark, with OS detection
//! - [`SchemeChoice`]: A fixed scheme or "follow the system"
//!
//! Color variables are the only tokens that change between schemes. On the
//! markup surface they are emitted once as CSS custom properties (a `:root`
//! rule for light values and a `.dark` rule for dark overrides); after mount
//! they are resolved to literal values for the active scheme.

mod adaptive;
mod choice;
mod color_vars;
#[allow(clippy::module_inception)]
mod theme;

pub use adaptive::{detect_color_scheme, set_color_scheme_detector, ColorScheme};
pub use choice::SchemeChoice;
pub use color_vars::{ColorVar, ColorVars, DARK_SCOPE_SELECTOR, ROOT_SCOPE_SELECTOR};
pub use theme::Theme;
