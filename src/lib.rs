//! Breakpoint-aware style sheets for native and markup surfaces.
//!
//! Styles are declared once, with any property optionally mapping breakpoint
//! names to values. Where the viewport is known (native surfaces, or the
//! markup surface after mount) a style resolves to one merged object. On the
//! markup surface before mount it resolves to a class name whose CSS rules,
//! with `@media (min-width)` queries, are collected in a [`StyleSink`] for
//! injection into the page.
//!
//! # Core Concepts
//!
//! - [`Config`]: Breakpoints, theme tokens and color variables
//! - [`StyleProvider`]: Holds the config, color scheme, platform, sink and
//!   viewport for a tree of components
//! - [`create_style_sheet`]: Wraps a declaration in a [`StyleSheetFactory`];
//!   each component gets its own [`StyleSheetInstance`]
//! - [`Units`]: `em`, `vw`, `calc` and friends, numeric or CSS literal
//!   depending on where styles resolve
//! - [`deep_merge`]: Combines nested style or theme values
//!
//! # Quick Start
//!
//! ```rust
//! use responsive_stylesheet::{create_style_sheet, Config, Platform, StyleProvider};
//! use serde_json::json;
//!
//! let config = Config::builder()
//!     .breakpoint("xs", 0)
//!     .breakpoint("md", 500)
//!     .build();
//! let provider = StyleProvider::builder(config).platform(Platform::Web).build();
//!
//! let use_styles = create_style_sheet(json!({
//!     "card": { "backgroundColor": { "xs": "red", "md": "blue" } }
//! }));
//!
//! // Before mount the markup surface gets a class and generated rules.
//! let mut styles = use_styles.instance(&provider);
//! let sheet = styles.styles();
//! let class = sheet.style("card").unwrap().class_name().unwrap().to_string();
//! assert!(provider.sink().css_text().contains(&format!("@media (min-width: 500px) {{ .{}", class)));
//!
//! // After mount it resolves against the viewport like a native surface.
//! styles.mount();
//! assert!(styles.styles().style("card").unwrap().as_inline().is_some());
//! ```
//!
//! # Configuration Files
//!
//! [`Config::from_yaml`] and [`Config::from_json`] load the same shape:
//!
//! ```yaml
//! breakpoints:
//!   xs: 0
//!   md: 768
//! colorVars:
//!   primary: { light: "#ffffff", dark: "#000000" }
//! theme:
//!   spacing:
//!     unit: 8
//! ```

pub mod breakpoints;
pub mod config;
pub mod error;
pub mod memo;
pub mod merge;
pub mod platform;
pub mod provider;
pub mod sink;
pub mod style;
pub mod stylesheet;
pub mod theme;
pub mod units;
pub mod util;
pub mod viewport;

pub use breakpoints::Breakpoints;
pub use config::{Config, ConfigBuilder};
pub use error::{ConfigError, MarkupError};
pub use memo::Memo;
pub use merge::{deep_merge, merge_maps};
pub use platform::Platform;
pub use provider::{ProviderContext, StyleProvider, StyleProviderBuilder};
pub use sink::{StyleDocument, StyleElement, StyleSink, StyleTarget, STYLE_ELEMENT_ID};
pub use style::{
    class_name_for, css_declarations, get_responsive_style, get_server_responsive_style,
    parse_style_values, ClassMarker, ParseContext, ParsedStyle, ResolveEnv, ResolvedStyle,
    StyleValues, CLASS_PREFIX,
};
pub use stylesheet::{
    create_style_sheet, create_themed_style_sheet, Declaration, DynamicStyle, ResolvedEntry,
    ResolvedSheet, StyleEntry, StyleFn, StyleSheet, StyleSheetFactory, StyleSheetInstance,
};
pub use theme::{
    detect_color_scheme, set_color_scheme_detector, ColorScheme, ColorVar, ColorVars,
    SchemeChoice, Theme,
};
pub use units::{CalcOp, Dimension, UnitMode, Units, BASE_FONT_SIZE};
pub use util::{camel_to_kebab, is_falsy};
pub use viewport::{Dimensions, ManualViewport, Subscription, ViewportSource, ViewportTracker};
