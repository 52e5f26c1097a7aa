//! Parsing and resolution of responsive style values.
//!
//! This module provides the core of the pipeline:
//!
//! - [`parse_style_values`]: Splits a style into breakpoint-independent
//!   `initial` values and per-breakpoint `queries`
//! - [`get_responsive_style`]: Merges satisfied breakpoints into one style
//!   object for a known viewport width
//! - [`get_server_responsive_style`]: Emits CSS rules with media queries
//!   into a [`StyleSink`](crate::StyleSink) and returns a class marker
//! - [`ResolveEnv`]: Bundles everything resolution reads and picks between
//!   the two paths
//!
//! A style value is either a literal, or a mapping from breakpoint name to
//! literal:
//!
//! ```json
//! { "padding": 8, "backgroundColor": { "xs": "red", "md": "blue" } }
//! ```
//!
//! On the client path the mapping collapses to the value of the largest
//! breakpoint whose threshold the viewport satisfies. On the markup path
//! before mount it becomes one base rule plus one `@media (min-width)` rule
//! per breakpoint, so the browser picks the value before any script runs.

mod parse;
mod resolve;
mod value;

pub use parse::{parse_style_values, ParseContext, ParsedStyle, NESTED_KEYS, TRANSFORM_KEY};
pub use resolve::{
    class_name_for, css_declarations, get_responsive_style, get_server_responsive_style,
    ResolveEnv, CLASS_PREFIX,
};
pub use value::{ClassMarker, ResolvedStyle, StyleValues};
