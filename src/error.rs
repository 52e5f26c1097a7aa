//! Error types for configuration loading and markup output.
//!
//! Style resolution itself never fails: unknown breakpoints, falsy values
//! and unknown color variables degrade silently. Errors only surface at the
//! edges, when a configuration is parsed or the style element is rendered.

use thiserror::Error;

/// Error returned when a configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML source could not be parsed into a configuration.
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON source could not be parsed into a configuration.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Strict validation requires a zero-width default breakpoint.
    #[error("breakpoints table has no zero-width default entry")]
    MissingDefaultBreakpoint,
}

/// Error returned when the collected style rules cannot be rendered.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("failed to render style element: {0}")]
    Template(#[from] minijinja::Error),
}
