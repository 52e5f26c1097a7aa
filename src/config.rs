//! Styling configuration: theme, breakpoints and color variables.
//!
//! A [`Config`] is built once by the hosting application, either in code
//! with [`Config::builder`] or loaded from a YAML/JSON document:
//!
//! ```yaml
//! breakpoints:
//!   xs: 0
//!   md: 500
//! colorVars:
//!   primary: { light: "#ffffff", dark: "#000000" }
//!   accent: tomato
//! theme:
//!   colors:
//!     primary: var(--primary)
//! ```

use serde::{Deserialize, Serialize};

use crate::breakpoints::Breakpoints;
use crate::error::ConfigError;
use crate::theme::{ColorVar, ColorVars, Theme};

/// Everything a style provider hands to its style sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub breakpoints: Breakpoints,
    #[serde(default)]
    pub color_vars: ColorVars,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parses a configuration from YAML.
    ///
    /// # Example
    ///
    /// ```rust
    /// use responsive_stylesheet::Config;
    ///
    /// let config = Config::from_yaml(r##"
    /// breakpoints: { xs: 0, md: 500 }
    /// colorVars:
    ///   primary: { light: "#fff", dark: "#000" }
    /// "##).unwrap();
    ///
    /// assert_eq!(config.breakpoints.threshold("md"), Some(500));
    /// assert_eq!(config.color_vars.len(), 1);
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Checks the conventions resolution relies on.
    ///
    /// Resolution works without a zero-width breakpoint, but values can then
    /// only land in media queries, so strict callers reject such tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.breakpoints.has_default() {
            return Err(ConfigError::MissingDefaultBreakpoint);
        }
        Ok(())
    }

    /// Returns a copy whose theme is layered over `base`.
    pub fn with_base_theme(mut self, base: &Theme) -> Self {
        self.theme = self.theme.with_defaults(base);
        self
    }
}

/// Fluent builder for [`Config`].
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::{Config, Theme};
///
/// let config = Config::builder()
///     .breakpoint("xs", 0)
///     .breakpoint("md", 500)
///     .color_var("primary", ("#fff", "#000"))
///     .theme(Theme::new().add("colors.primary", "var(--primary)"))
///     .build();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    theme: Theme,
    base_theme: Option<Theme>,
    breakpoints: Breakpoints,
    color_vars: ColorVars,
}

impl ConfigBuilder {
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Default tokens the theme is layered over, group by group.
    pub fn base_theme(mut self, base: Theme) -> Self {
        self.base_theme = Some(base);
        self
    }

    pub fn breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn breakpoint(mut self, name: impl Into<String>, min_width: u32) -> Self {
        self.breakpoints = self.breakpoints.add(name, min_width);
        self
    }

    pub fn color_vars(mut self, color_vars: ColorVars) -> Self {
        self.color_vars = color_vars;
        self
    }

    pub fn color_var(mut self, name: impl Into<String>, value: impl Into<ColorVar>) -> Self {
        self.color_vars = self.color_vars.add(name, value);
        self
    }

    pub fn build(self) -> Config {
        let theme = match &self.base_theme {
            Some(base) => self.theme.with_defaults(base),
            None => self.theme,
        };
        Config {
            theme,
            breakpoints: self.breakpoints,
            color_vars: self.color_vars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_yaml_full() {
        let config = Config::from_yaml(
            r##"
breakpoints:
  xs: 0
  md: 500
colorVars:
  primary: { light: "#fff", dark: "#000" }
  accent: tomato
theme:
  colors:
    primary: var(--primary)
  space:
    md: 16
"##,
        )
        .unwrap();

        assert_eq!(config.breakpoints.threshold("xs"), Some(0));
        assert_eq!(config.color_vars.get("accent"), Some(&ColorVar::from("tomato")));
        assert_eq!(config.theme.get("colors.primary"), Some(&json!("var(--primary)")));
        assert_eq!(config.theme.get("space.md"), Some(&json!(16)));
    }

    #[test]
    fn test_from_json_minimal() {
        let config = Config::from_json(r#"{ "breakpoints": { "xs": 0 } }"#).unwrap();
        assert!(config.color_vars.is_empty());
        assert!(config.theme.is_empty());
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = Config::from_yaml("breakpoints: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_negative_breakpoint_rejected() {
        assert!(Config::from_json(r#"{ "breakpoints": { "xs": -1 } }"#).is_err());
    }

    #[test]
    fn test_validate_requires_default_breakpoint() {
        let config = Config::builder().breakpoint("md", 500).build();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingDefaultBreakpoint)
        ));
    }

    #[test]
    fn test_builder_applies_base_theme() {
        let config = Config::builder()
            .base_theme(Theme::new().add("colors.text", "#111").add("colors.bg", "#fff"))
            .theme(Theme::new().add("colors.bg", "#000"))
            .build();
        assert_eq!(config.theme.get("colors.text"), Some(&json!("#111")));
        assert_eq!(config.theme.get("colors.bg"), Some(&json!("#000")));
    }
}
