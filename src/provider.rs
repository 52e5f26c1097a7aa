//! The configuration provider that style sheets read from.
//!
//! A [`StyleProvider`] sits at the root of the hosting application's tree.
//! It owns the current [`Config`], the color scheme choice, the rendering
//! [`Platform`], the shared [`StyleSink`] and the viewport source. Style
//! sheet instances hold an `Rc` to it and take a [`ProviderContext`]
//! snapshot on every resolution.
//!
//! On the markup surface the provider emits the color-variable rules
//! (`:root` and `.dark`) into the sink when it is built and again whenever
//! its configuration is replaced.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::config::Config;
use crate::platform::Platform;
use crate::sink::StyleSink;
use crate::theme::{ColorScheme, SchemeChoice, Theme};
use crate::viewport::{ManualViewport, ViewportSource};

/// A snapshot of what the provider currently supplies.
#[derive(Clone)]
pub struct ProviderContext {
    pub config: Rc<Config>,
    pub scheme: ColorScheme,
    pub platform: Platform,
    pub sink: Arc<StyleSink>,
    pub viewport: Rc<dyn ViewportSource>,
    /// Bumped whenever the configuration is replaced.
    pub config_revision: u64,
    /// Bumped on any provider change (configuration or scheme choice).
    pub revision: u64,
}

impl ProviderContext {
    pub fn is_dark(&self) -> bool {
        self.scheme.is_dark()
    }
}

impl fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderContext")
            .field("scheme", &self.scheme)
            .field("platform", &self.platform)
            .field("config_revision", &self.config_revision)
            .field("revision", &self.revision)
            .finish()
    }
}

/// Supplies configuration to style sheets.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::{Config, Platform, SchemeChoice, StyleProvider};
///
/// let config = Config::builder()
///     .breakpoint("xs", 0)
///     .color_var("primary", ("#fff", "#000"))
///     .build();
///
/// let provider = StyleProvider::builder(config)
///     .platform(Platform::Web)
///     .scheme(SchemeChoice::Dark)
///     .build();
///
/// assert!(provider.context().is_dark());
/// assert!(provider.sink().contains(":root { --primary: #fff; }"));
/// assert!(provider.sink().contains(".dark { --primary: #000; }"));
/// ```
pub struct StyleProvider {
    config: RefCell<Rc<Config>>,
    scheme: Cell<SchemeChoice>,
    platform: Platform,
    sink: Arc<StyleSink>,
    viewport: Rc<dyn ViewportSource>,
    config_revision: Cell<u64>,
    revision: Cell<u64>,
}

impl StyleProvider {
    pub fn builder(config: Config) -> StyleProviderBuilder {
        StyleProviderBuilder {
            config,
            scheme: SchemeChoice::default(),
            platform: Platform::default(),
            sink: None,
            viewport: None,
        }
    }

    /// Takes a snapshot of the current configuration and scheme.
    pub fn context(&self) -> ProviderContext {
        ProviderContext {
            config: self.config.borrow().clone(),
            scheme: self.scheme.get().resolve(),
            platform: self.platform,
            sink: self.sink.clone(),
            viewport: self.viewport.clone(),
            config_revision: self.config_revision.get(),
            revision: self.revision.get(),
        }
    }

    pub fn config(&self) -> Rc<Config> {
        self.config.borrow().clone()
    }

    /// The current theme tokens.
    pub fn theme(&self) -> Theme {
        self.config.borrow().theme.clone()
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn sink(&self) -> &Arc<StyleSink> {
        &self.sink
    }

    pub fn viewport(&self) -> Rc<dyn ViewportSource> {
        self.viewport.clone()
    }

    /// Replaces the configuration. Style sheets re-run their declarations
    /// on their next resolution.
    pub fn set_config(&self, config: Config) {
        let config = Rc::new(config);
        self.emit_color_vars(&config);
        *self.config.borrow_mut() = config;
        self.config_revision.set(self.config_revision.get() + 1);
        self.bump();
    }

    /// Changes the color scheme choice.
    pub fn set_color_scheme(&self, scheme: SchemeChoice) {
        if self.scheme.get() != scheme {
            self.scheme.set(scheme);
            self.bump();
        }
    }

    fn bump(&self) {
        self.revision.set(self.revision.get() + 1);
    }

    fn emit_color_vars(&self, config: &Config) {
        if !self.platform.is_markup() || config.color_vars.is_empty() {
            return;
        }
        log::debug!(
            "emitting {} color variables as custom properties",
            config.color_vars.len()
        );
        for rule in config.color_vars.global_rules() {
            self.sink.insert(rule);
        }
    }
}

impl fmt::Debug for StyleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleProvider")
            .field("config", &self.config.borrow())
            .field("scheme", &self.scheme.get())
            .field("platform", &self.platform)
            .field("revision", &self.revision.get())
            .finish()
    }
}

/// Builder for [`StyleProvider`].
pub struct StyleProviderBuilder {
    config: Config,
    scheme: SchemeChoice,
    platform: Platform,
    sink: Option<Arc<StyleSink>>,
    viewport: Option<Rc<dyn ViewportSource>>,
}

impl StyleProviderBuilder {
    pub fn scheme(mut self, scheme: impl Into<SchemeChoice>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Shares an existing sink instead of creating a fresh one.
    pub fn sink(mut self, sink: Arc<StyleSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn viewport(mut self, viewport: Rc<dyn ViewportSource>) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn build(self) -> Rc<StyleProvider> {
        let config = Rc::new(self.config);
        let provider = StyleProvider {
            config: RefCell::new(config.clone()),
            scheme: Cell::new(self.scheme),
            platform: self.platform,
            sink: self.sink.unwrap_or_default(),
            viewport: self
                .viewport
                .unwrap_or_else(|| Rc::new(ManualViewport::default())),
            config_revision: Cell::new(0),
            revision: Cell::new(0),
        };
        provider.emit_color_vars(&config);
        Rc::new(provider)
    }
}
