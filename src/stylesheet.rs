//! Style sheet declarations and their per-component resolution.
//!
//! A declaration maps style names to entries. An entry is a static style,
//! a function of call-time parameters, or a list of either whose non-empty
//! members are layered left to right. The whole declaration may itself be
//! a function of the [`Theme`] and the [`Units`] helpers.
//!
//! [`create_style_sheet`] wraps a declaration in a [`StyleSheetFactory`].
//! Each component asks the factory for its own [`StyleSheetInstance`], which
//! tracks mount state and the viewport and resolves styles on demand:
//!
//! ```rust
//! use responsive_stylesheet::{
//!     create_themed_style_sheet, Config, Dimensions, ManualViewport, StyleProvider, StyleSheet,
//! };
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! let viewport = Rc::new(ManualViewport::new(Dimensions::new(600.0, 800.0)));
//! let config = Config::builder().breakpoint("xs", 0).breakpoint("md", 500).build();
//! let provider = StyleProvider::builder(config).viewport(viewport.clone()).build();
//!
//! let use_styles = create_themed_style_sheet(|_theme, units| {
//!     StyleSheet::new()
//!         .style("box", json!({ "backgroundColor": { "xs": "red", "md": "blue" } }))
//!         .dynamic("label", |params| {
//!             let opacity = if params["muted"] == true { 0.5 } else { 1.0 };
//!             json!({ "opacity": opacity })
//!         })
//!         .style("half", json!({ "width": units.vw(50.0) }))
//! });
//!
//! let mut styles = use_styles.instance(&provider);
//! let sheet = styles.styles();
//! assert_eq!(sheet.style("box").unwrap().get("backgroundColor"), Some(&json!("blue")));
//! assert_eq!(sheet.style("half").unwrap().get("width"), Some(&json!(300)));
//! assert_eq!(sheet.call("label", &json!({ "muted": true })).unwrap().get("opacity"), Some(&json!(0.5)));
//! ```
//!
//! # Re-evaluation
//!
//! The declaration function runs again only when the provider's
//! configuration is replaced or the component mounts. Resolution runs again
//! when, in addition, the scheme, the viewport (while tracked) or any other
//! provider input changes. Dynamic entries resolve on every call.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::memo::Memo;
use crate::provider::StyleProvider;
use crate::style::{ResolveEnv, ResolvedStyle, StyleValues};
use crate::theme::{ColorScheme, Theme};
use crate::units::{UnitMode, Units};
use crate::util::is_falsy;
use crate::viewport::{Dimensions, ViewportTracker};

/// A style computed from call-time parameters.
pub type DynamicStyle = Rc<dyn Fn(&Value) -> StyleValues>;

/// One named entry of a style sheet declaration.
#[derive(Clone)]
pub enum StyleEntry {
    Static(StyleValues),
    Dynamic(DynamicStyle),
    /// Entries layered left to right; `None` members are skipped.
    List(Vec<Option<StyleEntry>>),
}

impl StyleEntry {
    /// A dynamic entry. A function result that is not an object is treated
    /// as an empty style.
    pub fn dynamic(style: impl Fn(&Value) -> Value + 'static) -> Self {
        StyleEntry::Dynamic(Rc::new(move |params| into_style_values(style(params))))
    }

    /// Collapses lists into a single static or dynamic style.
    ///
    /// A list of static members becomes one static style. A list with any
    /// dynamic member becomes a dynamic style that evaluates every member
    /// with the same parameters.
    fn flatten(self) -> FlatEntry {
        let items = match self {
            StyleEntry::Static(values) => return FlatEntry::Static(values),
            StyleEntry::Dynamic(style) => return FlatEntry::Dynamic(style),
            StyleEntry::List(items) => items,
        };
        let items: Vec<FlatEntry> = items.into_iter().flatten().map(StyleEntry::flatten).collect();

        if items.iter().all(|item| matches!(item, FlatEntry::Static(_))) {
            let layered = items.into_iter().fold(Map::new(), |mut acc, item| {
                if let FlatEntry::Static(values) = item {
                    layer(&mut acc, values);
                }
                acc
            });
            return FlatEntry::Static(layered);
        }

        FlatEntry::Dynamic(Rc::new(move |params| {
            items.iter().fold(Map::new(), |mut acc, item| {
                match item {
                    FlatEntry::Static(values) => layer(&mut acc, values.clone()),
                    FlatEntry::Dynamic(style) => layer(&mut acc, style(params)),
                }
                acc
            })
        }))
    }
}

/// A [`StyleEntry`] with every list collapsed.
enum FlatEntry {
    Static(StyleValues),
    Dynamic(DynamicStyle),
}

/// Later keys override earlier ones; existing keys keep their position.
fn layer(acc: &mut StyleValues, values: StyleValues) {
    for (key, value) in values {
        acc.insert(key, value);
    }
}

fn into_style_values(value: Value) -> StyleValues {
    match value {
        Value::Object(map) => map,
        other => {
            log::trace!("style function returned a non-object ({}); using an empty style", other);
            Map::new()
        }
    }
}

impl From<Value> for StyleEntry {
    /// Objects become static entries and arrays become lists (falsy members
    /// skipped). Anything else is an empty style.
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => StyleEntry::List(
                items
                    .into_iter()
                    .map(|item| (!is_falsy(&item)).then(|| StyleEntry::from(item)))
                    .collect(),
            ),
            other => StyleEntry::Static(into_style_values(other)),
        }
    }
}

impl From<StyleValues> for StyleEntry {
    fn from(values: StyleValues) -> Self {
        StyleEntry::Static(values)
    }
}

impl fmt::Debug for StyleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleEntry::Static(values) => f.debug_tuple("Static").field(values).finish(),
            StyleEntry::Dynamic(_) => f.write_str("Dynamic(..)"),
            StyleEntry::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

/// A set of named style entries.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    entries: IndexMap<String, StyleEntry>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the updated sheet for chaining.
    pub fn add(mut self, name: impl Into<String>, entry: impl Into<StyleEntry>) -> Self {
        self.entries.insert(name.into(), entry.into());
        self
    }

    /// Adds a static style from a JSON object.
    pub fn style(self, name: impl Into<String>, values: Value) -> Self {
        self.add(name, values)
    }

    /// Adds a style computed from call-time parameters.
    pub fn dynamic(
        self,
        name: impl Into<String>,
        style: impl Fn(&Value) -> Value + 'static,
    ) -> Self {
        self.add(name, StyleEntry::dynamic(style))
    }

    /// Adds a layered list of entries.
    pub fn list(self, name: impl Into<String>, items: Vec<Option<StyleEntry>>) -> Self {
        self.add(name, StyleEntry::List(items))
    }

    pub fn get(&self, name: &str) -> Option<&StyleEntry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Value> for StyleSheet {
    /// Builds a sheet of static (or list) entries from a JSON object.
    fn from(value: Value) -> Self {
        let entries = match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, entry)| (name, StyleEntry::from(entry)))
                .collect(),
            _ => IndexMap::new(),
        };
        Self { entries }
    }
}

type ThemedDeclaration = dyn Fn(&Theme, &Units) -> StyleSheet;

/// A style sheet, or a function producing one from the theme and units.
#[derive(Clone)]
pub enum Declaration {
    Static(StyleSheet),
    Themed(Rc<ThemedDeclaration>),
}

impl Declaration {
    /// Produces the style sheet. Themed declarations must return a sheet;
    /// that is their whole contract.
    pub fn evaluate(&self, theme: &Theme, units: &Units) -> StyleSheet {
        match self {
            Declaration::Static(sheet) => sheet.clone(),
            Declaration::Themed(declare) => declare(theme, units),
        }
    }
}

impl From<StyleSheet> for Declaration {
    fn from(sheet: StyleSheet) -> Self {
        Declaration::Static(sheet)
    }
}

impl From<Value> for Declaration {
    fn from(value: Value) -> Self {
        Declaration::Static(StyleSheet::from(value))
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Static(sheet) => f.debug_tuple("Static").field(sheet).finish(),
            Declaration::Themed(_) => f.write_str("Themed(..)"),
        }
    }
}

/// Wraps a declaration for use by components.
pub fn create_style_sheet(declaration: impl Into<Declaration>) -> StyleSheetFactory {
    StyleSheetFactory {
        declaration: Rc::new(declaration.into()),
    }
}

/// Wraps a declaration that reads the theme and unit helpers.
pub fn create_themed_style_sheet(
    declare: impl Fn(&Theme, &Units) -> StyleSheet + 'static,
) -> StyleSheetFactory {
    create_style_sheet(Declaration::Themed(Rc::new(declare)))
}

/// Produces per-component [`StyleSheetInstance`]s for one declaration.
#[derive(Debug, Clone)]
pub struct StyleSheetFactory {
    declaration: Rc<Declaration>,
}

impl StyleSheetFactory {
    /// Creates the resolution state for one component.
    pub fn instance(&self, provider: &Rc<StyleProvider>) -> StyleSheetInstance {
        StyleSheetInstance {
            declaration: self.declaration.clone(),
            provider: provider.clone(),
            mounted: false,
            tracker: ViewportTracker::new(provider.viewport()),
            evaluated: Memo::new(),
            resolved: Memo::new(),
        }
    }
}

#[derive(Debug, PartialEq)]
struct ResolveDeps {
    sheet_generation: u64,
    provider_revision: u64,
    scheme: ColorScheme,
    mounted: bool,
    dimensions: Option<Dimensions>,
}

/// Resolution state for one component using a style sheet.
///
/// Starts unmounted. [`StyleSheetInstance::mount`] performs the one-way
/// transition that, on the markup surface, switches from generated rules to
/// client-side merged styles. The viewport listener is attached only while
/// styles resolve on the client and is detached when the instance drops.
pub struct StyleSheetInstance {
    declaration: Rc<Declaration>,
    provider: Rc<StyleProvider>,
    mounted: bool,
    tracker: ViewportTracker,
    evaluated: Memo<(u64, bool), Rc<StyleSheet>>,
    resolved: Memo<ResolveDeps, Rc<ResolvedSheet>>,
}

impl StyleSheetInstance {
    /// Marks the component as mounted. Irreversible.
    pub fn mount(&mut self) {
        if !self.mounted {
            log::debug!("style sheet instance mounted");
            self.mounted = true;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the viewport listener is currently attached.
    pub fn is_tracking_viewport(&self) -> bool {
        self.tracker.is_enabled()
    }

    /// Resolves every style of the declaration for the current inputs.
    ///
    /// Returns the cached sheet when no tracked input changed since the
    /// last call.
    pub fn styles(&mut self) -> Rc<ResolvedSheet> {
        let ctx = self.provider.context();
        let client = ctx.platform.resolves_on_client(self.mounted);
        self.tracker.set_enabled(client);

        let mounted = self.mounted;
        let declaration = &self.declaration;
        let viewport = self.tracker.source();
        let sheet = self
            .evaluated
            .get_or_update((ctx.config_revision, mounted), || {
                log::debug!("evaluating style sheet declaration (mounted: {})", mounted);
                let mode = if ctx.platform.uses_numeric_units(mounted) {
                    UnitMode::Numeric
                } else {
                    UnitMode::Literal
                };
                let units = Units::new(mode, viewport);
                Rc::new(declaration.evaluate(&ctx.config.theme, &units))
            })
            .clone();

        let dimensions = self.tracker.dimensions();
        let deps = ResolveDeps {
            sheet_generation: self.evaluated.generation(),
            provider_revision: ctx.revision,
            scheme: ctx.scheme,
            mounted,
            dimensions: client.then_some(dimensions),
        };
        let env = ResolveEnv {
            config: ctx.config.clone(),
            scheme: ctx.scheme,
            platform: ctx.platform,
            mounted,
            viewport: self.tracker.shared(),
            sink: ctx.sink.clone(),
        };
        self.resolved
            .get_or_update(deps, || {
                log::debug!("resolving {} styles", sheet.len());
                Rc::new(ResolvedSheet::resolve(&sheet, &env))
            })
            .clone()
    }
}

impl fmt::Debug for StyleSheetInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleSheetInstance")
            .field("mounted", &self.mounted)
            .field("tracker", &self.tracker)
            .finish()
    }
}

/// A dynamic style bound to the resolution environment.
///
/// Every call runs the style function and resolves its result afresh.
#[derive(Clone)]
pub struct StyleFn {
    name: String,
    style: DynamicStyle,
    env: ResolveEnv,
}

impl StyleFn {
    /// Resolves the style for `params`.
    ///
    /// Parameters that fail to serialize are passed as `null`.
    pub fn call<P: Serialize + ?Sized>(&self, params: &P) -> ResolvedStyle {
        let params = serde_json::to_value(params).unwrap_or_else(|err| {
            log::trace!("style parameters for {} failed to serialize: {}", self.name, err);
            Value::Null
        });
        let values = (self.style)(&params);
        self.env.resolve(&self.name, &values)
    }
}

impl fmt::Debug for StyleFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleFn").field("name", &self.name).finish()
    }
}

/// One resolved entry of a [`ResolvedSheet`].
#[derive(Debug, Clone)]
pub enum ResolvedEntry {
    Static(ResolvedStyle),
    Dynamic(StyleFn),
}

/// The resolved styles of one declaration, by name.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSheet {
    entries: IndexMap<String, ResolvedEntry>,
}

impl ResolvedSheet {
    /// Resolves every entry of `sheet` in `env`.
    pub fn resolve(sheet: &StyleSheet, env: &ResolveEnv) -> Self {
        let entries = sheet
            .entries
            .iter()
            .map(|(name, entry)| {
                let resolved = match entry.clone().flatten() {
                    FlatEntry::Dynamic(style) => ResolvedEntry::Dynamic(StyleFn {
                        name: name.clone(),
                        style,
                        env: env.clone(),
                    }),
                    FlatEntry::Static(values) => ResolvedEntry::Static(env.resolve(name, &values)),
                };
                (name.clone(), resolved)
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedEntry> {
        self.entries.get(name)
    }

    /// The resolved static style named `name`.
    pub fn style(&self, name: &str) -> Option<&ResolvedStyle> {
        match self.entries.get(name)? {
            ResolvedEntry::Static(style) => Some(style),
            ResolvedEntry::Dynamic(_) => None,
        }
    }

    /// Calls the dynamic style named `name`. Static styles ignore `params`.
    pub fn call<P: Serialize + ?Sized>(&self, name: &str, params: &P) -> Option<ResolvedStyle> {
        match self.entries.get(name)? {
            ResolvedEntry::Static(style) => Some(style.clone()),
            ResolvedEntry::Dynamic(style) => Some(style.call(params)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::platform::Platform;
    use crate::viewport::ManualViewport;
    use serde_json::json;
    use std::cell::Cell;

    fn provider(platform: Platform, viewport: &ManualViewport) -> Rc<StyleProvider> {
        let config = Config::builder()
            .breakpoint("xs", 0)
            .breakpoint("md", 500)
            .color_var("primary", ("#fff", "#000"))
            .build();
        StyleProvider::builder(config)
            .platform(platform)
            .viewport(Rc::new(viewport.clone()))
            .build()
    }

    #[test]
    fn test_list_of_statics_layers_left_to_right() {
        let entry = StyleEntry::List(vec![
            Some(json!({ "color": "red", "padding": 1 }).into()),
            None,
            Some(json!({ "color": "blue" }).into()),
        ])
        .flatten();
        let FlatEntry::Static(values) = entry else {
            panic!("expected static entry");
        };
        assert_eq!(Value::Object(values), json!({ "color": "blue", "padding": 1 }));
    }

    #[test]
    fn test_list_with_dynamic_member_is_dynamic() {
        let entry = StyleEntry::List(vec![
            Some(json!({ "padding": 1 }).into()),
            Some(StyleEntry::dynamic(|p| json!({ "padding": p["pad"].clone() }))),
        ])
        .flatten();
        let FlatEntry::Dynamic(style) = entry else {
            panic!("expected dynamic entry");
        };
        assert_eq!(Value::Object(style(&json!({ "pad": 9 }))), json!({ "padding": 9 }));
    }

    #[test]
    fn test_nested_lists_flatten_in_order() {
        let entry = StyleEntry::List(vec![
            Some(json!({ "margin": 1 }).into()),
            Some(StyleEntry::List(vec![
                Some(json!({ "margin": 2, "color": "red" }).into()),
                Some(StyleEntry::List(vec![Some(json!({ "color": "green" }).into())])),
            ])),
            Some(StyleEntry::dynamic(|p| json!({ "opacity": p["o"].clone() }))),
        ])
        .flatten();
        let FlatEntry::Dynamic(style) = entry else {
            panic!("expected dynamic entry");
        };
        assert_eq!(
            Value::Object(style(&json!({ "o": 0.5 }))),
            json!({ "margin": 2, "color": "green", "opacity": 0.5 })
        );
    }

    #[test]
    fn test_empty_list_flattens_to_empty_static() {
        let entry = StyleEntry::List(vec![None, None]).flatten();
        let FlatEntry::Static(values) = entry else {
            panic!("expected static entry");
        };
        assert!(values.is_empty());
    }

    #[test]
    fn test_entry_from_json_array_skips_falsy() {
        let entry = StyleEntry::from(json!([{ "a": 1 }, null, false, { "b": 2 }])).flatten();
        let FlatEntry::Static(values) = entry else {
            panic!("expected static entry");
        };
        assert_eq!(Value::Object(values), json!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn test_native_resolves_immediately() {
        let viewport = ManualViewport::new(Dimensions::new(600.0, 800.0));
        let provider = provider(Platform::Ios, &viewport);
        let factory = create_style_sheet(json!({ "box": { "color": { "xs": "red", "md": "blue" } } }));

        let mut instance = factory.instance(&provider);
        assert!(!instance.is_mounted());
        assert!(!instance.is_tracking_viewport());

        let sheet = instance.styles();
        assert_eq!(sheet.style("box").unwrap().get("color"), Some(&json!("blue")));
        assert!(instance.is_tracking_viewport());
        assert!(provider.sink().is_empty());
    }

    #[test]
    fn test_markup_switches_to_client_after_mount() {
        let viewport = ManualViewport::new(Dimensions::new(600.0, 800.0));
        let provider = provider(Platform::Web, &viewport);
        let factory = create_style_sheet(json!({ "box": { "color": { "xs": "red", "md": "blue" } } }));
        let mut instance = factory.instance(&provider);

        let before = instance.styles();
        assert!(before.style("box").unwrap().class_name().is_some());
        assert!(!instance.is_tracking_viewport());
        assert_eq!(viewport.listener_count(), 0);

        instance.mount();
        let after = instance.styles();
        assert_eq!(after.style("box").unwrap().get("color"), Some(&json!("blue")));
        assert_eq!(viewport.listener_count(), 1);
    }

    #[test]
    fn test_viewport_change_rerenders_without_reevaluating() {
        let viewport = ManualViewport::new(Dimensions::new(600.0, 800.0));
        let provider = provider(Platform::Android, &viewport);
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let factory = create_themed_style_sheet(move |_, _| {
            counter.set(counter.get() + 1);
            StyleSheet::new().style("box", json!({ "color": { "xs": "red", "md": "blue" } }))
        });
        let mut instance = factory.instance(&provider);

        let first = instance.styles();
        let again = instance.styles();
        assert!(Rc::ptr_eq(&first, &again));

        viewport.set(Dimensions::new(300.0, 800.0));
        let narrow = instance.styles();
        assert_eq!(narrow.style("box").unwrap().get("color"), Some(&json!("red")));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_theme_change_reevaluates_declaration() {
        let viewport = ManualViewport::new(Dimensions::new(600.0, 800.0));
        let provider = provider(Platform::Ios, &viewport);
        let factory = create_themed_style_sheet(|theme, _| {
            StyleSheet::new().style("text", json!({ "color": theme.get("colors.text").cloned() }))
        });
        let mut instance = factory.instance(&provider);
        assert!(instance.styles().style("text").unwrap().get("color").is_none());

        provider.set_config(
            Config::builder()
                .breakpoint("xs", 0)
                .theme(Theme::new().add("colors.text", "#222"))
                .build(),
        );
        assert_eq!(
            instance.styles().style("text").unwrap().get("color"),
            Some(&json!("#222"))
        );
    }

    #[test]
    fn test_scheme_change_reresolves_color_vars() {
        let viewport = ManualViewport::new(Dimensions::new(600.0, 800.0));
        let provider = provider(Platform::Ios, &viewport);
        let factory = create_style_sheet(json!({ "text": { "color": "var(--primary)" } }));
        let mut instance = factory.instance(&provider);

        assert_eq!(instance.styles().style("text").unwrap().get("color"), Some(&json!("#fff")));
        provider.set_color_scheme(crate::theme::SchemeChoice::Dark);
        assert_eq!(instance.styles().style("text").unwrap().get("color"), Some(&json!("#000")));
    }

    #[test]
    fn test_dynamic_entry_reads_live_viewport() {
        let viewport = ManualViewport::new(Dimensions::new(600.0, 800.0));
        let provider = provider(Platform::Ios, &viewport);
        let factory = create_style_sheet(StyleSheet::new().dynamic("box", |params| {
            json!({ "color": { "xs": params["small"].clone(), "md": params["large"].clone() } })
        }));
        let mut instance = factory.instance(&provider);
        let sheet = instance.styles();
        let params = json!({ "small": "red", "large": "blue" });

        assert_eq!(sheet.call("box", &params).unwrap().get("color"), Some(&json!("blue")));
        assert!(sheet.style("box").is_none());

        viewport.set(Dimensions::new(300.0, 800.0));
        let sheet = instance.styles();
        assert_eq!(sheet.call("box", &params).unwrap().get("color"), Some(&json!("red")));
    }

    #[test]
    fn test_dynamic_entries_get_distinct_classes_per_output() {
        let viewport = ManualViewport::new(Dimensions::new(600.0, 800.0));
        let provider = provider(Platform::Web, &viewport);
        let factory = create_style_sheet(
            StyleSheet::new().dynamic("box", |params| json!({ "width": params["w"].clone() })),
        );
        let sheet = factory.instance(&provider).styles();

        let a = sheet.call("box", &json!({ "w": 10 })).unwrap();
        let b = sheet.call("box", &json!({ "w": 20 })).unwrap();
        assert_ne!(a.class_name(), b.class_name());
    }

    #[test]
    fn test_units_mode_follows_mount_on_markup() {
        let viewport = ManualViewport::new(Dimensions::new(400.0, 800.0));
        let provider = provider(Platform::Web, &viewport);
        let factory = create_themed_style_sheet(|_, units| {
            StyleSheet::new().style("half", json!({ "width": units.vw(50.0) }))
        });
        let mut instance = factory.instance(&provider);

        let sheet = instance.styles();
        let class = sheet.style("half").unwrap().class_name().unwrap().to_string();
        assert!(provider
            .sink()
            .contains(&format!(".{}{{width: 50vw !important;}}", class)));

        instance.mount();
        let sheet = instance.styles();
        assert_eq!(sheet.style("half").unwrap().get("width"), Some(&json!(200)));
    }

    #[test]
    fn test_dropping_instance_detaches_listener() {
        let viewport = ManualViewport::new(Dimensions::new(400.0, 800.0));
        let provider = provider(Platform::Ios, &viewport);
        let factory = create_style_sheet(json!({ "a": { "flex": 1 } }));
        {
            let mut instance = factory.instance(&provider);
            instance.styles();
            assert_eq!(viewport.listener_count(), 1);
        }
        assert_eq!(viewport.listener_count(), 0);
    }
}
