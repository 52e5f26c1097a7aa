//! Collector for CSS rules generated on the markup surface.
//!
//! A [`StyleSink`] records every rule it is given, once per exact rule
//! string, in insertion order, for the life of the sink. It is constructed
//! explicitly and shared through an `Arc` so that whatever assembles
//! server-rendered output can read it with [`StyleSink::style_element`].
//!
//! When a [`StyleDocument`] is attached (a live browser document, say), the
//! sink lazily asks it for exactly one style sheet and forwards each new
//! rule to it. Without a document, rules are only recorded.
//!
//! The sink is safe to share across threads: the rule set and the lazily
//! created sheet live behind one mutex, so the create-on-first-use check
//! and the insertion happen atomically.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use indexmap::IndexSet;
use minijinja::Environment;
use serde::Serialize;

use crate::error::MarkupError;

/// Element id used for the serialized style block.
pub const STYLE_ELEMENT_ID: &str = "rn-responsive-stylesheet";

const STYLE_ELEMENT_TEMPLATE: &str =
    r#"<style id="{{ id }}" type="text/css">{{ css | safe }}</style>"#;

/// A style sheet living in a document, accepting rules by index.
pub trait StyleTarget: Send {
    /// Inserts `rule` at position `index`.
    fn insert_rule(&mut self, rule: &str, index: usize);

    /// Number of rules currently in the sheet.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A markup document able to host a style sheet.
pub trait StyleDocument: Send {
    /// Creates a new, empty style element and returns its sheet.
    fn create_style_sheet(&mut self) -> Box<dyn StyleTarget>;
}

#[derive(Default)]
struct SinkState {
    rules: IndexSet<String>,
    document: Option<Box<dyn StyleDocument>>,
    sheet: Option<Box<dyn StyleTarget>>,
}

/// Append-only, deduplicated set of CSS rules.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::StyleSink;
///
/// let sink = StyleSink::new();
/// assert!(sink.insert(".a{color: red !important;}"));
/// assert!(!sink.insert(".a{color: red !important;}"));
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.css_text(), ".a{color: red !important;}");
/// ```
#[derive(Default)]
pub struct StyleSink {
    state: Mutex<SinkState>,
}

impl StyleSink {
    /// Creates a sink with no attached document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that forwards new rules into `document`.
    pub fn with_document(document: impl StyleDocument + 'static) -> Self {
        Self {
            state: Mutex::new(SinkState {
                document: Some(Box::new(document)),
                ..SinkState::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records `rule`, returning `true` if it had not been seen before.
    ///
    /// New rules are appended to the document's sheet when a document is
    /// attached; the sheet is created on the first such insertion.
    pub fn insert(&self, rule: impl Into<String>) -> bool {
        let rule = rule.into();
        let mut state = self.lock();
        if state.rules.contains(&rule) {
            return false;
        }

        let SinkState {
            document, sheet, ..
        } = &mut *state;
        if let Some(document) = document.as_mut() {
            let sheet = sheet.get_or_insert_with(|| {
                log::debug!("creating style sheet for injected rules");
                document.create_style_sheet()
            });
            let index = sheet.len();
            sheet.insert_rule(&rule, index);
        }

        log::debug!("injected style rule: {}", rule);
        state.rules.insert(rule);
        true
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.lock().rules.contains(rule)
    }

    pub fn len(&self) -> usize {
        self.lock().rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().rules.is_empty()
    }

    /// Every recorded rule, in insertion order.
    pub fn rules(&self) -> Vec<String> {
        self.lock().rules.iter().cloned().collect()
    }

    /// All recorded rules concatenated into one stylesheet body.
    pub fn css_text(&self) -> String {
        self.lock()
            .rules
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The style block to embed in server-rendered document head output.
    pub fn style_element(&self) -> StyleElement {
        StyleElement {
            id: STYLE_ELEMENT_ID.to_string(),
            css: self.css_text(),
        }
    }
}

impl fmt::Debug for StyleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("StyleSink")
            .field("rules", &state.rules.len())
            .field("document", &state.document.is_some())
            .field("sheet", &state.sheet.is_some())
            .finish()
    }
}

/// A serializable `<style>` element holding every collected rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleElement {
    pub id: String,
    pub css: String,
}

impl StyleElement {
    /// Renders the element as HTML.
    pub fn to_html(&self) -> Result<String, MarkupError> {
        let mut env = Environment::new();
        env.add_template("style_element.html", STYLE_ELEMENT_TEMPLATE)?;
        let html = env.get_template("style_element.html")?.render(self)?;
        Ok(html)
    }
}
