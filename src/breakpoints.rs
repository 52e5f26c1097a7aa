//! Named minimum-width thresholds.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered table of breakpoint names to minimum viewport widths.
///
/// Conventionally exactly one entry sits at width 0: that bucket is the
/// default, and values keyed by it are never treated as a media query.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::Breakpoints;
///
/// let bp = Breakpoints::new().add("xs", 0).add("lg", 1024).add("md", 768);
///
/// assert_eq!(bp.threshold("md"), Some(768));
/// assert!(bp.is_default("xs"));
/// let order: Vec<&str> = bp.sorted().map(|(name, _)| name).collect();
/// assert_eq!(order, vec!["xs", "md", "lg"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakpoints {
    table: IndexMap<String, u32>,
}

impl Breakpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a breakpoint, returning the updated table for chaining.
    ///
    /// Re-adding an existing name replaces its threshold.
    pub fn add(mut self, name: impl Into<String>, min_width: u32) -> Self {
        self.table.insert(name.into(), min_width);
        self
    }

    pub fn threshold(&self, name: &str) -> Option<u32> {
        self.table.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Whether `name` is the zero-threshold default bucket.
    pub fn is_default(&self, name: &str) -> bool {
        self.threshold(name) == Some(0)
    }

    /// Entries in ascending threshold order. Ties keep declaration order.
    pub fn sorted(&self) -> impl Iterator<Item = (&str, u32)> {
        let mut entries: Vec<(&str, u32)> =
            self.table.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by_key(|(_, width)| *width);
        entries.into_iter()
    }

    /// Sorts `names` ascending by threshold. Unknown names sort last.
    pub fn sort_names<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        let mut names: Vec<&str> = names.into_iter().collect();
        names.sort_by_key(|name| self.threshold(name).unwrap_or(u32::MAX));
        names
    }

    /// Returns `true` if some breakpoint has threshold 0.
    pub fn has_default(&self) -> bool {
        self.table.values().any(|w| *w == 0)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.table.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Breakpoints {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        Self {
            table: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
