//! Selection state and its synchronization with the rendered panel.
//!
//! The source control stays authoritative for the selected value(s). This
//! module derives everything else from it:
//!
//! - the checked state of every rendered input ([`sync_checked`])
//! - the human-readable summary shown in dropdown mode ([`summary_text`])
//!
//! Values that do not resolve through the [`OptionIndex`] are skipped
//! silently, so a selection that drifted from the rendered option set never
//! breaks rendering.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::layout::{InputHandle, PanelLayout};

/// The selection as read from or written to the source control.
///
/// Serialized untagged: `null` and `"a"` are single values, `["a", "b"]` is a
/// multi-selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    /// Single-select: at most one value.
    Single(Option<String>),
    /// Multi-select: a list of values with no required ordering semantics.
    Multiple(Vec<String>),
}

impl Default for SelectionValue {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl SelectionValue {
    /// The selected values, in stored order.
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => value.as_slice(),
            Self::Multiple(values) => values,
        }
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Whether `value` is selected.
    pub fn contains(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }

    /// Convert into a value list.
    pub fn into_multiple(self) -> Vec<String> {
        match self {
            Self::Single(value) => value.into_iter().collect(),
            Self::Multiple(values) => values,
        }
    }

    /// Convert into a single value, keeping the first entry of a list.
    pub fn into_single(self) -> Option<String> {
        match self {
            Self::Single(value) => value,
            Self::Multiple(values) => values.into_iter().next(),
        }
    }

    /// Whether both selections hold the same members, ignoring order and
    /// duplicates.
    pub fn same_members(&self, other: &SelectionValue) -> bool {
        same_members(self.values(), other.values())
    }
}

impl From<&str> for SelectionValue {
    fn from(value: &str) -> Self {
        Self::Single(Some(value.to_string()))
    }
}

impl From<Vec<String>> for SelectionValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

/// Compare two value lists as unordered sets.
pub fn same_members(a: &[String], b: &[String]) -> bool {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}

/// What the index knows about one rendered option.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// The rendered input bound to the value.
    pub handle: InputHandle,
    /// The display text, without indentation.
    pub text: String,
    /// Whether the option is disabled.
    pub disabled: bool,
}

/// Map from option value to its rendered input and display text.
///
/// Keys are exactly the leaf values of the option model the panel was built
/// from. When two leaves share a value the later one wins.
#[derive(Debug, Clone, Default)]
pub struct OptionIndex {
    entries: HashMap<String, IndexEntry>,
}

impl OptionIndex {
    /// Register a rendered option.
    pub fn insert(&mut self, value: impl Into<String>, entry: IndexEntry) {
        self.entries.insert(value.into(), entry);
    }

    /// Look up a value.
    pub fn get(&self, value: &str) -> Option<&IndexEntry> {
        self.entries.get(value)
    }

    /// Whether the value is rendered.
    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(value)
    }

    /// Display text of a value.
    pub fn text(&self, value: &str) -> Option<&str> {
        self.entries.get(value).map(|entry| entry.text.as_str())
    }

    /// Number of indexed values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the indexed values in arbitrary order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Clear every checked flag, then check each input whose value is selected.
///
/// Returns the handles whose checked state flipped, in render order.
pub fn sync_checked(panel: &mut PanelLayout, selected: &SelectionValue) -> Vec<InputHandle> {
    let wanted: HashSet<InputHandle> = selected
        .values()
        .iter()
        .filter_map(|value| panel.index().get(value).map(|entry| entry.handle))
        .collect();

    let mut flipped = Vec::new();
    for handle in panel.render_order().to_vec() {
        let checked = wanted.contains(&handle);
        if let Some(input) = panel.input_mut(handle)
            && input.checked != checked
        {
            input.checked = checked;
            flipped.push(handle);
        }
    }
    flipped
}

/// Join the display text of each resolvable selected value.
///
/// A single-select always yields one entry, empty when the value does not
/// resolve; a multi-select skips unresolved values.
pub fn summary_text(index: &OptionIndex, selected: &SelectionValue, separator: &str) -> String {
    match selected {
        SelectionValue::Single(value) => value
            .as_deref()
            .and_then(|v| index.text(v))
            .unwrap_or_default()
            .to_string(),
        SelectionValue::Multiple(values) => values
            .iter()
            .filter_map(|v| index.text(v))
            .collect::<Vec<_>>()
            .join(separator),
    }
}
