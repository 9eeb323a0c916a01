//! Bulk action engine.
//!
//! Actions are extra controls rendered above the option list of a
//! multi-select widget:
//!
//! - **select** / **deselect**: one-shot buttons adding or removing a fixed
//!   list of values
//! - **toggle**: a tri-state checkbox reflecting how much of its target list
//!   is selected
//! - **quick filter**: a text field hiding options that do not match
//!
//! Actions are configured through [`ActionSpec`] and live at runtime as
//! [`ActionDescriptor`]s owned by the widget. Single-select widgets carry no
//! actions.
//!
//! Toggle and button texts may contain the `{count}` and `{total}` tokens,
//! replaced by the toggle's current counts.

use std::collections::HashSet;

use lattice_select_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::layout::{InputHandle, PanelLayout};
use crate::selection::{OptionIndex, SelectionValue};

/// Token replaced by the number of selected eligible targets.
pub const COUNT_TOKEN: &str = "{count}";
/// Token replaced by the number of eligible targets.
pub const TOTAL_TOKEN: &str = "{total}";

const DEFAULT_SELECT_TEXT: &str = "Select all";
const DEFAULT_DESELECT_TEXT: &str = "Deselect all";
const DEFAULT_TOGGLE_TEXT: &str = "{count} / {total}";

/// Configured action, as found in settings files.
///
/// ```
/// use lattice_select::ActionSpec;
///
/// let spec: ActionSpec =
///     serde_json::from_str(r#"{"kind": "toggle", "values": ["a", "b"], "text": "Fruits ({count})"}"#)
///         .unwrap();
/// assert!(matches!(spec, ActionSpec::Toggle { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActionSpec {
    Select {
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Deselect {
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Toggle {
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    QuickFilter {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
}

/// Visual state of a tri-state toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToggleState {
    #[default]
    Unchecked,
    Checked,
    Indeterminate,
}

impl ToggleState {
    /// Derive the state from the selected and eligible counts.
    ///
    /// A toggle without eligible targets is unchecked.
    pub fn from_counts(count: usize, total: usize) -> Self {
        if count == 0 || total == 0 {
            Self::Unchecked
        } else if count >= total {
            Self::Checked
        } else {
            Self::Indeterminate
        }
    }
}

/// Derived display state of a toggle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleDisplay {
    /// Eligible targets that are currently selected.
    pub count: usize,
    /// Targets that are rendered and not disabled.
    pub total: usize,
    pub state: ToggleState,
}

impl ToggleDisplay {
    /// Compute the display state of a target list against the rendered
    /// options and the current selection.
    pub fn compute(targets: &[String], index: &OptionIndex, selected: &SelectionValue) -> Self {
        let mut seen = HashSet::new();
        let mut total = 0;
        let mut count = 0;
        for target in targets {
            if !seen.insert(target.as_str()) {
                continue;
            }
            match index.get(target) {
                Some(entry) if !entry.disabled => {
                    total += 1;
                    if selected.contains(target) {
                        count += 1;
                    }
                }
                _ => {}
            }
        }
        Self {
            count,
            total,
            state: ToggleState::from_counts(count, total),
        }
    }

    /// Substitute the count tokens of a text template.
    pub fn render(&self, template: &str) -> String {
        template
            .replace(COUNT_TOKEN, &self.count.to_string())
            .replace(TOTAL_TOKEN, &self.total.to_string())
    }
}

/// A runtime action control.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionDescriptor {
    Select {
        targets: Vec<String>,
        text: String,
    },
    Deselect {
        targets: Vec<String>,
        text: String,
    },
    Toggle {
        targets: Vec<String>,
        /// Text template, may contain count tokens.
        text: String,
        display: ToggleDisplay,
    },
    QuickFilter {
        placeholder: Option<String>,
        /// The current filter text.
        text: String,
    },
}

impl ActionDescriptor {
    /// Build the runtime control for a configured action.
    pub fn from_spec(spec: &ActionSpec) -> Self {
        match spec {
            ActionSpec::Select { values, text } => Self::Select {
                targets: values.clone(),
                text: text.clone().unwrap_or_else(|| DEFAULT_SELECT_TEXT.to_string()),
            },
            ActionSpec::Deselect { values, text } => Self::Deselect {
                targets: values.clone(),
                text: text.clone().unwrap_or_else(|| DEFAULT_DESELECT_TEXT.to_string()),
            },
            ActionSpec::Toggle { values, text } => Self::Toggle {
                targets: values.clone(),
                text: text.clone().unwrap_or_else(|| DEFAULT_TOGGLE_TEXT.to_string()),
                display: ToggleDisplay::default(),
            },
            ActionSpec::QuickFilter { placeholder } => Self::QuickFilter {
                placeholder: placeholder.clone(),
                text: String::new(),
            },
        }
    }

    /// The fixed target list, `None` for the quick filter.
    pub fn targets(&self) -> Option<&[String]> {
        match self {
            Self::Select { targets, .. }
            | Self::Deselect { targets, .. }
            | Self::Toggle { targets, .. } => Some(targets),
            Self::QuickFilter { .. } => None,
        }
    }

    /// The text to display, with count tokens substituted for toggles.
    pub fn label(&self) -> String {
        match self {
            Self::Select { text, .. } | Self::Deselect { text, .. } => text.clone(),
            Self::Toggle { text, display, .. } => display.render(text),
            Self::QuickFilter { text, .. } => text.clone(),
        }
    }

    /// The toggle display state, if this is a toggle.
    pub fn toggle_display(&self) -> Option<ToggleDisplay> {
        match self {
            Self::Toggle { display, .. } => Some(*display),
            _ => None,
        }
    }
}

/// Build the runtime controls for a list of configured actions.
pub fn build_actions(specs: &[ActionSpec]) -> Vec<ActionDescriptor> {
    specs.iter().map(ActionDescriptor::from_spec).collect()
}

/// Recompute every toggle's display state.
///
/// Returns the indices of the actions whose display changed.
pub fn refresh_toggles(
    actions: &mut [ActionDescriptor],
    index: &OptionIndex,
    selected: &SelectionValue,
) -> Vec<usize> {
    let mut changed = Vec::new();
    for (i, action) in actions.iter_mut().enumerate() {
        if let ActionDescriptor::Toggle {
            targets: values,
            display,
            ..
        } = action
        {
            let next = ToggleDisplay::compute(values, index, selected);
            if next != *display {
                *display = next;
                changed.push(i);
            }
        }
    }
    if !changed.is_empty() {
        tracing::trace!(target: targets::ACTIONS, ?changed, "toggle displays updated");
    }
    changed
}

/// Add `values` to a selection.
///
/// Existing entries keep their order. New values are appended while walking
/// `values` from its end, so they land in reverse input order.
pub fn union_selection(current: &[String], values: &[String]) -> Vec<String> {
    let mut result = current.to_vec();
    for value in values.iter().rev() {
        if !result.contains(value) {
            result.push(value.clone());
        }
    }
    result
}

/// Remove `values` from a selection, keeping the survivors' order.
pub fn subtract_selection(current: &[String], values: &[String]) -> Vec<String> {
    current
        .iter()
        .filter(|value| !values.contains(*value))
        .cloned()
        .collect()
}

/// Case-insensitive substring match of a filter against value or text.
///
/// An empty filter matches everything.
pub fn matches_filter(filter: &str, value: &str, text: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    value.to_lowercase().contains(&needle) || text.to_lowercase().contains(&needle)
}

/// Hide every rendered input that does not match `filter`.
///
/// Returns the handles whose hidden flag flipped, in render order.
pub fn apply_filter(panel: &mut PanelLayout, filter: &str) -> Vec<InputHandle> {
    let mut flipped = Vec::new();
    for handle in panel.render_order().to_vec() {
        if let Some(input) = panel.input_mut(handle) {
            let hidden = !matches_filter(filter, &input.value, &input.text);
            if input.hidden != hidden {
                input.hidden = hidden;
                flipped.push(handle);
            }
        }
    }
    flipped
}
