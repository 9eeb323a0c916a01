//! The source control a widget replaces.
//!
//! A [`SourceControl`] is the native single/multi-selection control that stays
//! authoritative for the selected value(s). The widget reads and writes the
//! value through the control's *original* accessor, so nothing written here is
//! ever intercepted by the widget again.
//!
//! [`NativeSelect`] is an in-memory control used by headless hosts and tests.
//!
//! # Example
//!
//! ```
//! use lattice_select::source::{NativeSelect, SourceOption};
//! use lattice_select::{SelectionValue, SeparatorKind, SourceControl};
//!
//! let select = NativeSelect::multiple()
//!     .with_option(SourceOption::new("apple", "Apple"))
//!     .with_option(SourceOption::separator(SeparatorKind::Vertical))
//!     .with_option(SourceOption::new("banana", "Banana").with_disabled(true))
//!     .with_value(SelectionValue::Multiple(vec!["apple".into()]));
//!
//! assert!(select.is_multiple());
//! assert_eq!(select.options().len(), 3);
//! ```

use crate::geometry::Rect;
use crate::model::SeparatorKind;
use crate::selection::SelectionValue;

/// A declared `option` of the source control.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceOption {
    /// The submitted value.
    pub value: String,
    /// The visible text, possibly starting with no-break spaces for indentation.
    pub text: String,
    /// Whether the option is disabled.
    pub disabled: bool,
    /// Styling class hint.
    pub css_class: Option<String>,
    /// Inline style hint.
    pub css_style: Option<String>,
    /// Separator marker. A marked option is not selectable.
    pub separator: Option<SeparatorKind>,
}

impl SourceOption {
    /// Create a new option.
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a separator marker option.
    pub fn separator(kind: SeparatorKind) -> Self {
        Self {
            separator: Some(kind),
            ..Default::default()
        }
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the class hint using builder pattern.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Set the style hint using builder pattern.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.css_style = Some(style.into());
        self
    }
}

/// A declared `optgroup` of the source control.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceGroup {
    pub label: String,
    pub css_class: Option<String>,
    pub css_style: Option<String>,
    pub children: Vec<SourceNode>,
}

impl SourceGroup {
    /// Create a new group with the given label and children.
    pub fn new(label: impl Into<String>, children: Vec<SourceNode>) -> Self {
        Self {
            label: label.into(),
            children,
            ..Default::default()
        }
    }

    /// Set the class hint using builder pattern.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Set the style hint using builder pattern.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.css_style = Some(style.into());
        self
    }
}

/// One child of the source control's declarative option structure.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceNode {
    Option(SourceOption),
    Group(SourceGroup),
}

impl From<SourceOption> for SourceNode {
    fn from(option: SourceOption) -> Self {
        Self::Option(option)
    }
}

impl From<SourceGroup> for SourceNode {
    fn from(group: SourceGroup) -> Self {
        Self::Group(group)
    }
}

/// The authoritative control the widget replaces.
///
/// Implemented by the hosting layer. Every method is called synchronously on
/// the interaction turn that triggered it.
pub trait SourceControl: Send {
    /// Whether the control accepts several values.
    fn is_multiple(&self) -> bool;

    /// Read the current value(s) through the original accessor.
    fn value(&self) -> SelectionValue;

    /// Write new value(s) through the original accessor.
    ///
    /// This must not call back into the widget.
    fn set_value(&mut self, value: SelectionValue);

    /// Enumerate the declared options and groups, in order.
    fn options(&self) -> Vec<SourceNode>;

    /// The declared display-type hint (`data-type`), if any.
    fn data_type(&self) -> Option<String> {
        None
    }

    /// Whether the control carries the given class.
    fn has_class(&self, _class: &str) -> bool {
        false
    }

    /// The rendered bounds of the control in page coordinates.
    fn bounds(&self) -> Rect {
        Rect::ZERO
    }
}

/// An in-memory source control.
///
/// Values are stored exactly as written: a multi-select keeps the written
/// order (duplicates removed), a single-select keeps the written value.
#[derive(Debug, Clone, Default)]
pub struct NativeSelect {
    multiple: bool,
    options: Vec<SourceNode>,
    selected: Vec<String>,
    classes: Vec<String>,
    data_type: Option<String>,
    bounds: Rect,
}

impl NativeSelect {
    /// Create an empty single-select control.
    pub fn single() -> Self {
        Self::default()
    }

    /// Create an empty multi-select control.
    pub fn multiple() -> Self {
        Self {
            multiple: true,
            ..Default::default()
        }
    }

    /// Append an option using builder pattern.
    pub fn with_option(mut self, option: SourceOption) -> Self {
        self.options.push(SourceNode::Option(option));
        self
    }

    /// Append a group using builder pattern.
    pub fn with_group(mut self, group: SourceGroup) -> Self {
        self.options.push(SourceNode::Group(group));
        self
    }

    /// Append several `(value, text)` options using builder pattern.
    pub fn with_items<V, T>(mut self, items: impl IntoIterator<Item = (V, T)>) -> Self
    where
        V: Into<String>,
        T: Into<String>,
    {
        self.options.extend(
            items
                .into_iter()
                .map(|(value, text)| SourceNode::Option(SourceOption::new(value, text))),
        );
        self
    }

    /// Set the selected value(s) using builder pattern.
    pub fn with_value(mut self, value: SelectionValue) -> Self {
        self.set_value(value);
        self
    }

    /// Add a class using builder pattern.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the `data-type` hint using builder pattern.
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Set the rendered bounds using builder pattern.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }
}

impl SourceControl for NativeSelect {
    fn is_multiple(&self) -> bool {
        self.multiple
    }

    fn value(&self) -> SelectionValue {
        if self.multiple {
            SelectionValue::Multiple(self.selected.clone())
        } else {
            SelectionValue::Single(self.selected.first().cloned())
        }
    }

    fn set_value(&mut self, value: SelectionValue) {
        self.selected.clear();
        if self.multiple {
            for v in value.into_multiple() {
                if !self.selected.contains(&v) {
                    self.selected.push(v);
                }
            }
        } else {
            self.selected.extend(value.into_single());
        }
    }

    fn options(&self) -> Vec<SourceNode> {
        self.options.clone()
    }

    fn data_type(&self) -> Option<String> {
        self.data_type.clone()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
