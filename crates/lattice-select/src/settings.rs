//! Widget settings.
//!
//! [`Settings`] holds the complete configuration of one widget. Settings can
//! be built in code, loaded from JSON or TOML, and changed later by merging
//! a [`SettingsPatch`] in which only the present fields take effect.
//!
//! # File format
//!
//! ```toml
//! type = "dropdown"
//! summary_separator = ", "
//!
//! [[actions]]
//! kind = "toggle"
//! values = ["apple", "pear"]
//! text = "Fruits ({count}/{total})"
//!
//! [[actions]]
//! kind = "quickFilter"
//! placeholder = "Search"
//! ```
//!
//! Unknown keys are ignored.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use lattice_select_core::logging::targets;
use lattice_select_core::{Result, SelectError};
use serde::{Deserialize, Serialize};

use crate::actions::ActionSpec;
use crate::dropdown::DEFAULT_PANEL_OVERLAP;
use crate::layout::DEFAULT_INDENT_STEP;
use crate::source::SourceControl;

/// Separator used to join the display texts of the summary.
pub const DEFAULT_SUMMARY_SEPARATOR: &str = "; ";

/// Class that forces list mode on a single-select control.
pub const LIST_CLASS: &str = "csel-list";
/// Class that forces dropdown mode on a multi-select control.
pub const DROPDOWN_CLASS: &str = "csel-dropdown";

/// How the option panel is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// The panel is always visible in place of the control.
    List,
    /// A summary replaces the control; the panel opens on demand.
    Dropdown,
}

impl FromStr for DisplayMode {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "list" => Ok(Self::List),
            "dropdown" => Ok(Self::Dropdown),
            other => Err(SelectError::Settings(format!(
                "unknown display type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Dropdown => "dropdown",
        })
    }
}

/// Complete configuration of one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display mode. Resolved from the control when unset.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMode>,
    /// Bulk actions, in display order. Only used by multi-select widgets.
    pub actions: Vec<ActionSpec>,
    #[serde(alias = "summarySeparator")]
    pub summary_separator: String,
    /// Left padding per leading no-break space of an option text.
    #[serde(alias = "indentStep")]
    pub indent_step: f32,
    /// How far the dropdown panel overlaps the control's bottom edge.
    #[serde(alias = "panelOverlap")]
    pub panel_overlap: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display: None,
            actions: Vec::new(),
            summary_separator: DEFAULT_SUMMARY_SEPARATOR.to_string(),
            indent_step: DEFAULT_INDENT_STEP,
            panel_overlap: DEFAULT_PANEL_OVERLAP,
        }
    }
}

impl Settings {
    /// Set the display mode using builder pattern.
    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = Some(display);
        self
    }

    /// Append an action using builder pattern.
    pub fn with_action(mut self, action: ActionSpec) -> Self {
        self.actions.push(action);
        self
    }

    /// Set the summary separator using builder pattern.
    pub fn with_summary_separator(mut self, separator: impl Into<String>) -> Self {
        self.summary_separator = separator.into();
        self
    }

    /// Parse and validate settings from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate settings from TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SelectError::io(path, e))?;
        let settings = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            _ => {
                return Err(SelectError::Settings(format!(
                    "unsupported settings file '{}', expected .json or .toml",
                    path.display()
                )));
            }
        };
        tracing::debug!(
            target: targets::SETTINGS,
            path = %path.display(),
            actions = settings.actions.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.indent_step.is_finite() || self.indent_step < 0.0 {
            return Err(SelectError::Settings(format!(
                "indent_step must be a non-negative number, got {}",
                self.indent_step
            )));
        }
        if !self.panel_overlap.is_finite() {
            return Err(SelectError::Settings(format!(
                "panel_overlap must be finite, got {}",
                self.panel_overlap
            )));
        }
        Ok(())
    }

    /// Apply the present fields of a patch.
    pub fn merge(&mut self, patch: SettingsPatch) {
        let SettingsPatch {
            display,
            actions,
            summary_separator,
            indent_step,
            panel_overlap,
        } = patch;
        if display.is_some() {
            self.display = display;
        }
        if let Some(actions) = actions {
            self.actions = actions;
        }
        if let Some(separator) = summary_separator {
            self.summary_separator = separator;
        }
        if let Some(step) = indent_step {
            self.indent_step = step;
        }
        if let Some(overlap) = panel_overlap {
            self.panel_overlap = overlap;
        }
    }

    /// The display mode for a control.
    ///
    /// An explicit `type` wins, then the control's `data-type` hint. Without
    /// either, multi-select controls default to list mode unless they carry
    /// [`DROPDOWN_CLASS`], and single-select controls default to dropdown
    /// mode unless they carry [`LIST_CLASS`].
    pub fn resolve_display(&self, source: &dyn SourceControl) -> DisplayMode {
        if let Some(display) = self.display {
            return display;
        }
        if let Some(hint) = source.data_type() {
            match hint.parse() {
                Ok(display) => return display,
                Err(err) => {
                    tracing::warn!(target: targets::SETTINGS, %err, "ignoring data-type hint");
                }
            }
        }
        match (source.is_multiple(), source.has_class(DROPDOWN_CLASS), source.has_class(LIST_CLASS)) {
            (true, true, _) => DisplayMode::Dropdown,
            (true, false, _) => DisplayMode::List,
            (false, _, true) => DisplayMode::List,
            (false, _, false) => DisplayMode::Dropdown,
        }
    }
}

/// A partial settings update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionSpec>>,
    #[serde(alias = "summarySeparator", skip_serializing_if = "Option::is_none")]
    pub summary_separator: Option<String>,
    #[serde(alias = "indentStep", skip_serializing_if = "Option::is_none")]
    pub indent_step: Option<f32>,
    #[serde(alias = "panelOverlap", skip_serializing_if = "Option::is_none")]
    pub panel_overlap: Option<f32>,
}

impl SettingsPatch {
    /// Decode a patch from a JSON object.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Set the display mode using builder pattern.
    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = Some(display);
        self
    }

    /// Replace the action list using builder pattern.
    pub fn with_actions(mut self, actions: Vec<ActionSpec>) -> Self {
        self.actions = Some(actions);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::NativeSelect;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.display, None);
        assert_eq!(settings.summary_separator, "; ");
        assert_eq!(settings.indent_step, 3.0);
        assert_eq!(settings.panel_overlap, 1.0);
        assert!(settings.actions.is_empty());
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let settings = Settings::from_json_str(
            r#"{"type": "list", "summarySeparator": ", ", "theme": "dark",
                "actions": [{"kind": "deselect", "values": ["a"]}]}"#,
        )
        .unwrap();
        assert_eq!(settings.display, Some(DisplayMode::List));
        assert_eq!(settings.summary_separator, ", ");
        assert_eq!(settings.actions.len(), 1);
    }

    #[test]
    fn test_from_toml() {
        let settings = Settings::from_toml_str(
            r#"
type = "dropdown"
indent_step = 5.0

[[actions]]
kind = "quickFilter"
"#,
        )
        .unwrap();
        assert_eq!(settings.display, Some(DisplayMode::Dropdown));
        assert_eq!(settings.indent_step, 5.0);
        assert_eq!(
            settings.actions,
            vec![ActionSpec::QuickFilter { placeholder: None }]
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Settings::from_json_str(r#"{"indent_step": -1.0}"#),
            Err(SelectError::Settings(_))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{"type": "grid"}"#),
            Err(SelectError::Json(_))
        ));
    }

    #[test]
    fn test_merge_only_present_fields() {
        let mut settings = Settings::default().with_summary_separator(" | ");
        let patch = SettingsPatch::from_json_value(serde_json::json!({"type": "dropdown"})).unwrap();
        settings.merge(patch);
        assert_eq!(settings.display, Some(DisplayMode::Dropdown));
        assert_eq!(settings.summary_separator, " | ");

        settings.merge(SettingsPatch::default().with_actions(vec![ActionSpec::QuickFilter {
            placeholder: None,
        }]));
        assert_eq!(settings.display, Some(DisplayMode::Dropdown));
        assert_eq!(settings.actions.len(), 1);
    }

    #[test]
    fn test_resolve_display() {
        let explicit = Settings::default().with_display(DisplayMode::List);
        assert_eq!(
            explicit.resolve_display(&NativeSelect::single().with_data_type("dropdown")),
            DisplayMode::List
        );

        let unset = Settings::default();
        let hinted = NativeSelect::multiple().with_data_type("dropdown");
        assert_eq!(unset.resolve_display(&hinted), DisplayMode::Dropdown);

        assert_eq!(unset.resolve_display(&NativeSelect::multiple()), DisplayMode::List);
        assert_eq!(
            unset.resolve_display(&NativeSelect::multiple().with_class(DROPDOWN_CLASS)),
            DisplayMode::Dropdown
        );
        assert_eq!(unset.resolve_display(&NativeSelect::single()), DisplayMode::Dropdown);
        assert_eq!(
            unset.resolve_display(&NativeSelect::single().with_class(LIST_CLASS)),
            DisplayMode::List
        );

        // An unknown hint falls back to the class rule
        let bogus = NativeSelect::single().with_data_type("grid");
        assert_eq!(unset.resolve_display(&bogus), DisplayMode::Dropdown);
    }

    #[test]
    fn test_display_mode_parse() {
        assert_eq!("list".parse::<DisplayMode>().unwrap(), DisplayMode::List);
        assert!("".parse::<DisplayMode>().is_err());
        assert_eq!(DisplayMode::Dropdown.to_string(), "dropdown");
    }
}
