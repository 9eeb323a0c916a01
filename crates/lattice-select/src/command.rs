//! Named command boundary.
//!
//! Hosts that drive widgets by operation name (script bridges, automation)
//! go through [`Command::parse`], which accepts only the public operations
//! listed in [`CommandName`]. Names with a leading underscore are reported as
//! protected, any other unknown name as unknown. Parsing happens before the
//! widget is touched, so a rejected call never mutates state.
//!
//! ```
//! use lattice_select::command::{Command, CommandName};
//! use lattice_select::SelectError;
//! use serde_json::json;
//!
//! let command = Command::parse("addToSelection", &[json!(["a", "b"])]).unwrap();
//! assert_eq!(command.name(), CommandName::AddToSelection);
//!
//! assert!(matches!(
//!     Command::parse("_init", &[]),
//!     Err(SelectError::ProtectedOperation(_))
//! ));
//! ```

use std::fmt;
use std::str::FromStr;

use lattice_select_core::{Result, SelectError};
use serde_json::Value;

use crate::selection::SelectionValue;
use crate::settings::SettingsPatch;

/// The public operations of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    RefreshOptions,
    UpdateSelection,
    UpdateValue,
    Toggle,
    Open,
    Close,
    Val,
    AddToSelection,
    RemoveFromSelection,
    Options,
}

impl CommandName {
    pub const ALL: [CommandName; 10] = [
        Self::RefreshOptions,
        Self::UpdateSelection,
        Self::UpdateValue,
        Self::Toggle,
        Self::Open,
        Self::Close,
        Self::Val,
        Self::AddToSelection,
        Self::RemoveFromSelection,
        Self::Options,
    ];

    /// The name hosts use to invoke the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RefreshOptions => "refreshOptions",
            Self::UpdateSelection => "updateSelection",
            Self::UpdateValue => "updateValue",
            Self::Toggle => "toggle",
            Self::Open => "open",
            Self::Close => "close",
            Self::Val => "val",
            Self::AddToSelection => "addToSelection",
            Self::RemoveFromSelection => "removeFromSelection",
            Self::Options => "options",
        }
    }
}

impl FromStr for CommandName {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(name) = Self::ALL.into_iter().find(|name| name.as_str() == s) {
            return Ok(name);
        }
        if s.starts_with('_') {
            Err(SelectError::ProtectedOperation(s.to_string()))
        } else {
            Err(SelectError::UnknownOperation(s.to_string()))
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A public operation with typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RefreshOptions,
    UpdateSelection,
    UpdateValue,
    Toggle,
    Open,
    Close,
    /// Read the value, or write it when an argument is present.
    Val(Option<SelectionValue>),
    AddToSelection(Vec<String>),
    RemoveFromSelection(Vec<String>),
    Options(SettingsPatch),
}

/// What an invoked command returned.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CommandOutput {
    #[default]
    None,
    Value(SelectionValue),
}

impl CommandOutput {
    /// The returned value, if any.
    pub fn into_value(self) -> Option<SelectionValue> {
        match self {
            Self::Value(value) => Some(value),
            Self::None => None,
        }
    }
}

impl Command {
    pub fn name(&self) -> CommandName {
        match self {
            Self::RefreshOptions => CommandName::RefreshOptions,
            Self::UpdateSelection => CommandName::UpdateSelection,
            Self::UpdateValue => CommandName::UpdateValue,
            Self::Toggle => CommandName::Toggle,
            Self::Open => CommandName::Open,
            Self::Close => CommandName::Close,
            Self::Val(_) => CommandName::Val,
            Self::AddToSelection(_) => CommandName::AddToSelection,
            Self::RemoveFromSelection(_) => CommandName::RemoveFromSelection,
            Self::Options(_) => CommandName::Options,
        }
    }

    /// Build a command from an operation name and JSON arguments.
    ///
    /// `val` takes zero or one argument; `addToSelection` and
    /// `removeFromSelection` take a string or an array of strings; `options`
    /// takes a settings object. The remaining operations take no arguments.
    pub fn parse(name: &str, args: &[Value]) -> Result<Self> {
        let name: CommandName = name.parse()?;
        let max_args = match name {
            CommandName::Val
            | CommandName::AddToSelection
            | CommandName::RemoveFromSelection
            | CommandName::Options => 1,
            _ => 0,
        };
        if args.len() > max_args {
            return Err(SelectError::invalid_arguments(
                name.as_str(),
                format!("expected at most {max_args} argument(s), got {}", args.len()),
            ));
        }

        let command = match name {
            CommandName::RefreshOptions => Self::RefreshOptions,
            CommandName::UpdateSelection => Self::UpdateSelection,
            CommandName::UpdateValue => Self::UpdateValue,
            CommandName::Toggle => Self::Toggle,
            CommandName::Open => Self::Open,
            CommandName::Close => Self::Close,
            CommandName::Val => match args.first() {
                None => Self::Val(None),
                Some(arg) => Self::Val(Some(
                    serde_json::from_value(arg.clone())
                        .map_err(|e| SelectError::invalid_arguments(name.as_str(), e.to_string()))?,
                )),
            },
            CommandName::AddToSelection => Self::AddToSelection(values_arg(name, args)?),
            CommandName::RemoveFromSelection => {
                Self::RemoveFromSelection(values_arg(name, args)?)
            }
            CommandName::Options => {
                let arg = args.first().ok_or_else(|| {
                    SelectError::invalid_arguments(name.as_str(), "expected a settings object")
                })?;
                if !arg.is_object() {
                    return Err(SelectError::invalid_arguments(
                        name.as_str(),
                        "expected a settings object",
                    ));
                }
                Self::Options(
                    SettingsPatch::from_json_value(arg.clone())
                        .map_err(|e| SelectError::invalid_arguments(name.as_str(), e.to_string()))?,
                )
            }
        };
        Ok(command)
    }
}

fn values_arg(name: CommandName, args: &[Value]) -> Result<Vec<String>> {
    match args.first() {
        Some(Value::String(value)) => Ok(vec![value.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    SelectError::invalid_arguments(
                        name.as_str(),
                        format!("expected string values, got {item}"),
                    )
                })
            })
            .collect(),
        Some(other) => Err(SelectError::invalid_arguments(
            name.as_str(),
            format!("expected a string or an array of strings, got {other}"),
        )),
        None => Err(SelectError::invalid_arguments(
            name.as_str(),
            "expected a list of values",
        )),
    }
}
