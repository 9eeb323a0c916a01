//! Lattice Select - a custom-rendered replacement for native single and
//! multi-selection controls.
//!
//! The widget keeps the replaced control authoritative for its value and
//! adds on top of it:
//!
//! - **Layout grouping**: separator markers split the options into columns
//!   and rows ([`layout`])
//! - **Bulk actions**: select, deselect, tri-state toggle and quick filter
//!   controls for multi-select widgets ([`actions`])
//! - **Dropdown mode**: a summary line with an on-demand panel, with at most
//!   one panel open at a time ([`dropdown`])
//!
//! This crate re-exports the core systems of `lattice-select-core`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lattice_select::prelude::*;
//! use lattice_select::source::{NativeSelect, SourceOption};
//!
//! let select = NativeSelect::single()
//!     .with_option(SourceOption::new("red", "Red"))
//!     .with_option(SourceOption::new("green", "Green"));
//!
//! let coordinator = Arc::new(DropdownCoordinator::new());
//! let mut widget = CustomSelect::builder(select)
//!     .coordinator(coordinator.clone())
//!     .build()
//!     .unwrap();
//!
//! widget.set_val(SelectionValue::from("green"));
//! assert_eq!(widget.summary(), Some("Green"));
//!
//! widget.open();
//! assert!(coordinator.is_active(widget.id()));
//! ```

pub use lattice_select_core::*;

pub mod actions;
pub mod command;
pub mod dropdown;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod prelude;
pub mod selection;
pub mod settings;
pub mod source;
pub mod surface;
mod widget;

pub use actions::{ActionDescriptor, ActionSpec, ToggleDisplay, ToggleState};
pub use command::{Command, CommandName, CommandOutput};
pub use dropdown::{DropdownCoordinator, DropdownHandle, InteractionTarget, PanelPlacement, WidgetId};
pub use geometry::Rect;
pub use layout::{InputHandle, InputKind, LayoutEngine, PanelLayout, PanelNode, PanelTreeDebug};
pub use model::{OptionModel, OptionNode, SeparatorKind};
pub use selection::{OptionIndex, SelectionValue};
pub use settings::{DisplayMode, Settings, SettingsPatch};
pub use source::{NativeSelect, SourceControl};
pub use surface::{NullSurface, Surface};
pub use widget::{CustomSelect, CustomSelectBuilder, SelectEvent};
