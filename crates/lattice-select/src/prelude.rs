//! Prelude module for Lattice Select.
//!
//! ```
//! use lattice_select::prelude::*;
//! ```

// ============================================================================
// Signal/Slot and Errors
// ============================================================================

pub use crate::{ConnectionId, Property, Result, SelectError, Signal};

// ============================================================================
// Widget
// ============================================================================

pub use crate::widget::{CustomSelect, CustomSelectBuilder, SelectEvent};
pub use crate::selection::SelectionValue;
pub use crate::settings::{DisplayMode, Settings, SettingsPatch};
pub use crate::actions::{ActionDescriptor, ActionSpec, ToggleState};
pub use crate::dropdown::{DropdownCoordinator, InteractionTarget, PanelPlacement};

// ============================================================================
// Host Collaborators
// ============================================================================

pub use crate::source::{SourceControl, SourceGroup, SourceNode, SourceOption};
pub use crate::surface::{NullSurface, Surface};
pub use crate::model::SeparatorKind;
pub use crate::layout::{InputHandle, PanelLayout, RenderedInput};
