//! Rendering sink implemented by the hosting layer.
//!
//! The widget keeps the rendered state itself (the [`PanelLayout`], the
//! action controls and the summary text) and reports every change to a
//! [`Surface`] so the host can mirror it into real UI elements. All methods
//! default to doing nothing.

use crate::actions::ActionDescriptor;
use crate::layout::{InputHandle, PanelLayout, RenderedInput};
use crate::settings::DisplayMode;

/// Receives the rendered state of a widget.
pub trait Surface: Send {
    /// A new option panel replaced the previous one.
    ///
    /// Handles of the previous panel are invalid from here on.
    fn mount(&mut self, _panel: &PanelLayout, _actions: &[ActionDescriptor]) {}

    /// The checked or hidden state of one input changed.
    fn input_changed(&mut self, _handle: InputHandle, _input: &RenderedInput) {}

    /// The dropdown summary text changed. Also used as its tooltip.
    fn summary_changed(&mut self, _text: &str) {}

    /// The display state of one action control changed.
    fn action_changed(&mut self, _index: usize, _action: &ActionDescriptor) {}

    /// The widget switched display mode.
    ///
    /// Leaving dropdown mode drops the summary; entering it is followed by a
    /// [`Surface::summary_changed`] with the fresh summary.
    fn display_changed(&mut self, _display: DisplayMode) {}
}

/// A surface that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {}
