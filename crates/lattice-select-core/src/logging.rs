//! Logging and debugging facilities for Lattice Select.
//!
//! This module provides:
//! - Target and span names for the `tracing` instrumentation
//! - Tree formatting options shared by the panel debug visualizer
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Lattice Select logs through the `tracing` crate. To see logs, install a
//! subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_select=debug")
//!     .init();
//! ```

/// Span names used throughout Lattice Select for tracing.
pub mod span_names {
    /// Full option re-extraction and re-layout.
    pub const REFRESH_OPTIONS: &str = "lattice_select::refresh_options";
    /// Selection re-synchronization.
    pub const UPDATE_SELECTION: &str = "lattice_select::update_selection";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "lattice_select_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_select_core::signal";
    /// Option model extraction.
    pub const MODEL: &str = "lattice_select::model";
    /// Layout grouping.
    pub const LAYOUT: &str = "lattice_select::layout";
    /// Selection synchronization.
    pub const SELECTION: &str = "lattice_select::selection";
    /// Bulk actions.
    pub const ACTIONS: &str = "lattice_select::actions";
    /// Dropdown coordination.
    pub const DROPDOWN: &str = "lattice_select::dropdown";
    /// Named command boundary. Failures reported here form the diagnostic channel.
    pub const COMMAND: &str = "lattice_select::command";
    /// Settings loading and merging.
    pub const SETTINGS: &str = "lattice_select::settings";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show item values next to their display text.
    pub show_values: bool,
    /// Whether to show per-item state flags (checked, hidden, disabled).
    pub show_state: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_values: true,
            show_state: true,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output: structure and display text only.
    pub fn minimal() -> Self {
        Self {
            show_values: false,
            show_state: false,
            ..Default::default()
        }
    }

    /// Use the given tree style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Branch prefix for an entry at `depth`, where `last_flags[d]` records
    /// whether the ancestor at depth `d` was the last of its siblings.
    pub fn branch_prefix(&self, last_flags: &[bool]) -> String {
        let (pipe, blank, tee, elbow) = match self.style {
            TreeStyle::Ascii => ("|   ", "    ", "|-- ", "`-- "),
            TreeStyle::Unicode => ("│   ", "    ", "├── ", "└── "),
            TreeStyle::Compact => return "  ".repeat(last_flags.len()),
        };

        let mut prefix = String::new();
        if let Some((&is_last, ancestors)) = last_flags.split_last() {
            for &ancestor_last in ancestors {
                prefix.push_str(if ancestor_last { blank } else { pipe });
            }
            prefix.push_str(if is_last { elbow } else { tee });
        }
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "lattice_select::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
