//! Layout grouping engine.
//!
//! Turns an [`OptionModel`] into a rendered [`PanelLayout`]. Separators split
//! each tree level into a two-level grid:
//!
//! - a sequence of **horizontal groups**, laid out side by side
//! - each holding a sequence of **vertical groups**, stacked
//! - each holding rendered items (inputs or nested groups)
//!
//! A horizontal separator starts a new vertical group; a vertical separator
//! additionally starts a new horizontal group. Nested groups are laid out
//! recursively with the same rules.
//!
//! # Collapsing
//!
//! Wrappers are only emitted where they carry information. A level with a
//! single horizontal group emits that group's contents directly, and a
//! horizontal group with a single vertical group emits the items directly.
//! An option list without separators therefore renders as a flat item list.
//!
//! # Example
//!
//! ```
//! use lattice_select::layout::{InputKind, LayoutEngine};
//! use lattice_select::model::OptionModel;
//! use lattice_select::source::{NativeSelect, SourceOption};
//! use lattice_select::{SeparatorKind, SourceControl};
//!
//! let select = NativeSelect::multiple()
//!     .with_option(SourceOption::new("a", "A"))
//!     .with_option(SourceOption::separator(SeparatorKind::Vertical))
//!     .with_option(SourceOption::new("b", "B"));
//!
//! let model = OptionModel::extract(&select.options());
//! let grid = LayoutEngine::new(InputKind::Checkbox).grid(&model);
//! assert_eq!(grid.shape(), vec![vec![1], vec![1]]);
//! ```

mod debug;
mod panel;

pub use debug::PanelTreeDebug;
pub use panel::{GroupLabel, InputHandle, InputKind, PanelLayout, PanelNode, RenderedInput};

use lattice_select_core::logging::targets;

use crate::model::{OptionGroup, OptionLeaf, OptionModel, OptionNode, SeparatorKind};
use crate::selection::IndexEntry;

/// The no-break space used for indentation and empty labels.
pub const NBSP: char = '\u{a0}';

/// Default left padding per indentation level, in pixels.
pub const DEFAULT_INDENT_STEP: f32 = 3.0;

/// Items stacked in one column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerticalGroup {
    pub items: Vec<PanelNode>,
}

/// Vertical groups placed side by side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HorizontalGroup {
    pub vertical_groups: Vec<VerticalGroup>,
}

/// The grouping result of one tree level, before collapsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutGrid {
    pub horizontal_groups: Vec<HorizontalGroup>,
}

impl LayoutGrid {
    /// Item counts per vertical group, per horizontal group.
    pub fn shape(&self) -> Vec<Vec<usize>> {
        self.horizontal_groups
            .iter()
            .map(|h| h.vertical_groups.iter().map(|v| v.items.len()).collect())
            .collect()
    }

    /// Emit the grid as panel nodes, skipping single-child wrappers.
    pub fn into_nodes(self) -> Vec<PanelNode> {
        let mut horizontal = self.horizontal_groups;
        if horizontal.len() == 1 {
            return horizontal.pop().map(emit_horizontal).unwrap_or_default();
        }
        horizontal
            .into_iter()
            .map(|h| PanelNode::HorizontalGroup(emit_horizontal(h)))
            .collect()
    }
}

fn emit_horizontal(group: HorizontalGroup) -> Vec<PanelNode> {
    let mut vertical = group.vertical_groups;
    if vertical.len() == 1 {
        return vertical.pop().map(|v| v.items).unwrap_or_default();
    }
    vertical
        .into_iter()
        .map(|v| PanelNode::VerticalGroup(v.items))
        .collect()
}

/// Accumulates one tree level while walking it in source order.
#[derive(Default)]
struct GridBuilder {
    current: Vec<PanelNode>,
    vertical: Vec<VerticalGroup>,
    horizontal: Vec<HorizontalGroup>,
}

impl GridBuilder {
    fn push(&mut self, item: PanelNode) {
        self.current.push(item);
    }

    fn break_vertical(&mut self) {
        if !self.current.is_empty() {
            let items = std::mem::take(&mut self.current);
            self.vertical.push(VerticalGroup { items });
        }
    }

    fn break_horizontal(&mut self) {
        self.break_vertical();
        if !self.vertical.is_empty() {
            let vertical_groups = std::mem::take(&mut self.vertical);
            self.horizontal.push(HorizontalGroup { vertical_groups });
        }
    }

    fn separate(&mut self, kind: SeparatorKind) {
        match kind {
            SeparatorKind::Horizontal => self.break_vertical(),
            SeparatorKind::Vertical => self.break_horizontal(),
        }
    }

    fn finish(mut self) -> LayoutGrid {
        self.break_horizontal();
        LayoutGrid {
            horizontal_groups: self.horizontal,
        }
    }
}

/// Lays out option models into rendered panels.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    kind: InputKind,
    group_name: Option<String>,
    indent_step: f32,
}

impl LayoutEngine {
    /// Create an engine rendering inputs of the given kind.
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            group_name: None,
            indent_step: DEFAULT_INDENT_STEP,
        }
    }

    /// Set the name shared by all rendered inputs using builder pattern.
    pub fn with_group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = Some(name.into());
        self
    }

    /// Set the padding per indentation level using builder pattern.
    pub fn with_indent_step(mut self, step: f32) -> Self {
        self.indent_step = step;
        self
    }

    /// Render a whole model into a new panel.
    pub fn layout(&self, model: &OptionModel) -> PanelLayout {
        let mut panel = PanelLayout::default();
        let grid = self.group(model.nodes(), &mut panel);
        tracing::debug!(
            target: targets::LAYOUT,
            shape = ?grid.shape(),
            inputs = panel.input_count(),
            "laid out option panel"
        );
        panel.root = grid.into_nodes();
        panel
    }

    /// Group only the top level of a model, rendering into a scratch panel.
    pub fn grid(&self, model: &OptionModel) -> LayoutGrid {
        self.group(model.nodes(), &mut PanelLayout::default())
    }

    /// Group one tree level, rendering its inputs into `panel`.
    pub fn group(&self, nodes: &[OptionNode], panel: &mut PanelLayout) -> LayoutGrid {
        let mut builder = GridBuilder::default();
        for node in nodes {
            match node {
                OptionNode::Separator(kind) => builder.separate(*kind),
                OptionNode::Leaf(leaf) => match leaf.separator {
                    Some(kind) => builder.separate(kind),
                    None => builder.push(self.render_leaf(leaf, panel)),
                },
                OptionNode::Group(group) => builder.push(self.render_group(group, panel)),
            }
        }
        builder.finish()
    }

    fn render_group(&self, group: &OptionGroup, panel: &mut PanelLayout) -> PanelNode {
        let children = self.group(&group.children, panel).into_nodes();
        let text = if group.label.is_empty() {
            NBSP.to_string()
        } else {
            group.label.clone()
        };
        PanelNode::Group {
            label: GroupLabel {
                text,
                css_class: group.css_class.clone(),
                css_style: group.css_style.clone(),
            },
            children,
        }
    }

    fn render_leaf(&self, leaf: &OptionLeaf, panel: &mut PanelLayout) -> PanelNode {
        let (indent, text) = split_indent(&leaf.text);
        let handle = panel.push_input(RenderedInput {
            value: leaf.value.clone(),
            text: text.to_string(),
            kind: self.kind,
            name: self.group_name.clone(),
            disabled: leaf.disabled,
            checked: false,
            hidden: false,
            indent,
            padding_left: indent as f32 * self.indent_step,
            css_class: leaf.css_class.clone(),
            css_style: leaf.css_style.clone(),
        });
        panel.index.insert(
            leaf.value.clone(),
            IndexEntry {
                handle,
                text: text.to_string(),
                disabled: leaf.disabled,
            },
        );
        PanelNode::Option(handle)
    }
}

/// Split leading no-break spaces off an option text.
///
/// Returns the number of stripped characters and the remaining text.
pub fn split_indent(text: &str) -> (usize, &str) {
    let rest = text.trim_start_matches(NBSP);
    let indent = text[..text.len() - rest.len()].chars().count();
    (indent, rest)
}
