//! The rendered option panel.
//!
//! A [`PanelLayout`] is what the layout engine hands to the rendering layer:
//! a tree of containers ([`PanelNode`]) whose leaves refer to rendered inputs
//! stored in a slot map, plus the [`OptionIndex`] over those inputs.

use slotmap::{SlotMap, new_key_type};

use crate::selection::OptionIndex;

new_key_type! {
    /// Handle to one rendered input of a panel.
    ///
    /// Handles are only meaningful for the panel that issued them; a refresh
    /// issues new ones.
    pub struct InputHandle;
}

/// Which kind of input an option renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputKind {
    /// Exclusive choice sharing a group name (single-select).
    #[default]
    Radio,
    /// Independent choice (multi-select).
    Checkbox,
}

/// One rendered, selectable input.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedInput {
    pub value: String,
    /// Display text with leading no-break spaces removed.
    pub text: String,
    pub kind: InputKind,
    /// Group name shared by the radios of one widget.
    pub name: Option<String>,
    pub disabled: bool,
    pub checked: bool,
    /// Hidden by the quick filter.
    pub hidden: bool,
    /// Number of leading no-break spaces that were stripped from the text.
    pub indent: usize,
    /// Left padding derived from `indent`.
    pub padding_left: f32,
    pub css_class: Option<String>,
    pub css_style: Option<String>,
}

/// The label row of a rendered group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLabel {
    pub text: String,
    pub css_class: Option<String>,
    pub css_style: Option<String>,
}

/// A node of the rendered panel tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelNode {
    /// A no-wrap container holding one horizontal group.
    HorizontalGroup(Vec<PanelNode>),
    /// A container holding one vertical group.
    VerticalGroup(Vec<PanelNode>),
    /// A labeled option group.
    Group {
        label: GroupLabel,
        children: Vec<PanelNode>,
    },
    /// A rendered input.
    Option(InputHandle),
}

impl PanelNode {
    /// Child nodes, empty for inputs.
    pub fn children(&self) -> &[PanelNode] {
        match self {
            PanelNode::HorizontalGroup(children)
            | PanelNode::VerticalGroup(children)
            | PanelNode::Group { children, .. } => children,
            PanelNode::Option(_) => &[],
        }
    }
}

/// A fully rendered option panel.
#[derive(Debug, Clone, Default)]
pub struct PanelLayout {
    pub(crate) root: Vec<PanelNode>,
    pub(crate) inputs: SlotMap<InputHandle, RenderedInput>,
    pub(crate) order: Vec<InputHandle>,
    pub(crate) index: OptionIndex,
}

impl PanelLayout {
    /// Top-level nodes placed directly in the panel's wrapper.
    pub fn root(&self) -> &[PanelNode] {
        &self.root
    }

    /// Look up a rendered input.
    pub fn input(&self, handle: InputHandle) -> Option<&RenderedInput> {
        self.inputs.get(handle)
    }

    /// Look up a rendered input mutably.
    pub fn input_mut(&mut self, handle: InputHandle) -> Option<&mut RenderedInput> {
        self.inputs.get_mut(handle)
    }

    /// All rendered inputs in render order.
    pub fn inputs(&self) -> impl Iterator<Item = (InputHandle, &RenderedInput)> {
        self.order
            .iter()
            .filter_map(|&handle| self.inputs.get(handle).map(|input| (handle, input)))
    }

    /// Handles of all rendered inputs in render order.
    pub fn render_order(&self) -> &[InputHandle] {
        &self.order
    }

    /// Number of rendered inputs.
    pub fn input_count(&self) -> usize {
        self.order.len()
    }

    /// The value index over the rendered inputs.
    pub fn index(&self) -> &OptionIndex {
        &self.index
    }

    /// The handle rendered for a value.
    pub fn handle_of(&self, value: &str) -> Option<InputHandle> {
        self.index.get(value).map(|entry| entry.handle)
    }

    /// Values of all checked inputs in render order.
    pub fn checked_values(&self) -> Vec<String> {
        self.inputs()
            .filter(|(_, input)| input.checked)
            .map(|(_, input)| input.value.clone())
            .collect()
    }

    /// Values of all visible inputs in render order.
    pub fn visible_values(&self) -> Vec<String> {
        self.inputs()
            .filter(|(_, input)| !input.hidden)
            .map(|(_, input)| input.value.clone())
            .collect()
    }

    /// Add a rendered input in render order and return its handle.
    pub(crate) fn push_input(&mut self, input: RenderedInput) -> InputHandle {
        let handle = self.inputs.insert(input);
        self.order.push(handle);
        handle
    }
}
