//! Option model extraction.
//!
//! Walks the source control's declarative option structure into a typed
//! tree of [`OptionNode`]s, preserving source order exactly. Groups nest to
//! arbitrary depth.
//!
//! Separator markers on options are kept as data on the extracted leaf
//! ([`OptionLeaf::separator`]); the layout stage turns them into standalone
//! separators.

use lattice_select_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::source::{SourceGroup, SourceNode, SourceOption};

/// Direction of a layout separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorKind {
    /// Starts a new vertical group below the current one.
    Horizontal,
    /// Starts a new horizontal group beside the current one.
    Vertical,
}

/// A single selectable option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionLeaf {
    pub value: String,
    pub text: String,
    pub disabled: bool,
    pub css_class: Option<String>,
    pub css_style: Option<String>,
    /// Separator marker captured from the source option.
    pub separator: Option<SeparatorKind>,
}

/// A labeled collection of options and sub-groups.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionGroup {
    pub label: String,
    pub css_class: Option<String>,
    pub css_style: Option<String>,
    pub children: Vec<OptionNode>,
}

/// A node of the option tree.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionNode {
    Leaf(OptionLeaf),
    Group(OptionGroup),
    Separator(SeparatorKind),
}

/// The extracted option tree of one control.
///
/// Immutable once extracted; re-extraction replaces the whole model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionModel {
    nodes: Vec<OptionNode>,
}

impl OptionModel {
    /// Extract a model from the source control's option structure.
    pub fn extract(source: &[SourceNode]) -> Self {
        let nodes: Vec<OptionNode> = source.iter().map(extract_node).collect();
        let model = Self { nodes };
        tracing::debug!(
            target: targets::MODEL,
            leaves = model.leaves().count(),
            "extracted option model"
        );
        model
    }

    /// Build a model from already-typed nodes, such as standalone
    /// [`OptionNode::Separator`]s produced by a host.
    pub fn from_nodes(nodes: Vec<OptionNode>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes in source order.
    pub fn nodes(&self) -> &[OptionNode] {
        &self.nodes
    }

    /// Every selectable leaf, depth-first in source order.
    pub fn leaves(&self) -> impl Iterator<Item = &OptionLeaf> {
        let mut out = Vec::new();
        collect_leaves(&self.nodes, &mut out);
        out.into_iter()
    }
}

fn collect_leaves<'a>(nodes: &'a [OptionNode], out: &mut Vec<&'a OptionLeaf>) {
    for node in nodes {
        match node {
            OptionNode::Leaf(leaf) if leaf.separator.is_none() => out.push(leaf),
            OptionNode::Leaf(_) | OptionNode::Separator(_) => {}
            OptionNode::Group(group) => collect_leaves(&group.children, out),
        }
    }
}

fn extract_node(node: &SourceNode) -> OptionNode {
    match node {
        SourceNode::Option(option) => OptionNode::Leaf(extract_leaf(option)),
        SourceNode::Group(group) => OptionNode::Group(extract_group(group)),
    }
}

fn extract_leaf(option: &SourceOption) -> OptionLeaf {
    OptionLeaf {
        value: option.value.clone(),
        text: option.text.clone(),
        disabled: option.disabled,
        css_class: option.css_class.clone(),
        css_style: option.css_style.clone(),
        separator: option.separator,
    }
}

fn extract_group(group: &SourceGroup) -> OptionGroup {
    OptionGroup {
        label: group.label.clone(),
        css_class: group.css_class.clone(),
        css_style: group.css_style.clone(),
        children: group.children.iter().map(extract_node).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Vec<SourceNode> {
        vec![
            SourceOption::new("a", "Alpha").into(),
            SourceGroup::new(
                "Group",
                vec![
                    SourceOption::new("b", "Beta").with_disabled(true).into(),
                    SourceOption::separator(SeparatorKind::Horizontal).into(),
                    SourceGroup::new("Inner", vec![SourceOption::new("c", "Gamma").into()])
                        .with_class("inner")
                        .into(),
                ],
            )
            .into(),
            SourceOption::separator(SeparatorKind::Vertical).into(),
            SourceOption::new("d", "Delta").with_style("color: red").into(),
        ]
    }

    #[test]
    fn test_extract_preserves_order_and_nesting() {
        let model = OptionModel::extract(&source());
        assert_eq!(model.nodes().len(), 4);

        let OptionNode::Group(group) = &model.nodes()[1] else {
            panic!("expected group");
        };
        assert_eq!(group.label, "Group");
        assert_eq!(group.children.len(), 3);

        let OptionNode::Group(inner) = &group.children[2] else {
            panic!("expected nested group");
        };
        assert_eq!(inner.css_class.as_deref(), Some("inner"));

        let values: Vec<&str> = model.leaves().map(|l| l.value.as_str()).collect();
        assert_eq!(values, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_separators_stay_on_leaves() {
        let model = OptionModel::extract(&source());
        let OptionNode::Leaf(marker) = &model.nodes()[2] else {
            panic!("expected leaf");
        };
        assert_eq!(marker.separator, Some(SeparatorKind::Vertical));
        assert!(model.leaves().all(|leaf| leaf.separator.is_none()));
    }

    #[test]
    fn test_leaf_attributes() {
        let model = OptionModel::extract(&source());
        let leaves: Vec<&OptionLeaf> = model.leaves().collect();
        assert!(leaves[1].disabled);
        assert_eq!(leaves[3].css_style.as_deref(), Some("color: red"));
    }

    #[test]
    fn test_extract_empty() {
        let model = OptionModel::extract(&[]);
        assert!(model.nodes().is_empty());
        assert_eq!(model.leaves().count(), 0);
    }
}
