use std::fmt;

use lattice_select_core::logging::TreeFormatOptions;

use super::panel::{PanelLayout, PanelNode, RenderedInput};

/// Debug utility for visualizing a rendered panel tree.
///
/// ```text
/// Panel (3 inputs):
/// ├── [horizontal]
/// │   └── Alpha = a [checked]
/// └── [horizontal]
///     ├── Beta = b
///     └── group "Fruits"
///         └── Gamma = c [disabled]
/// ```
#[derive(Debug, Clone)]
pub struct PanelTreeDebug<'a> {
    panel: &'a PanelLayout,
    options: TreeFormatOptions,
}

impl<'a> PanelTreeDebug<'a> {
    /// Create a visualizer with default options.
    pub fn new(panel: &'a PanelLayout) -> Self {
        Self {
            panel,
            options: TreeFormatOptions::default(),
        }
    }

    /// Create a visualizer with custom options.
    pub fn with_options(panel: &'a PanelLayout, options: TreeFormatOptions) -> Self {
        Self { panel, options }
    }

    /// Format the whole panel.
    pub fn format(&self) -> String {
        let mut output = format!("Panel ({} inputs):\n", self.panel.input_count());
        if self.panel.root().is_empty() {
            output.push_str("  (empty)\n");
        }
        self.format_level(self.panel.root(), &mut Vec::new(), &mut output);
        output
    }

    fn format_level(&self, nodes: &[PanelNode], last_flags: &mut Vec<bool>, output: &mut String) {
        if let Some(max) = self.options.max_depth
            && last_flags.len() >= max
        {
            return;
        }

        for (i, node) in nodes.iter().enumerate() {
            last_flags.push(i + 1 == nodes.len());
            output.push_str(&self.options.branch_prefix(last_flags));
            output.push_str(&self.describe(node));
            output.push('\n');
            self.format_level(node.children(), last_flags, output);
            last_flags.pop();
        }
    }

    fn describe(&self, node: &PanelNode) -> String {
        match node {
            PanelNode::HorizontalGroup(_) => "[horizontal]".to_string(),
            PanelNode::VerticalGroup(_) => "[vertical]".to_string(),
            PanelNode::Group { label, .. } => format!("group {:?}", label.text),
            PanelNode::Option(handle) => match self.panel.input(*handle) {
                Some(input) => self.describe_input(input),
                None => "(stale input)".to_string(),
            },
        }
    }

    fn describe_input(&self, input: &RenderedInput) -> String {
        let mut line = input.text.clone();
        if self.options.show_values {
            line.push_str(" = ");
            line.push_str(&input.value);
        }
        if self.options.show_state {
            let flags: Vec<&str> = [
                (input.checked, "checked"),
                (input.hidden, "hidden"),
                (input.disabled, "disabled"),
            ]
            .into_iter()
            .filter_map(|(set, name)| set.then_some(name))
            .collect();
            if !flags.is_empty() {
                line.push_str(&format!(" [{}]", flags.join(", ")));
            }
        }
        line
    }
}

impl fmt::Display for PanelTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use lattice_select_core::logging::TreeStyle;

    use super::*;
    use crate::layout::{InputKind, LayoutEngine};
    use crate::model::{OptionModel, SeparatorKind};
    use crate::selection::{SelectionValue, sync_checked};
    use crate::source::{SourceGroup, SourceNode, SourceOption};

    fn panel() -> PanelLayout {
        let nodes: Vec<SourceNode> = vec![
            SourceOption::new("a", "Alpha").into(),
            SourceOption::separator(SeparatorKind::Vertical).into(),
            SourceOption::new("b", "Beta").into(),
            SourceGroup::new(
                "Fruits",
                vec![SourceOption::new("c", "Gamma").with_disabled(true).into()],
            )
            .into(),
        ];
        let model = OptionModel::extract(&nodes);
        let mut panel = LayoutEngine::new(InputKind::Checkbox).layout(&model);
        sync_checked(&mut panel, &SelectionValue::Multiple(vec!["a".into()]));
        panel
    }

    #[test]
    fn test_format_unicode() {
        let panel = panel();
        let output = PanelTreeDebug::new(&panel).format();
        let expected = "\
Panel (3 inputs):
├── [horizontal]
│   └── Alpha = a [checked]
└── [horizontal]
    ├── Beta = b
    └── group \"Fruits\"
        └── Gamma = c [disabled]
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_format_minimal_ascii() {
        let panel = panel();
        let options = TreeFormatOptions::minimal().with_style(TreeStyle::Ascii);
        let output = PanelTreeDebug::with_options(&panel, options).to_string();
        assert!(output.contains("|   `-- Alpha\n"));
        assert!(!output.contains("checked"));
        assert!(!output.contains(" = "));
    }

    #[test]
    fn test_format_max_depth() {
        let panel = panel();
        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..Default::default()
        };
        let output = PanelTreeDebug::with_options(&panel, options).format();
        assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn test_format_empty() {
        let panel = PanelLayout::default();
        assert!(PanelTreeDebug::new(&panel).format().contains("(empty)"));
    }
}
