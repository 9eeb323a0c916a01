//! The custom select widget.
//!
//! [`CustomSelect`] replaces a native [`SourceControl`] with a custom-rendered
//! option panel. The control stays authoritative for the selected value(s);
//! the widget derives the rendered panel, the dropdown summary and the bulk
//! action states from it and reports them to a [`Surface`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lattice_select::prelude::*;
//! use lattice_select::source::NativeSelect;
//!
//! let select = NativeSelect::multiple().with_items([("a", "Apple"), ("b", "Banana")]);
//! let mut widget = CustomSelect::builder(select)
//!     .coordinator(Arc::new(DropdownCoordinator::new()))
//!     .settings(Settings::default().with_display(DisplayMode::Dropdown))
//!     .build()
//!     .unwrap();
//!
//! widget.changed.connect(|value| println!("selection: {:?}", value.values()));
//! widget.add_to_selection(&["b".to_string()]);
//!
//! assert_eq!(widget.val(), SelectionValue::Multiple(vec!["b".into()]));
//! assert_eq!(widget.summary(), Some("Banana"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lattice_select_core::logging::{span_names, targets};
use lattice_select_core::{PerfSpan, Result, Signal};
use serde_json::Value;

use crate::actions::{
    ActionDescriptor, apply_filter, build_actions, refresh_toggles, subtract_selection,
    union_selection,
};
use crate::command::{Command, CommandOutput};
use crate::dropdown::{DropdownCoordinator, DropdownHandle, PanelPlacement, WidgetId};
use crate::layout::{InputHandle, InputKind, LayoutEngine, PanelLayout};
use crate::model::OptionModel;
use crate::selection::{SelectionValue, summary_text, sync_checked};
use crate::settings::{DisplayMode, Settings, SettingsPatch};
use crate::source::SourceControl;
use crate::surface::{NullSurface, Surface};

static NEXT_GROUP_NAME: AtomicU64 = AtomicU64::new(0);

/// An interaction reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEvent {
    /// The replacement element of the control was clicked.
    ControlClicked,
    /// A rendered input of the option panel was activated.
    OptionActivated(InputHandle),
    /// An action control was activated. `checked` is the new state of a
    /// toggle's checkbox and ignored otherwise.
    ActionActivated { index: usize, checked: bool },
    /// The text of a quick filter action was edited.
    FilterEdited { index: usize, text: String },
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`CustomSelect`].
pub struct CustomSelectBuilder {
    source: Box<dyn SourceControl>,
    settings: Settings,
    surface: Option<Box<dyn Surface>>,
    coordinator: Option<Arc<DropdownCoordinator>>,
}

impl CustomSelectBuilder {
    /// Use the given settings.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Report rendered state to the given surface.
    pub fn surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Coordinate the dropdown with the given coordinator instead of the
    /// shared one.
    pub fn coordinator(mut self, coordinator: Arc<DropdownCoordinator>) -> Self {
        self.coordinator = Some(coordinator);
        self
    }

    /// Validate the settings and build the widget, rendering its panel.
    pub fn build(self) -> Result<CustomSelect> {
        self.settings.validate()?;
        Ok(CustomSelect::from_parts(
            self.source,
            self.settings,
            self.surface.unwrap_or_else(|| Box::new(NullSurface)),
            self.coordinator.unwrap_or_else(DropdownCoordinator::shared),
        ))
    }
}

// ============================================================================
// CustomSelect
// ============================================================================

/// A custom-rendered replacement for a single/multi-selection control.
pub struct CustomSelect {
    id: WidgetId,
    source: Box<dyn SourceControl>,
    surface: Box<dyn Surface>,
    settings: Settings,
    display: DisplayMode,
    multiple: bool,
    /// Name shared by the radios of a single-select widget.
    group_name: Option<String>,
    /// Cached extraction, cleared by [`CustomSelect::invalidate_options`].
    model: Option<OptionModel>,
    panel: Option<PanelLayout>,
    actions: Vec<ActionDescriptor>,
    filter_text: String,
    /// Last summary reported in dropdown mode.
    summary: Option<String>,
    coordinator: Arc<DropdownCoordinator>,
    handle: Arc<DropdownHandle>,

    /// Emitted after an interaction or bulk action changed the value.
    ///
    /// Writes through [`CustomSelect::set_val`] do not emit.
    pub changed: Signal<SelectionValue>,
}

impl CustomSelect {
    /// Replace `source` with default settings, the shared coordinator and no
    /// surface.
    pub fn new(source: impl SourceControl + 'static) -> Self {
        Self::from_parts(
            Box::new(source),
            Settings::default(),
            Box::new(NullSurface),
            DropdownCoordinator::shared(),
        )
    }

    /// Start building a widget for `source`.
    pub fn builder(source: impl SourceControl + 'static) -> CustomSelectBuilder {
        CustomSelectBuilder {
            source: Box::new(source),
            settings: Settings::default(),
            surface: None,
            coordinator: None,
        }
    }

    fn from_parts(
        source: Box<dyn SourceControl>,
        settings: Settings,
        surface: Box<dyn Surface>,
        coordinator: Arc<DropdownCoordinator>,
    ) -> Self {
        let id = WidgetId::next();
        let multiple = source.is_multiple();
        let display = settings.resolve_display(source.as_ref());
        let group_name = (!multiple)
            .then(|| format!("_cs_{}", NEXT_GROUP_NAME.fetch_add(1, Ordering::Relaxed)));
        let actions = if multiple {
            build_actions(&settings.actions)
        } else {
            Vec::new()
        };

        let mut widget = Self {
            id,
            source,
            surface,
            settings,
            display,
            multiple,
            group_name,
            model: None,
            panel: None,
            actions,
            filter_text: String::new(),
            summary: None,
            coordinator,
            handle: Arc::new(DropdownHandle::new(id)),
            changed: Signal::new(),
        };
        tracing::debug!(
            target: targets::CORE,
            widget = %id,
            multiple,
            display = %widget.display,
            "custom select created"
        );
        widget.refresh_options();
        widget
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// The resolved display mode.
    pub fn display(&self) -> DisplayMode {
        self.display
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Name shared by the rendered radios, single-select only.
    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    /// The rendered option panel, `None` while invalidated.
    pub fn panel(&self) -> Option<&PanelLayout> {
        self.panel.as_ref()
    }

    /// The action controls, empty for single-select widgets.
    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    /// The summary text, dropdown mode only.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The current quick filter text.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// The dropdown handle carrying the `opened`/`closed` signals.
    pub fn dropdown(&self) -> &Arc<DropdownHandle> {
        &self.handle
    }

    pub fn coordinator(&self) -> &Arc<DropdownCoordinator> {
        &self.coordinator
    }

    /// Whether this widget's dropdown is the active one.
    pub fn is_open(&self) -> bool {
        self.coordinator.is_active(self.id)
    }

    /// The replaced control.
    pub fn source(&self) -> &dyn SourceControl {
        self.source.as_ref()
    }

    /// The replaced control, mutably.
    ///
    /// Writes made here bypass the widget; call
    /// [`CustomSelect::update_selection`] or, after changing the options,
    /// [`CustomSelect::invalidate_options`].
    pub fn source_mut(&mut self) -> &mut dyn SourceControl {
        self.source.as_mut()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Re-render the option panel from the (possibly cached) option model and
    /// re-synchronize the selection.
    pub fn refresh_options(&mut self) {
        let _perf = PerfSpan::new(span_names::REFRESH_OPTIONS);

        let kind = if self.multiple {
            InputKind::Checkbox
        } else {
            InputKind::Radio
        };
        let mut engine = LayoutEngine::new(kind).with_indent_step(self.settings.indent_step);
        if let Some(name) = &self.group_name {
            engine = engine.with_group_name(name.clone());
        }

        let source = &self.source;
        let model = self
            .model
            .get_or_insert_with(|| OptionModel::extract(&source.options()));
        let mut panel = engine.layout(model);
        if !self.filter_text.is_empty() {
            apply_filter(&mut panel, &self.filter_text);
        }

        self.surface.mount(&panel, &self.actions);
        self.panel = Some(panel);
        self.update_selection();
    }

    /// Mark the option model and the rendered panel stale.
    ///
    /// The next selection or value operation re-extracts the options and
    /// re-renders the panel before it reads the index.
    pub fn invalidate_options(&mut self) {
        tracing::trace!(target: targets::MODEL, widget = %self.id, "options invalidated");
        self.model = None;
        self.panel = None;
    }

    /// Re-read the value and update the checked state of every input.
    pub fn update_selection(&mut self) {
        let Some(panel) = self.panel.as_mut() else {
            self.refresh_options();
            return;
        };
        let _perf = PerfSpan::new(span_names::UPDATE_SELECTION);

        let selected = self.source.value();
        let flipped = sync_checked(panel, &selected);
        tracing::trace!(
            target: targets::SELECTION,
            widget = %self.id,
            flipped = flipped.len(),
            "selection synchronized"
        );
        for handle in flipped {
            if let Some(input) = panel.input(handle) {
                self.surface.input_changed(handle, input);
            }
        }
        self.update_value();
    }

    /// Recompute the dropdown summary and, for multi-select, the actions.
    pub fn update_value(&mut self) {
        let Some(panel) = self.panel.as_ref() else {
            self.refresh_options();
            return;
        };

        let selected = self.source.value();
        if self.display == DisplayMode::Dropdown {
            let text = summary_text(panel.index(), &selected, &self.settings.summary_separator);
            if self.summary.as_deref() != Some(text.as_str()) {
                self.surface.summary_changed(&text);
                self.summary = Some(text);
            }
        }
        if self.multiple {
            self.refresh_actions(&selected);
        }
    }

    /// Recompute the toggle actions from the current value.
    pub fn update_actions(&mut self) {
        if self.panel.is_none() {
            self.refresh_options();
            return;
        }
        let selected = self.source.value();
        self.refresh_actions(&selected);
    }

    fn refresh_actions(&mut self, selected: &SelectionValue) {
        let Some(panel) = self.panel.as_ref() else {
            return;
        };
        for index in refresh_toggles(&mut self.actions, panel.index(), selected) {
            if let Some(action) = self.actions.get(index) {
                self.surface.action_changed(index, action);
            }
        }
    }

    /// Set the quick filter text, hiding every input that does not match.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        for action in &mut self.actions {
            if let ActionDescriptor::QuickFilter { text, .. } = action {
                text.clone_from(&self.filter_text);
            }
        }

        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        let flipped = apply_filter(panel, &self.filter_text);
        tracing::trace!(
            target: targets::ACTIONS,
            widget = %self.id,
            filter = %self.filter_text,
            flipped = flipped.len(),
            "quick filter applied"
        );
        for handle in flipped {
            if let Some(input) = panel.input(handle) {
                self.surface.input_changed(handle, input);
            }
        }
    }

    // =========================================================================
    // Value
    // =========================================================================

    /// The authoritative value, unmodified.
    pub fn val(&self) -> SelectionValue {
        self.source.value()
    }

    /// Write the authoritative value and re-synchronize. Does not emit
    /// [`CustomSelect::changed`].
    pub fn set_val(&mut self, value: SelectionValue) {
        self.source.set_value(value);
        self.update_selection();
    }

    /// Add values to a multi-selection.
    ///
    /// Returns whether the selection changed as a set, in which case
    /// [`CustomSelect::changed`] was emitted once. Single-select widgets
    /// ignore the call.
    pub fn add_to_selection(&mut self, values: &[String]) -> bool {
        if !self.multiple {
            tracing::trace!(target: targets::ACTIONS, widget = %self.id, "bulk add ignored");
            return false;
        }
        let before = self.source.value();
        let next = union_selection(before.values(), values);
        self.write_bulk(before, next)
    }

    /// Remove values from a multi-selection.
    ///
    /// Same notification rule as [`CustomSelect::add_to_selection`].
    pub fn remove_from_selection(&mut self, values: &[String]) -> bool {
        if !self.multiple {
            tracing::trace!(target: targets::ACTIONS, widget = %self.id, "bulk remove ignored");
            return false;
        }
        let before = self.source.value();
        let next = subtract_selection(before.values(), values);
        self.write_bulk(before, next)
    }

    fn write_bulk(&mut self, before: SelectionValue, next: Vec<String>) -> bool {
        self.source.set_value(SelectionValue::Multiple(next));
        self.update_selection();

        let after = self.source.value();
        if before.same_members(&after) {
            return false;
        }
        tracing::debug!(
            target: targets::ACTIONS,
            widget = %self.id,
            selected = after.values().len(),
            "selection changed by bulk action"
        );
        self.changed.emit(after);
        true
    }

    // =========================================================================
    // Dropdown
    // =========================================================================

    /// Open the dropdown if it is not the active one, close it otherwise.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Make this widget the active dropdown, closing any other one.
    ///
    /// In list mode this only closes the active dropdown.
    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        if self.display != DisplayMode::Dropdown {
            self.coordinator.close_active();
            return;
        }
        let placement = PanelPlacement::below(self.source.bounds(), self.settings.panel_overlap);
        self.coordinator.acquire(&self.handle, placement);
    }

    /// Close the dropdown if it is the active one. No-op in list mode.
    pub fn close(&mut self) {
        if self.display != DisplayMode::Dropdown {
            return;
        }
        self.coordinator.release(self.id);
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Merge a settings patch.
    ///
    /// The patch is validated before anything changes. On success the cached
    /// option model is dropped, the actions are rebuilt and the panel is
    /// re-rendered.
    pub fn options(&mut self, patch: SettingsPatch) -> Result<()> {
        let mut settings = self.settings.clone();
        settings.merge(patch);
        settings.validate()?;

        let display = settings.resolve_display(self.source.as_ref());
        if display != self.display {
            self.coordinator.release(self.id);
            self.summary = None;
            self.display = display;
            self.surface.display_changed(display);
        }
        self.settings = settings;

        if self.multiple {
            self.actions = build_actions(&self.settings.actions);
        }
        let has_filter = self
            .actions
            .iter()
            .any(|action| matches!(action, ActionDescriptor::QuickFilter { .. }));
        if has_filter {
            let text = std::mem::take(&mut self.filter_text);
            self.set_filter_text(text);
        } else {
            self.filter_text.clear();
        }

        tracing::debug!(
            target: targets::SETTINGS,
            widget = %self.id,
            display = %self.display,
            actions = self.actions.len(),
            "settings merged"
        );
        self.invalidate_options();
        self.refresh_options();
        Ok(())
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Handle a host interaction. Returns whether the event was consumed.
    pub fn event(&mut self, event: &SelectEvent) -> bool {
        match event {
            SelectEvent::ControlClicked => {
                self.toggle();
                true
            }
            SelectEvent::OptionActivated(handle) => self.activate_option(*handle),
            SelectEvent::ActionActivated { index, checked } => {
                self.activate_action(*index, *checked)
            }
            SelectEvent::FilterEdited { index, text } => {
                let is_filter = matches!(
                    self.actions.get(*index),
                    Some(ActionDescriptor::QuickFilter { .. })
                );
                if is_filter {
                    self.set_filter_text(text.clone());
                }
                is_filter
            }
        }
    }

    fn activate_option(&mut self, handle: InputHandle) -> bool {
        let Some(panel) = self.panel.as_mut() else {
            return false;
        };
        let Some(input) = panel.input_mut(handle) else {
            return false;
        };
        if input.disabled {
            return true;
        }

        let value = if self.multiple {
            input.checked = !input.checked;
            self.surface.input_changed(handle, input);
            SelectionValue::Multiple(panel.checked_values())
        } else {
            SelectionValue::Single(Some(input.value.clone()))
        };

        self.source.set_value(value);
        self.update_selection();
        let value = self.source.value();
        tracing::debug!(
            target: targets::SELECTION,
            widget = %self.id,
            selected = value.values().len(),
            "option activated"
        );
        self.changed.emit(value);
        true
    }

    fn activate_action(&mut self, index: usize, checked: bool) -> bool {
        let Some(action) = self.actions.get(index) else {
            return false;
        };
        let add = match action {
            ActionDescriptor::Select { .. } => true,
            ActionDescriptor::Deselect { .. } => false,
            ActionDescriptor::Toggle { .. } => checked,
            ActionDescriptor::QuickFilter { .. } => return false,
        };
        let before = action.toggle_display();
        let values = action.targets().map(<[String]>::to_vec).unwrap_or_default();
        if add {
            self.add_to_selection(&values);
        } else {
            self.remove_from_selection(&values);
        }

        // The host flipped its checkbox; resend the derived state when it did not move
        if let Some(before) = before
            && let Some(action) = self.actions.get(index)
            && action.toggle_display() == Some(before)
        {
            self.surface.action_changed(index, action);
        }
        true
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Run a public operation.
    pub fn invoke(&mut self, command: Command) -> Result<CommandOutput> {
        tracing::trace!(target: targets::COMMAND, widget = %self.id, command = %command.name(), "invoke");
        match command {
            Command::RefreshOptions => self.refresh_options(),
            Command::UpdateSelection => self.update_selection(),
            Command::UpdateValue => self.update_value(),
            Command::Toggle => self.toggle(),
            Command::Open => self.open(),
            Command::Close => self.close(),
            Command::Val(None) => return Ok(CommandOutput::Value(self.val())),
            Command::Val(Some(value)) => self.set_val(value),
            Command::AddToSelection(values) => {
                self.add_to_selection(&values);
            }
            Command::RemoveFromSelection(values) => {
                self.remove_from_selection(&values);
            }
            Command::Options(patch) => self.options(patch)?,
        }
        Ok(CommandOutput::None)
    }

    /// Run a public operation by name with JSON arguments.
    ///
    /// Failures are reported on the command log target and returned; a failed
    /// call leaves the widget untouched.
    pub fn invoke_named(&mut self, name: &str, args: &[Value]) -> Result<CommandOutput> {
        let result = Command::parse(name, args).and_then(|command| self.invoke(command));
        if let Err(err) = &result {
            tracing::error!(
                target: targets::COMMAND,
                widget = %self.id,
                operation = name,
                %err,
                "command failed"
            );
        }
        result
    }
}

impl Drop for CustomSelect {
    fn drop(&mut self) {
        self.coordinator.release(self.id);
    }
}

static_assertions::assert_impl_all!(CustomSelect: Send);

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::actions::{ActionSpec, ToggleState};
    use crate::geometry::Rect;
    use crate::source::{NativeSelect, SourceOption};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn multi() -> NativeSelect {
        NativeSelect::multiple().with_items([("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")])
    }

    fn build(source: NativeSelect, settings: Settings) -> CustomSelect {
        CustomSelect::builder(source)
            .settings(settings)
            .coordinator(Arc::new(DropdownCoordinator::new()))
            .build()
            .unwrap()
    }

    fn record_changes(widget: &CustomSelect) -> Arc<Mutex<Vec<SelectionValue>>> {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        widget.changed.connect(move |value| sink.lock().push(value.clone()));
        changes
    }

    #[test]
    fn test_construction_renders_panel() {
        let widget = build(
            multi().with_value(SelectionValue::Multiple(strings(&["b"]))),
            Settings::default(),
        );
        let panel = widget.panel().unwrap();
        assert_eq!(panel.input_count(), 3);
        assert_eq!(panel.checked_values(), strings(&["b"]));
        assert_eq!(widget.display(), DisplayMode::List);
        assert_eq!(widget.summary(), None);
        assert!(widget.group_name().is_none());
    }

    #[test]
    fn test_single_select_uses_radio_group() {
        let widget = build(
            NativeSelect::single().with_items([("x", "X"), ("y", "Y")]),
            Settings::default(),
        );
        let name = widget.group_name().unwrap().to_string();
        assert!(name.starts_with("_cs_"));
        assert!(
            widget
                .panel()
                .unwrap()
                .inputs()
                .all(|(_, input)| input.kind == InputKind::Radio
                    && input.name.as_deref() == Some(name.as_str()))
        );
        assert_eq!(widget.display(), DisplayMode::Dropdown);
        assert_eq!(widget.summary(), Some(""));
    }

    #[test]
    fn test_set_val_does_not_emit() {
        let mut widget = build(multi(), Settings::default());
        let changes = record_changes(&widget);

        widget.set_val(SelectionValue::Multiple(strings(&["c", "a"])));
        assert_eq!(widget.panel().unwrap().checked_values(), strings(&["a", "c"]));
        assert!(changes.lock().is_empty());
    }

    #[test]
    fn test_bulk_actions_ignored_on_single_select() {
        let mut widget = build(
            NativeSelect::single().with_items([("x", "X")]),
            Settings::default(),
        );
        let changes = record_changes(&widget);
        assert!(!widget.add_to_selection(&strings(&["x"])));
        assert!(!widget.remove_from_selection(&strings(&["x"])));
        assert_eq!(widget.val(), SelectionValue::Single(None));
        assert!(changes.lock().is_empty());
    }

    #[test]
    fn test_option_activation_multi() {
        let mut widget = build(multi(), Settings::default());
        let changes = record_changes(&widget);
        let handle = widget.panel().unwrap().handle_of("c").unwrap();

        assert!(widget.event(&SelectEvent::OptionActivated(handle)));
        assert_eq!(widget.val(), SelectionValue::Multiple(strings(&["c"])));
        assert!(widget.event(&SelectEvent::OptionActivated(handle)));
        assert_eq!(widget.val(), SelectionValue::Multiple(Vec::new()));
        assert_eq!(changes.lock().len(), 2);
    }

    #[test]
    fn test_option_activation_single_replaces_value() {
        let mut widget = build(
            NativeSelect::single()
                .with_items([("x", "Ex"), ("y", "Why")])
                .with_value(SelectionValue::from("x")),
            Settings::default(),
        );
        let changes = record_changes(&widget);
        let y = widget.panel().unwrap().handle_of("y").unwrap();

        widget.event(&SelectEvent::OptionActivated(y));
        assert_eq!(widget.val(), SelectionValue::from("y"));
        assert_eq!(widget.panel().unwrap().checked_values(), strings(&["y"]));
        assert_eq!(widget.summary(), Some("Why"));
        assert_eq!(*changes.lock(), vec![SelectionValue::from("y")]);
    }

    #[test]
    fn test_disabled_option_is_inert() {
        let mut widget = build(
            NativeSelect::multiple().with_option(SourceOption::new("a", "A").with_disabled(true)),
            Settings::default(),
        );
        let changes = record_changes(&widget);
        let handle = widget.panel().unwrap().handle_of("a").unwrap();
        assert!(widget.event(&SelectEvent::OptionActivated(handle)));
        assert!(widget.val().is_empty());
        assert!(changes.lock().is_empty());
    }

    #[test]
    fn test_toggle_action_activation() {
        let settings = Settings::default().with_action(ActionSpec::Toggle {
            values: strings(&["a", "b"]),
            text: None,
        });
        let mut widget = build(multi(), settings);
        assert_eq!(
            widget.actions()[0].toggle_display().unwrap().state,
            ToggleState::Unchecked
        );

        widget.event(&SelectEvent::ActionActivated {
            index: 0,
            checked: true,
        });
        assert_eq!(widget.val(), SelectionValue::Multiple(strings(&["b", "a"])));
        assert_eq!(
            widget.actions()[0].toggle_display().unwrap().state,
            ToggleState::Checked
        );

        widget.event(&SelectEvent::ActionActivated {
            index: 0,
            checked: false,
        });
        assert!(widget.val().is_empty());
        assert!(!widget.event(&SelectEvent::ActionActivated {
            index: 5,
            checked: true
        }));
    }

    #[test]
    fn test_filter_survives_refresh() {
        let settings = Settings::default().with_action(ActionSpec::QuickFilter { placeholder: None });
        let mut widget = build(multi(), settings);

        assert!(widget.event(&SelectEvent::FilterEdited {
            index: 0,
            text: "GAM".into(),
        }));
        assert_eq!(widget.panel().unwrap().visible_values(), strings(&["c"]));
        assert_eq!(widget.actions()[0].label(), "GAM");

        widget.refresh_options();
        assert_eq!(widget.panel().unwrap().visible_values(), strings(&["c"]));
    }

    #[test]
    fn test_open_places_panel_below_control() {
        let mut widget = build(
            NativeSelect::single()
                .with_items([("x", "X")])
                .with_bounds(Rect::new(5.0, 10.0, 80.0, 20.0)),
            Settings::default(),
        );
        widget.open();
        assert!(widget.is_open());
        let placement = widget.dropdown().placement().unwrap();
        assert_eq!((placement.left, placement.top, placement.min_width), (5.0, 29.0, 80.0));

        assert!(widget.event(&SelectEvent::ControlClicked));
        assert!(!widget.is_open());
    }

    #[test]
    fn test_list_mode_has_no_open_state() {
        let mut widget = build(multi(), Settings::default());
        widget.open();
        assert!(!widget.is_open());
        widget.close();
        assert!(!widget.dropdown().is_open());
    }

    #[test]
    fn test_options_patch_switches_mode() {
        let mut widget = build(multi(), Settings::default());
        widget.set_val(SelectionValue::Multiple(strings(&["a"])));
        widget
            .options(SettingsPatch::default().with_display(DisplayMode::Dropdown))
            .unwrap();
        assert_eq!(widget.display(), DisplayMode::Dropdown);
        assert_eq!(widget.summary(), Some("Alpha"));

        let err = widget
            .options(SettingsPatch {
                indent_step: Some(-2.0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, lattice_select_core::SelectError::Settings(_)));
        assert_eq!(widget.settings().indent_step, 3.0);
    }

    #[test]
    fn test_drop_releases_dropdown() {
        let coordinator = Arc::new(DropdownCoordinator::new());
        let mut widget = CustomSelect::builder(NativeSelect::single())
            .coordinator(coordinator.clone())
            .build()
            .unwrap();
        widget.open();
        assert!(coordinator.active().is_some());
        drop(widget);
        assert!(coordinator.active().is_none());
    }
}
