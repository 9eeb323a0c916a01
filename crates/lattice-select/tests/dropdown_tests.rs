//! Dropdown coordination tests across several widgets.

use std::sync::Arc;

use parking_lot::Mutex;

use lattice_select::prelude::*;
use lattice_select::source::NativeSelect;
use lattice_select::{Rect, WidgetId};

fn dropdown(coordinator: &Arc<DropdownCoordinator>, bounds: Rect) -> CustomSelect {
    CustomSelect::builder(
        NativeSelect::single()
            .with_items([("x", "X"), ("y", "Y")])
            .with_bounds(bounds),
    )
    .coordinator(coordinator.clone())
    .build()
    .expect("valid settings")
}

#[derive(Debug, Clone, PartialEq)]
enum Transition {
    Opened(WidgetId),
    Closed(WidgetId),
}

fn watch(widget: &CustomSelect, log: &Arc<Mutex<Vec<Transition>>>) {
    let id = widget.id();
    let opened = log.clone();
    widget
        .dropdown()
        .opened
        .connect(move |_| opened.lock().push(Transition::Opened(id)));
    let closed = log.clone();
    widget
        .dropdown()
        .closed
        .connect(move |_| closed.lock().push(Transition::Closed(id)));
}

#[test]
fn test_opening_b_closes_a_first() {
    let coordinator = Arc::new(DropdownCoordinator::new());
    let mut a = dropdown(&coordinator, Rect::new(0.0, 0.0, 100.0, 20.0));
    let mut b = dropdown(&coordinator, Rect::new(200.0, 0.0, 100.0, 20.0));

    let log = Arc::new(Mutex::new(Vec::new()));
    watch(&a, &log);
    watch(&b, &log);

    // Record how many handles are open whenever B opens
    let open_at_b = Arc::new(Mutex::new(Vec::new()));
    let sink = open_at_b.clone();
    let a_handle = a.dropdown().clone();
    b.dropdown()
        .opened
        .connect(move |_| sink.lock().push(a_handle.is_open()));

    a.open();
    assert!(a.is_open());
    b.open();

    assert!(!a.is_open());
    assert!(b.is_open());
    assert_eq!(*open_at_b.lock(), vec![false]);
    assert_eq!(
        *log.lock(),
        vec![
            Transition::Opened(a.id()),
            Transition::Closed(a.id()),
            Transition::Opened(b.id()),
        ]
    );
}

#[test]
fn test_toggle_and_repeated_open() {
    let coordinator = Arc::new(DropdownCoordinator::new());
    let mut widget = dropdown(&coordinator, Rect::new(0.0, 0.0, 50.0, 10.0));
    let log = Arc::new(Mutex::new(Vec::new()));
    watch(&widget, &log);

    widget.toggle();
    widget.open();
    assert_eq!(log.lock().len(), 1);

    widget.toggle();
    assert!(!widget.is_open());
    widget.close();
    assert_eq!(log.lock().len(), 2);
}

#[test]
fn test_outside_interaction_closes_active_dropdown() {
    let coordinator = Arc::new(DropdownCoordinator::new());
    let mut a = dropdown(&coordinator, Rect::new(0.0, 0.0, 50.0, 10.0));
    let b = dropdown(&coordinator, Rect::new(0.0, 40.0, 50.0, 10.0));

    a.open();
    assert!(!coordinator.outside_interaction(InteractionTarget::Panel(a.id())));
    assert!(a.is_open());

    assert!(coordinator.outside_interaction(InteractionTarget::Panel(b.id())));
    assert!(!a.is_open());

    a.open();
    assert!(coordinator.outside_interaction(InteractionTarget::Elsewhere));
    assert!(coordinator.active().is_none());
}

#[test]
fn test_option_click_inside_panel_keeps_dropdown_open() {
    let coordinator = Arc::new(DropdownCoordinator::new());
    let mut widget = dropdown(&coordinator, Rect::new(0.0, 0.0, 50.0, 10.0));
    widget.open();

    let y = widget.panel().unwrap().handle_of("y").unwrap();
    assert!(widget.event(&SelectEvent::OptionActivated(y)));
    // The panel consumed the event, so the host never reports it as outside
    assert!(widget.is_open());
    assert_eq!(widget.summary(), Some("Y"));
}

#[test]
fn test_list_widget_open_closes_active_dropdown() {
    let coordinator = Arc::new(DropdownCoordinator::new());
    let mut dropdown_widget = dropdown(&coordinator, Rect::new(0.0, 0.0, 50.0, 10.0));
    let mut list = CustomSelect::builder(NativeSelect::multiple().with_items([("a", "A")]))
        .coordinator(coordinator.clone())
        .build()
        .expect("valid settings");
    assert_eq!(list.display(), DisplayMode::List);

    dropdown_widget.open();
    list.open();
    assert!(!dropdown_widget.is_open());
    assert!(!list.is_open());
    assert!(coordinator.active().is_none());
}

#[test]
fn test_placement_follows_control_bounds() {
    let coordinator = Arc::new(DropdownCoordinator::new());
    let mut widget = CustomSelect::builder(
        NativeSelect::single()
            .with_items([("x", "X")])
            .with_bounds(Rect::new(12.0, 30.0, 140.0, 22.0)),
    )
    .settings(Settings {
        panel_overlap: 0.0,
        ..Settings::default()
    })
    .coordinator(coordinator)
    .build()
    .expect("valid settings");

    let placements = Arc::new(Mutex::new(Vec::new()));
    let sink = placements.clone();
    widget
        .dropdown()
        .opened
        .connect(move |placement: &PanelPlacement| sink.lock().push(*placement));

    widget.open();
    assert_eq!(
        *placements.lock(),
        vec![PanelPlacement {
            left: 12.0,
            top: 52.0,
            min_width: 140.0,
        }]
    );
}
