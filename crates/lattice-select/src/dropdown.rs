//! Dropdown coordination.
//!
//! At most one dropdown panel is visible at a time. Every widget in dropdown
//! mode owns a [`DropdownHandle`] and opens its panel by acquiring the single
//! active slot of a [`DropdownCoordinator`]. Acquiring closes the previous
//! holder first, so two handles are never open at once.
//!
//! Widgets share [`DropdownCoordinator::shared`] unless a coordinator is
//! injected explicitly, which keeps independent widget sets (and tests)
//! isolated from each other.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use lattice_select_core::logging::targets;
use lattice_select_core::{Property, Signal};
use parking_lot::Mutex;

use crate::geometry::Rect;

/// Pixels the panel overlaps the control's bottom edge by default.
pub const DEFAULT_PANEL_OVERLAP: f32 = 1.0;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an open dropdown panel is placed, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelPlacement {
    pub left: f32,
    pub top: f32,
    pub min_width: f32,
}

impl PanelPlacement {
    /// Anchor a panel to the bottom-left corner of `anchor`, overlapping its
    /// bottom edge by `overlap` and at least as wide as it.
    pub fn below(anchor: Rect, overlap: f32) -> Self {
        Self {
            left: anchor.left(),
            top: anchor.bottom() - overlap,
            min_width: anchor.width,
        }
    }
}

/// Open/closed state and notifications of one widget's dropdown panel.
pub struct DropdownHandle {
    id: WidgetId,
    open: Property<bool>,
    placement: Property<Option<PanelPlacement>>,
    /// Emitted after the panel became the active dropdown.
    pub opened: Signal<PanelPlacement>,
    /// Emitted after the panel stopped being the active dropdown.
    pub closed: Signal<()>,
}

impl DropdownHandle {
    /// Create a closed handle for a widget.
    pub fn new(id: WidgetId) -> Self {
        Self {
            id,
            open: Property::new(false),
            placement: Property::new(None),
            opened: Signal::new(),
            closed: Signal::new(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Whether the panel is currently shown.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// The placement computed by the last open, while open.
    pub fn placement(&self) -> Option<PanelPlacement> {
        self.placement.get()
    }

    fn mark_open(&self, placement: PanelPlacement) {
        self.placement.set_silent(Some(placement));
        if self.open.set(true) {
            self.opened.emit(placement);
        }
    }

    fn mark_closed(&self) {
        self.placement.set_silent(None);
        if self.open.set(false) {
            self.closed.emit(());
        }
    }
}

impl fmt::Debug for DropdownHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownHandle")
            .field("id", &self.id)
            .field("open", &self.is_open())
            .field("placement", &self.placement())
            .finish()
    }
}

/// Where an interaction outside any control happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionTarget {
    /// Inside the option panel of the given widget.
    Panel(WidgetId),
    /// Anywhere else.
    Elsewhere,
}

/// Owner of the single "active dropdown" slot.
#[derive(Default)]
pub struct DropdownCoordinator {
    active: Mutex<Option<Arc<DropdownHandle>>>,
}

impl DropdownCoordinator {
    /// Create a coordinator with an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide coordinator used by widgets without an explicit one.
    pub fn shared() -> Arc<DropdownCoordinator> {
        static SHARED: OnceLock<Arc<DropdownCoordinator>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(DropdownCoordinator::new())))
    }

    /// The handle currently holding the slot.
    pub fn active(&self) -> Option<Arc<DropdownHandle>> {
        self.active.lock().clone()
    }

    /// Whether the given widget holds the slot.
    pub fn is_active(&self, id: WidgetId) -> bool {
        self.active.lock().as_ref().is_some_and(|h| h.id() == id)
    }

    /// Give the slot to `handle`, closing the previous holder first.
    ///
    /// Returns `false` without any notification if `handle` already holds
    /// the slot.
    pub fn acquire(&self, handle: &Arc<DropdownHandle>, placement: PanelPlacement) -> bool {
        if self.is_active(handle.id()) {
            return false;
        }
        self.close_active();

        *self.active.lock() = Some(Arc::clone(handle));
        tracing::debug!(
            target: targets::DROPDOWN,
            widget = %handle.id(),
            left = placement.left,
            top = placement.top,
            "dropdown opened"
        );
        handle.mark_open(placement);
        true
    }

    /// Clear the slot if `id` holds it, emitting its close notification.
    ///
    /// Returns whether anything was closed.
    pub fn release(&self, id: WidgetId) -> bool {
        let released = {
            let mut active = self.active.lock();
            if active.as_ref().is_some_and(|h| h.id() == id) {
                active.take()
            } else {
                None
            }
        };
        match released {
            Some(handle) => {
                tracing::debug!(target: targets::DROPDOWN, widget = %id, "dropdown closed");
                handle.mark_closed();
                true
            }
            None => false,
        }
    }

    /// Close whichever handle holds the slot.
    pub fn close_active(&self) -> bool {
        let previous = self.active.lock().take();
        match previous {
            Some(handle) => {
                tracing::debug!(
                    target: targets::DROPDOWN,
                    widget = %handle.id(),
                    "dropdown closed"
                );
                handle.mark_closed();
                true
            }
            None => false,
        }
    }

    /// Report an interaction anywhere on the page.
    ///
    /// Closes the active dropdown unless the interaction happened inside its
    /// own option panel. Returns whether a dropdown was closed.
    pub fn outside_interaction(&self, target: InteractionTarget) -> bool {
        match (self.active().map(|h| h.id()), target) {
            (None, _) => false,
            (Some(active), InteractionTarget::Panel(id)) if active == id => false,
            (Some(_), _) => self.close_active(),
        }
    }
}

impl fmt::Debug for DropdownCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownCoordinator")
            .field("active", &self.active().map(|h| h.id()))
            .finish()
    }
}

static_assertions::assert_impl_all!(DropdownCoordinator: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> Arc<DropdownHandle> {
        Arc::new(DropdownHandle::new(WidgetId::next()))
    }

    fn placement() -> PanelPlacement {
        PanelPlacement::below(Rect::new(10.0, 20.0, 120.0, 24.0), DEFAULT_PANEL_OVERLAP)
    }

    #[test]
    fn test_placement_below_anchor() {
        let placement = placement();
        assert_eq!(placement.left, 10.0);
        assert_eq!(placement.top, 43.0);
        assert_eq!(placement.min_width, 120.0);
    }

    #[test]
    fn test_widget_ids_are_unique() {
        assert_ne!(WidgetId::next(), WidgetId::next());
    }

    #[test]
    fn test_acquire_closes_previous_first() {
        let coordinator = Arc::new(DropdownCoordinator::new());
        let a = handle();
        let b = handle();

        let seen_active = Arc::new(Mutex::new(Vec::new()));
        let seen = seen_active.clone();
        let observer = coordinator.clone();
        a.closed.connect(move |_| {
            seen.lock().push(observer.active().map(|h| h.id()));
        });

        assert!(coordinator.acquire(&a, placement()));
        assert!(a.is_open());
        assert!(coordinator.acquire(&b, placement()));

        assert!(!a.is_open());
        assert!(b.is_open());
        assert!(coordinator.is_active(b.id()));
        // A was closed while the slot was empty
        assert_eq!(*seen_active.lock(), vec![None]);
    }

    #[test]
    fn test_acquire_twice_is_noop() {
        let coordinator = DropdownCoordinator::new();
        let a = handle();
        let opened = Arc::new(Mutex::new(0));
        let counter = opened.clone();
        a.opened.connect(move |_| *counter.lock() += 1);

        assert!(coordinator.acquire(&a, placement()));
        assert!(!coordinator.acquire(&a, placement()));
        assert_eq!(*opened.lock(), 1);
        assert_eq!(a.placement(), Some(placement()));
    }

    #[test]
    fn test_release_only_by_holder() {
        let coordinator = DropdownCoordinator::new();
        let a = handle();
        let b = handle();
        coordinator.acquire(&a, placement());

        assert!(!coordinator.release(b.id()));
        assert!(coordinator.is_active(a.id()));
        assert!(coordinator.release(a.id()));
        assert!(coordinator.active().is_none());
        assert!(a.placement().is_none());
        assert!(!coordinator.release(a.id()));
    }

    #[test]
    fn test_outside_interaction() {
        let coordinator = DropdownCoordinator::new();
        let a = handle();
        let b = handle();
        assert!(!coordinator.outside_interaction(InteractionTarget::Elsewhere));

        coordinator.acquire(&a, placement());
        assert!(!coordinator.outside_interaction(InteractionTarget::Panel(a.id())));
        assert!(coordinator.is_active(a.id()));

        assert!(coordinator.outside_interaction(InteractionTarget::Panel(b.id())));
        assert!(!a.is_open());

        coordinator.acquire(&a, placement());
        assert!(coordinator.outside_interaction(InteractionTarget::Elsewhere));
        assert!(coordinator.active().is_none());
    }
}
