//! Leptos Swipe Utilities
//!
//! Pointer-event glue for the mobile pager and the long-press context menu.
//! The gesture decisions live in `shopping_core` (pure state machines);
//! this crate owns the Leptos signals, pointer capture, and dwell timers.
//! A single pointer-event path is used throughout: every WebView this app
//! targets implements pointer events, so there is no legacy touch branch.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use shopping_core::long_press::{LongPressTracker, PressMove, LONG_PRESS_DWELL_MS};
use shopping_core::pager::{MoveUpdate, SwipeEnd, SwipeTracker};

pub use shopping_core::pager::{step_index, SwipeDirection};

/// Pager gesture handle: reactive drag state plus the tracker it drives.
///
/// `offset_px` follows the finger 1:1 while a horizontal drag is active;
/// `swiping` switches the track's CSS transition off for the duration.
#[derive(Clone, Copy)]
pub struct Swipe {
    pub offset_px: RwSignal<f64>,
    pub swiping: RwSignal<bool>,
    /// Container width sampled at gesture start, for percent transforms.
    pub container_width: RwSignal<f64>,
    tracker: StoredValue<SwipeTracker>,
    suppress_tap: StoredValue<bool>,
}

impl Default for Swipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Swipe {
    pub fn new() -> Self {
        Self {
            offset_px: RwSignal::new(0.0),
            swiping: RwSignal::new(false),
            container_width: RwSignal::new(1.0),
            tracker: StoredValue::new(SwipeTracker::new()),
            suppress_tap: StoredValue::new(false),
        }
    }

    /// Drag offset as a percentage of the container width.
    pub fn offset_percent(&self) -> f64 {
        let width = self.container_width.get();
        if width <= 0.0 {
            return 0.0;
        }
        self.offset_px.get() / width * 100.0
    }

    pub fn pointer_down(&self, ev: &web_sys::PointerEvent) {
        let tracked = self.tracker.try_update_value(|t| {
            t.pointer_down(ev.pointer_id(), ev.client_x() as f64, ev.client_y() as f64)
        });
        if tracked != Some(true) {
            return;
        }
        if let Some(element) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        {
            let width = element.client_width();
            self.container_width.set(if width > 0 { width as f64 } else { 1.0 });
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }

    /// Feeds a pointer move through the tracker. `cancel_press` runs the
    /// instant the gesture is classified, horizontally or vertically: an
    /// armed long-press dwell on the same pointer must not win once the
    /// finger is committed to dragging or scrolling.
    pub fn pointer_move(&self, ev: &web_sys::PointerEvent, cancel_press: impl FnOnce()) {
        let update = self
            .tracker
            .try_update_value(|t| {
                t.pointer_move(ev.pointer_id(), ev.client_x() as f64, ev.client_y() as f64)
            })
            .unwrap_or(MoveUpdate::Ignored);

        match update {
            MoveUpdate::SwipeStarted(offset) => {
                ev.prevent_default();
                cancel_press();
                self.swiping.set(true);
                self.offset_px.set(offset);
            }
            MoveUpdate::Dragging(offset) => {
                ev.prevent_default();
                self.offset_px.set(offset);
            }
            MoveUpdate::Surrendered => cancel_press(),
            MoveUpdate::Pending | MoveUpdate::Ignored => {}
        }
    }

    /// Settles the gesture and returns the outcome. The caller applies
    /// `Commit` to its active-list selection.
    pub fn pointer_up(&self, ev: &web_sys::PointerEvent) -> Option<SwipeEnd> {
        let was_swiping = self.tracker.with_value(SwipeTracker::is_swiping);
        let end = self
            .tracker
            .try_update_value(|t| t.pointer_up(ev.pointer_id()))
            .flatten()?;
        if was_swiping {
            // The browser may still deliver a click on the element under
            // the finger; it must not toggle anything.
            self.suppress_tap.set_value(true);
        }
        self.settle();
        Some(end)
    }

    /// pointercancel / viewport-class change / unmount: snap back to the
    /// committed index with no partial offset left visible.
    pub fn cancel_gesture(&self) {
        self.tracker.update_value(SwipeTracker::cancel);
        self.settle();
    }

    /// One-shot: true for the first click after a completed swipe.
    pub fn take_suppressed_tap(&self) -> bool {
        self.suppress_tap
            .try_update_value(|s| std::mem::take(s))
            .unwrap_or(false)
    }

    fn settle(&self) {
        self.offset_px.set(0.0);
        self.swiping.set(false);
    }
}

/// Long-press handle shared by every item on a screen. Only one dwell can
/// be armed at a time (single pointer), so a page needs exactly one of
/// these; each item passes its own `target` on pointer down, mirroring the
/// register-current-cancel pattern of the reference UI.
pub struct LongPress<T: 'static> {
    tracker: StoredValue<LongPressTracker>,
    target: StoredValue<Option<T>, LocalStorage>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
    on_fire: StoredValue<Rc<dyn Fn(T, (f64, f64))>, LocalStorage>,
}

impl<T: 'static> Clone for LongPress<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for LongPress<T> {}

impl<T: Clone + 'static> LongPress<T> {
    /// `on_fire` receives the pressed item's target value and the anchor
    /// point for the context menu.
    pub fn new(on_fire: impl Fn(T, (f64, f64)) + 'static) -> Self {
        Self {
            tracker: StoredValue::new(LongPressTracker::new()),
            target: StoredValue::new_local(None),
            timer: StoredValue::new_local(None),
            on_fire: StoredValue::new_local(Rc::new(on_fire)),
        }
    }

    /// Arms the dwell for touch/pen presses. Mouse input goes through
    /// [`LongPress::context_menu`] instead; a non-primary pointer cancels
    /// whatever was armed.
    pub fn pointer_down(&self, target: T, ev: &web_sys::PointerEvent) {
        if !ev.is_primary() {
            self.cancel();
            return;
        }
        let pointer_type = ev.pointer_type();
        if pointer_type != "touch" && pointer_type != "pen" {
            return;
        }

        self.target.set_value(Some(target));
        self.tracker.update_value(|t| {
            t.press(ev.pointer_id(), ev.client_x() as f64, ev.client_y() as f64);
        });
        self.restart_timer();
    }

    pub fn pointer_move(&self, ev: &web_sys::PointerEvent) {
        let outcome = self
            .tracker
            .try_update_value(|t| {
                t.observe_move(ev.pointer_id(), ev.client_x() as f64, ev.client_y() as f64)
            })
            .unwrap_or(PressMove::Inactive);
        if outcome == PressMove::Cancelled {
            self.clear_timer();
            self.target.set_value(None);
        }
    }

    /// Release before the dwell elapsed: disarm, keep the normal tap.
    pub fn pointer_up(&self, ev: &web_sys::PointerEvent) {
        self.tracker.update_value(|t| t.release(ev.pointer_id()));
        self.clear_timer();
    }

    /// Forced cancellation: competing swipe, pointercancel, unmount.
    pub fn cancel(&self) {
        self.tracker.update_value(LongPressTracker::cancel);
        self.clear_timer();
        self.target.set_value(None);
    }

    /// Desktop right-click: fires at the event point immediately and keeps
    /// the native menu closed.
    pub fn context_menu(&self, target: T, ev: &web_sys::MouseEvent) {
        ev.prevent_default();
        let anchor = self
            .tracker
            .try_update_value(|t| t.fire_immediately(ev.client_x() as f64, ev.client_y() as f64));
        if let Some(anchor) = anchor {
            (self.on_fire.get_value())(target, anchor);
        }
    }

    /// One-shot check consumed by the item's click handler.
    pub fn take_suppressed_click(&self) -> bool {
        self.tracker
            .try_update_value(LongPressTracker::take_suppress_click)
            .unwrap_or(false)
    }

    fn restart_timer(&self) {
        self.clear_timer();
        let this = *self;
        let timeout = Timeout::new(LONG_PRESS_DWELL_MS, move || this.dwell_elapsed());
        self.timer.set_value(Some(timeout));
    }

    fn clear_timer(&self) {
        if let Some(timeout) = self.timer.try_update_value(Option::take).flatten() {
            timeout.cancel();
        }
    }

    fn dwell_elapsed(&self) {
        let anchor = self.tracker.try_update_value(LongPressTracker::dwell_elapsed);
        let Some(Some(anchor)) = anchor else {
            return;
        };
        if let Some(target) = self.target.try_update_value(Option::take).flatten() {
            (self.on_fire.get_value())(target, anchor);
        }
    }
}
