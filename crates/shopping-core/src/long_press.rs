//! Long-press dwell tracker.
//!
//! Per-gesture watcher behind the item context menu: a touch/pen press that
//! stays within a 10 px tolerance for 600 ms fires; any earlier movement,
//! release, or competing swipe cancels without side effects. Timer
//! scheduling lives in the UI layer; this module only decides.

/// Hold duration before a press is promoted to a context action.
pub const LONG_PRESS_DWELL_MS: u32 = 600;

/// Euclidean movement that cancels an armed dwell.
pub const LONG_PRESS_MOVE_TOLERANCE_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressPhase {
    Idle,
    /// Pointer down, dwell timer running.
    Armed,
    /// Dwell elapsed; the context menu is up and the next click is void.
    Fired,
}

/// Outcome of a pointer-move delivery while a dwell may be armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressMove {
    /// Not the tracked pointer, or nothing armed.
    Inactive,
    /// Still within tolerance; the anchor follows the finger.
    Kept,
    /// Moved past tolerance: dwell cancelled, and the trailing tap must not
    /// toggle the item either.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct LongPressTracker {
    phase: PressPhase,
    pointer_id: Option<i32>,
    start: (f64, f64),
    last: (f64, f64),
    suppress_click: bool,
}

impl Default for LongPressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LongPressTracker {
    pub fn new() -> Self {
        Self {
            phase: PressPhase::Idle,
            pointer_id: None,
            start: (0.0, 0.0),
            last: (0.0, 0.0),
            suppress_click: false,
        }
    }

    pub fn phase(&self) -> PressPhase {
        self.phase
    }

    pub fn is_armed(&self) -> bool {
        self.phase == PressPhase::Armed
    }

    /// Arms the dwell for a new press, replacing any previous one. The
    /// caller restarts its timer whenever this returns true.
    pub fn press(&mut self, pointer_id: i32, x: f64, y: f64) -> bool {
        self.phase = PressPhase::Armed;
        self.pointer_id = Some(pointer_id);
        self.start = (x, y);
        self.last = (x, y);
        self.suppress_click = false;
        true
    }

    pub fn observe_move(&mut self, pointer_id: i32, x: f64, y: f64) -> PressMove {
        if self.phase != PressPhase::Armed || self.pointer_id != Some(pointer_id) {
            return PressMove::Inactive;
        }
        let dx = x - self.start.0;
        let dy = y - self.start.1;
        if (dx * dx + dy * dy).sqrt() > LONG_PRESS_MOVE_TOLERANCE_PX {
            self.phase = PressPhase::Idle;
            self.pointer_id = None;
            self.suppress_click = true;
            PressMove::Cancelled
        } else {
            self.last = (x, y);
            PressMove::Kept
        }
    }

    /// Called when the dwell timer elapses. Returns the anchor point when
    /// the press is still armed; stale timers of an already cancelled press
    /// return `None`.
    pub fn dwell_elapsed(&mut self) -> Option<(f64, f64)> {
        if self.phase != PressPhase::Armed {
            return None;
        }
        self.phase = PressPhase::Fired;
        self.pointer_id = None;
        self.suppress_click = true;
        Some(self.last)
    }

    /// Desktop `contextmenu` path: fires immediately at the event point,
    /// bypassing the dwell.
    pub fn fire_immediately(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.phase = PressPhase::Fired;
        self.pointer_id = None;
        self.last = (x, y);
        self.suppress_click = true;
        (x, y)
    }

    /// Pointer released before the dwell elapsed: disarm quietly. The
    /// normal tap action remains allowed.
    pub fn release(&mut self, pointer_id: i32) {
        if self.pointer_id == Some(pointer_id) && self.phase == PressPhase::Armed {
            self.phase = PressPhase::Idle;
            self.pointer_id = None;
        }
    }

    /// Forced cancellation: competing swipe, pointercancel, unmount.
    pub fn cancel(&mut self) {
        if self.phase == PressPhase::Armed {
            self.phase = PressPhase::Idle;
        }
        self.pointer_id = None;
    }

    /// One-shot flag consumed by the click handler: true exactly once after
    /// a fired dwell (or a movement-cancelled press), so the synthetic click
    /// that follows never toggles the item.
    pub fn take_suppress_click(&mut self) -> bool {
        let suppress = self.suppress_click;
        self.suppress_click = false;
        if self.phase == PressPhase::Fired {
            self.phase = PressPhase::Idle;
        }
        suppress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_press_fires_at_the_anchor_and_suppresses_click() {
        let mut t = LongPressTracker::new();
        t.press(1, 120.0, 300.0);
        assert_eq!(t.observe_move(1, 123.0, 304.0), PressMove::Kept);
        assert_eq!(t.dwell_elapsed(), Some((123.0, 304.0)));
        assert_eq!(t.phase(), PressPhase::Fired);
        // The synthetic click right after firing is consumed once.
        assert!(t.take_suppress_click());
        assert!(!t.take_suppress_click());
    }

    #[test]
    fn movement_past_tolerance_cancels_menu_and_tap() {
        let mut t = LongPressTracker::new();
        t.press(1, 100.0, 100.0);
        assert_eq!(t.observe_move(1, 108.0, 108.0), PressMove::Cancelled);
        // A stale timer firing later must not open the menu.
        assert_eq!(t.dwell_elapsed(), None);
        // ...and the release tap must not toggle either.
        assert!(t.take_suppress_click());
    }

    #[test]
    fn movement_within_tolerance_keeps_the_dwell() {
        let mut t = LongPressTracker::new();
        t.press(1, 100.0, 100.0);
        assert_eq!(t.observe_move(1, 106.0, 107.0), PressMove::Kept);
        assert!(t.is_armed());
    }

    #[test]
    fn early_release_allows_the_normal_tap() {
        let mut t = LongPressTracker::new();
        t.press(1, 100.0, 100.0);
        t.release(1);
        assert_eq!(t.phase(), PressPhase::Idle);
        assert_eq!(t.dwell_elapsed(), None);
        assert!(!t.take_suppress_click());
    }

    #[test]
    fn new_press_replaces_a_previous_armed_one() {
        let mut t = LongPressTracker::new();
        t.press(1, 100.0, 100.0);
        t.press(2, 200.0, 200.0);
        // Movement of the stale pointer is no longer observed.
        assert_eq!(t.observe_move(1, 150.0, 150.0), PressMove::Inactive);
        assert_eq!(t.dwell_elapsed(), Some((200.0, 200.0)));
    }

    #[test]
    fn competing_swipe_cancels_cleanly() {
        let mut t = LongPressTracker::new();
        t.press(1, 100.0, 100.0);
        t.cancel();
        assert_eq!(t.phase(), PressPhase::Idle);
        assert_eq!(t.dwell_elapsed(), None);
        assert!(!t.take_suppress_click());
    }

    #[test]
    fn context_menu_event_fires_without_dwell() {
        let mut t = LongPressTracker::new();
        assert_eq!(t.fire_immediately(50.0, 60.0), (50.0, 60.0));
        assert_eq!(t.phase(), PressPhase::Fired);
        assert!(t.take_suppress_click());
        assert_eq!(t.phase(), PressPhase::Idle);
    }
}
