//! Pager gesture state machine.
//!
//! Pure pointer-stream interpreter for the mobile list carousel:
//! `Idle → Tracking → {Swiping | VerticalScroll} → Idle`. Exactly one pointer
//! is honored per gesture; thresholds follow the shipped constants (12 px
//! axis-dominant entry, 64 px commit) and the pager wraps at both bounds.

/// Movement needed before a gesture is classified as horizontal or vertical.
pub const SWIPE_ENTRY_PX: f64 = 12.0;

/// Net horizontal displacement needed on release to change the active list.
pub const SWIPE_COMMIT_PX: f64 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipePhase {
    Idle,
    /// Pointer down, movement still under both thresholds.
    Tracking,
    /// Horizontal drag; the track follows the finger 1:1.
    Swiping,
    /// Vertical-dominant gesture surrendered to native scrolling.
    VerticalScroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left: advance to the next list.
    Next,
    /// Finger moved right: retreat to the previous list.
    Prev,
}

/// Outcome of a pointer-move delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveUpdate {
    /// Not the tracked pointer, or no gesture in progress.
    Ignored,
    /// Still under both thresholds.
    Pending,
    /// Classification just flipped to horizontal; default behavior should
    /// be suppressed from here on and any armed long-press cancelled.
    SwipeStarted(f64),
    /// Continuous horizontal offset in pixels.
    Dragging(f64),
    /// Classification flipped to vertical; the pager stands down.
    Surrendered,
}

/// Outcome of releasing the tracked pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeEnd {
    /// No drag happened; a normal tap/click may proceed.
    Tap,
    /// Drag below the commit threshold, or a surrendered vertical gesture:
    /// spring back to the committed index.
    Settle,
    /// Commit threshold met: move the active index one step.
    Commit(SwipeDirection),
}

#[derive(Debug, Clone)]
pub struct SwipeTracker {
    phase: SwipePhase,
    pointer_id: Option<i32>,
    start_x: f64,
    start_y: f64,
    offset_px: f64,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self {
            phase: SwipePhase::Idle,
            pointer_id: None,
            start_x: 0.0,
            start_y: 0.0,
            offset_px: 0.0,
        }
    }

    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    pub fn is_swiping(&self) -> bool {
        self.phase == SwipePhase::Swiping
    }

    pub fn offset_px(&self) -> f64 {
        self.offset_px
    }

    /// Starts tracking a pointer. A second concurrent pointer is ignored
    /// while a gesture is active; returns whether this pointer is tracked.
    pub fn pointer_down(&mut self, pointer_id: i32, x: f64, y: f64) -> bool {
        if self.phase != SwipePhase::Idle {
            return false;
        }
        self.phase = SwipePhase::Tracking;
        self.pointer_id = Some(pointer_id);
        self.start_x = x;
        self.start_y = y;
        self.offset_px = 0.0;
        true
    }

    pub fn pointer_move(&mut self, pointer_id: i32, x: f64, y: f64) -> MoveUpdate {
        if self.pointer_id != Some(pointer_id) {
            return MoveUpdate::Ignored;
        }
        let dx = x - self.start_x;
        let dy = y - self.start_y;

        match self.phase {
            SwipePhase::Tracking => {
                if dx.abs() >= SWIPE_ENTRY_PX && dx.abs() > dy.abs() {
                    self.phase = SwipePhase::Swiping;
                    self.offset_px = dx;
                    MoveUpdate::SwipeStarted(dx)
                } else if dy.abs() >= SWIPE_ENTRY_PX && dy.abs() > dx.abs() {
                    self.phase = SwipePhase::VerticalScroll;
                    MoveUpdate::Surrendered
                } else {
                    MoveUpdate::Pending
                }
            }
            SwipePhase::Swiping => {
                self.offset_px = dx;
                MoveUpdate::Dragging(dx)
            }
            SwipePhase::VerticalScroll => MoveUpdate::Ignored,
            SwipePhase::Idle => MoveUpdate::Ignored,
        }
    }

    /// Releases the tracked pointer and settles the gesture. Releases of
    /// untracked pointers return `None`.
    pub fn pointer_up(&mut self, pointer_id: i32) -> Option<SwipeEnd> {
        if self.pointer_id != Some(pointer_id) {
            return None;
        }
        let end = match self.phase {
            SwipePhase::Tracking => SwipeEnd::Tap,
            SwipePhase::VerticalScroll => SwipeEnd::Settle,
            SwipePhase::Swiping => {
                if self.offset_px.abs() >= SWIPE_COMMIT_PX {
                    if self.offset_px < 0.0 {
                        SwipeEnd::Commit(SwipeDirection::Next)
                    } else {
                        SwipeEnd::Commit(SwipeDirection::Prev)
                    }
                } else {
                    SwipeEnd::Settle
                }
            }
            SwipePhase::Idle => return None,
        };
        self.reset();
        Some(end)
    }

    /// Forced reset: pointercancel, viewport-class change, unmount. The
    /// track settles at the committed index with no partial offset left.
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = SwipePhase::Idle;
        self.pointer_id = None;
        self.offset_px = 0.0;
    }
}

/// Steps the active index one list in `direction`, wrapping at both bounds.
pub fn step_index(index: usize, len: usize, direction: SwipeDirection) -> usize {
    if len == 0 {
        return 0;
    }
    match direction {
        SwipeDirection::Next => (index + 1) % len,
        SwipeDirection::Prev => (index + len - 1) % len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(tracker: &mut SwipeTracker, id: i32, points: &[(f64, f64)]) {
        for &(x, y) in points {
            tracker.pointer_move(id, x, y);
        }
    }

    #[test]
    fn commit_threshold_swipe_advances() {
        let mut t = SwipeTracker::new();
        assert!(t.pointer_down(1, 240.0, 240.0));
        // 65px leftwards with low vertical deviation.
        drag(&mut t, 1, &[(200.0, 236.0), (175.0, 232.0)]);
        assert!(t.is_swiping());
        assert_eq!(t.pointer_move(1, 175.0, 232.0), MoveUpdate::Dragging(-65.0));
        assert_eq!(t.pointer_up(1), Some(SwipeEnd::Commit(SwipeDirection::Next)));
        assert_eq!(t.phase(), SwipePhase::Idle);
        assert_eq!(t.offset_px(), 0.0);
    }

    #[test]
    fn exact_commit_threshold_commits() {
        let mut t = SwipeTracker::new();
        t.pointer_down(1, 240.0, 240.0);
        // Exactly 64px: the threshold itself is enough.
        drag(&mut t, 1, &[(200.0, 238.0), (176.0, 236.0)]);
        assert_eq!(t.offset_px(), -64.0);
        assert_eq!(t.pointer_up(1), Some(SwipeEnd::Commit(SwipeDirection::Next)));
    }

    #[test]
    fn one_px_under_threshold_springs_back() {
        let mut t = SwipeTracker::new();
        t.pointer_down(1, 240.0, 240.0);
        drag(&mut t, 1, &[(200.0, 238.0), (177.0, 236.0)]);
        assert_eq!(t.offset_px(), -63.0);
        assert_eq!(t.pointer_up(1), Some(SwipeEnd::Settle));
    }

    #[test]
    fn rightward_commit_retreats() {
        let mut t = SwipeTracker::new();
        t.pointer_down(7, 100.0, 220.0);
        drag(&mut t, 7, &[(150.0, 224.0), (200.0, 228.0)]);
        assert_eq!(t.pointer_up(7), Some(SwipeEnd::Commit(SwipeDirection::Prev)));
    }

    #[test]
    fn vertical_dominant_gesture_never_pages() {
        let mut t = SwipeTracker::new();
        t.pointer_down(1, 200.0, 100.0);
        assert_eq!(t.pointer_move(1, 204.0, 140.0), MoveUpdate::Surrendered);
        // Large horizontal motion afterwards changes nothing.
        assert_eq!(t.pointer_move(1, 400.0, 300.0), MoveUpdate::Ignored);
        assert_eq!(t.pointer_up(1), Some(SwipeEnd::Settle));
    }

    #[test]
    fn tracking_release_is_a_tap() {
        let mut t = SwipeTracker::new();
        t.pointer_down(1, 100.0, 100.0);
        assert_eq!(t.pointer_move(1, 104.0, 102.0), MoveUpdate::Pending);
        assert_eq!(t.pointer_up(1), Some(SwipeEnd::Tap));
    }

    #[test]
    fn entry_threshold_requires_horizontal_dominance() {
        let mut t = SwipeTracker::new();
        t.pointer_down(1, 100.0, 100.0);
        // 12px on both axes: neither dominates.
        assert_eq!(t.pointer_move(1, 112.0, 112.0), MoveUpdate::Pending);
        assert_eq!(t.pointer_move(1, 114.0, 112.0), MoveUpdate::SwipeStarted(14.0));
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut t = SwipeTracker::new();
        assert!(t.pointer_down(1, 100.0, 100.0));
        assert!(!t.pointer_down(2, 300.0, 300.0));
        assert_eq!(t.pointer_move(2, 150.0, 300.0), MoveUpdate::Ignored);
        assert_eq!(t.pointer_up(2), None);
        // The first pointer is still live.
        drag(&mut t, 1, &[(30.0, 100.0)]);
        assert_eq!(t.pointer_up(1), Some(SwipeEnd::Commit(SwipeDirection::Next)));
    }

    #[test]
    fn cancel_resets_mid_drag() {
        let mut t = SwipeTracker::new();
        t.pointer_down(1, 240.0, 240.0);
        drag(&mut t, 1, &[(150.0, 238.0)]);
        assert!(t.is_swiping());
        t.cancel();
        assert_eq!(t.phase(), SwipePhase::Idle);
        assert_eq!(t.offset_px(), 0.0);
        assert_eq!(t.pointer_up(1), None);
    }

    /// Drives both gesture machines the way the pager container does once
    /// pointer capture retargets the stream to it: every move and release
    /// reaches the press tracker too, and a classified drag or scroll
    /// cancels the dwell.
    struct ContainerGesture {
        swipe: SwipeTracker,
        press: crate::long_press::LongPressTracker,
        pointer_id: i32,
    }

    impl ContainerGesture {
        fn begin(pointer_id: i32, x: f64, y: f64) -> Self {
            let mut swipe = SwipeTracker::new();
            let mut press = crate::long_press::LongPressTracker::new();
            swipe.pointer_down(pointer_id, x, y);
            press.press(pointer_id, x, y);
            Self {
                swipe,
                press,
                pointer_id,
            }
        }

        fn moved(&mut self, x: f64, y: f64) {
            self.press.observe_move(self.pointer_id, x, y);
            let update = self.swipe.pointer_move(self.pointer_id, x, y);
            if matches!(update, MoveUpdate::SwipeStarted(_) | MoveUpdate::Surrendered) {
                self.press.cancel();
            }
        }

        fn released(&mut self) -> Option<SwipeEnd> {
            self.press.release(self.pointer_id);
            self.swipe.pointer_up(self.pointer_id)
        }
    }

    #[test]
    fn forwarded_tap_release_disarms_the_dwell() {
        let mut g = ContainerGesture::begin(1, 120.0, 300.0);
        assert_eq!(g.released(), Some(SwipeEnd::Tap));
        // A dwell timer elapsing after the release must not open a menu.
        assert_eq!(g.press.dwell_elapsed(), None);
        assert!(!g.press.take_suppress_click());
    }

    #[test]
    fn forwarded_vertical_scroll_cancels_the_dwell() {
        let mut g = ContainerGesture::begin(1, 120.0, 300.0);
        g.moved(122.0, 320.0);
        assert_eq!(g.press.dwell_elapsed(), None);
        assert_eq!(g.released(), Some(SwipeEnd::Settle));
        // ...and the trailing tap must not toggle the scrolled-over item.
        assert!(g.press.take_suppress_click());
    }

    #[test]
    fn forwarded_horizontal_swipe_cancels_the_dwell() {
        let mut g = ContainerGesture::begin(1, 200.0, 300.0);
        g.moved(170.0, 302.0);
        assert!(g.swipe.is_swiping());
        assert_eq!(g.press.dwell_elapsed(), None);
    }

    #[test]
    fn step_index_wraps_both_ways() {
        assert_eq!(step_index(2, 3, SwipeDirection::Next), 0);
        assert_eq!(step_index(0, 3, SwipeDirection::Prev), 2);
        assert_eq!(step_index(0, 3, SwipeDirection::Next), 1);
        assert_eq!(step_index(1, 3, SwipeDirection::Prev), 0);
        assert_eq!(step_index(0, 0, SwipeDirection::Next), 0);
    }
}
