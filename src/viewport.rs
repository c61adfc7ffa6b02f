//! Viewport width signal.
//!
//! The shopping page only needs the window width and a resize notification
//! to pick the desktop grid or the mobile pager.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Below this width the shopping page renders the swipeable pager.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

pub fn is_mobile(width: f64) -> bool {
    width < MOBILE_BREAKPOINT_PX
}

fn current_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(MOBILE_BREAKPOINT_PX)
}

/// Window width, re-read on every `resize`. The listener lives for the app
/// lifetime (the shell never unmounts).
pub fn use_viewport_width() -> ReadSignal<f64> {
    let (width, set_width) = signal(current_width());

    let on_resize = Closure::<dyn FnMut()>::new(move || {
        set_width.set(current_width());
    });
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    }
    on_resize.forget();

    width
}
