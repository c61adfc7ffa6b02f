//! Item Context Menu Component
//!
//! Fixed-position menu opened by a long press (or desktop right-click).
//! A full-screen transparent backdrop catches outside clicks, so dismissal
//! needs no document-level listener.

use leptos::prelude::*;

use crate::texts;

const MENU_WIDTH_PX: f64 = 160.0;
const MENU_HEIGHT_PX: f64 = 96.0;
const MENU_MARGIN_PX: f64 = 8.0;

/// Keeps the menu inside the viewport with a small margin.
fn clamp_position(x: f64, y: f64) -> (f64, f64) {
    let viewport = web_sys::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            (width, height)
        })
        .unwrap_or((0.0, 0.0));

    let left = x
        .min(viewport.0 - MENU_WIDTH_PX - MENU_MARGIN_PX)
        .max(MENU_MARGIN_PX);
    let top = y
        .min(viewport.1 - MENU_HEIGHT_PX - MENU_MARGIN_PX)
        .max(MENU_MARGIN_PX);
    (left, top)
}

#[component]
pub fn ContextMenu(
    x: f64,
    y: f64,
    #[prop(into)] on_rename: UnsyncCallback<()>,
    #[prop(into)] on_delete: UnsyncCallback<()>,
    #[prop(into)] on_close: UnsyncCallback<()>,
) -> impl IntoView {
    let (left, top) = clamp_position(x, y);

    view! {
        <div class="menu-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="context-menu"
                style=format!("left: {left}px; top: {top}px; width: {MENU_WIDTH_PX}px;")
                on:click=|ev| ev.stop_propagation()
                // The menu itself must not re-open on right-click.
                on:contextmenu=|ev| ev.prevent_default()
            >
                <button class="menu-entry" on:click=move |_| on_rename.run(())>
                    {texts::shopping::MENU_RENAME}
                </button>
                <button class="menu-entry menu-entry-danger" on:click=move |_| on_delete.run(())>
                    {texts::shopping::MENU_DELETE}
                </button>
            </div>
        </div>
    }
}
