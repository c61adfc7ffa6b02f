//! Checklist Item Component
//!
//! One shopping entry: tap toggles, long press (or right-click) opens the
//! context menu. Clicks trailing a fired long press or a completed swipe
//! are consumed here so they never toggle the item.

use leptos::prelude::*;
use leptos_swipe::{LongPress, Swipe};

use shopping_core::item::CheckItem;

use crate::hooks::ShoppingLists;

/// An item addressed across lists, carried from press to menu action.
#[derive(Clone)]
pub struct ItemRef {
    pub slug: String,
    pub item: CheckItem,
}

#[component]
pub fn ChecklistItem(
    slug: String,
    item: CheckItem,
    lists: ShoppingLists,
    press: LongPress<ItemRef>,
    /// Present on the mobile pager; the desktop board has no swipe gesture.
    #[prop(optional_no_strip)]
    swipe: Option<Swipe>,
) -> impl IntoView {
    let target = ItemRef {
        slug: slug.clone(),
        item: item.clone(),
    };
    let done = item.done;
    let title = item.title.clone();

    let toggle = {
        let lists = lists.clone();
        let slug = slug.clone();
        let item = item.clone();
        move || {
            if press.take_suppressed_click() {
                return;
            }
            if let Some(swipe) = swipe {
                if swipe.take_suppressed_tap() {
                    return;
                }
            }
            lists.toggle(&slug, &item);
        }
    };

    let on_click = {
        let toggle = toggle.clone();
        move |_| toggle()
    };
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        if key == "Enter" || key == " " {
            ev.prevent_default();
            toggle();
        }
    };

    let down_target = target.clone();
    let menu_target = target.clone();

    view! {
        <li
            class=if done { "check-item done" } else { "check-item" }
            role="button"
            tabindex="0"
            aria-pressed=if done { "true" } else { "false" }
            // Vertical panning stays native; horizontal moves feed the pager.
            style:touch-action="pan-y"
            on:click=on_click
            on:keydown=on_keydown
            on:pointerdown=move |ev| press.pointer_down(down_target.clone(), &ev)
            on:pointermove=move |ev| press.pointer_move(&ev)
            on:pointerup=move |ev| press.pointer_up(&ev)
            on:pointercancel=move |_| press.cancel()
            on:contextmenu=move |ev| press.context_menu(menu_target.clone(), &ev)
        >
            <span class="check-mark">{if done { "\u{2714}" } else { "\u{2212}" }}</span>
            <span class="check-title">{title}</span>
        </li>
    }
}
