//! Shopping Page Component
//!
//! Owns the page-level interaction state: live list data, the viewport
//! split between the desktop board and the mobile pager, the shared
//! long-press handle, the context menu, and the add/rename dialog.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_swipe::{LongPress, Swipe};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use shopping_core::item::CheckItem;

use crate::components::checklist_item::ItemRef;
use crate::components::context_menu::ContextMenu;
use crate::components::dialog::TitleDialog;
use crate::components::shopping_board::ShoppingBoard;
use crate::components::shopping_pager::ShoppingPager;
use crate::context::use_app_context;
use crate::hooks::use_shopping_lists;
use crate::texts;
use crate::viewport::is_mobile;

#[derive(Clone)]
enum DialogState {
    Closed,
    Add { slug: String },
    Rename { slug: String, item: CheckItem },
}

#[derive(Clone)]
struct MenuState {
    target: ItemRef,
    x: f64,
    y: f64,
}

/// Document-level listener removed again on drop, so a page switch never
/// leaves a stale handler behind.
struct DocumentListener {
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl DocumentListener {
    fn attach(event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Option<Self> {
        let closure = Closure::new(handler);
        let document = web_sys::window()?.document()?;
        document
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { event, closure })
    }
}

impl Drop for DocumentListener {
    fn drop(&mut self) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let _ = document.remove_event_listener_with_callback(
                self.event,
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

#[component]
pub fn ShoppingPage(#[prop(into)] viewport_width: Signal<f64>) -> impl IntoView {
    let ctx = use_app_context();
    let shopping = use_shopping_lists(ctx.store.clone());

    let mobile = Memo::new(move |_| is_mobile(viewport_width.get()));
    let active_slug = RwSignal::new(
        shopping
            .lists
            .read_untracked()
            .first()
            .map(|list| list.slug.clone())
            .unwrap_or_default(),
    );
    let dialog = RwSignal::new(DialogState::Closed);
    let menu = RwSignal::new(None::<MenuState>);

    let swipe = Swipe::new();
    let press = LongPress::<ItemRef>::new(move |target, (x, y)| {
        menu.set(Some(MenuState { target, x, y }));
    });

    // Crossing the breakpoint mid-gesture settles the pager; the dialog
    // survives, its list exists in both layouts.
    Effect::new(move |_| {
        let _ = mobile.get();
        swipe.cancel_gesture();
        press.cancel();
    });

    // Any resize moves the pressed item, so the menu anchor is stale.
    Effect::new(move |_| {
        let _ = viewport_width.get();
        menu.set(None);
    });

    StoredValue::new_local(DocumentListener::attach("keydown", move |ev| {
        let Some(key) = ev.dyn_ref::<web_sys::KeyboardEvent>().map(|k| k.key()) else {
            return;
        };
        if key != "Escape" {
            return;
        }
        if menu.try_with(|m| m.is_some()) == Some(true) {
            menu.set(None);
        } else if dialog.try_with(|d| !matches!(d, DialogState::Closed)) == Some(true) {
            dialog.set(DialogState::Closed);
        }
    }));

    // An OS-level interruption can swallow the pointerup; snapping back on
    // visibility loss keeps the track from sticking mid-drag.
    StoredValue::new_local(DocumentListener::attach("visibilitychange", move |_| {
        swipe.cancel_gesture();
        press.cancel();
    }));

    let open_add = move |slug: String| dialog.set(DialogState::Add { slug });

    let submit_dialog = {
        let shopping = shopping.clone();
        move |value: String| {
            let shopping = shopping.clone();
            let state = dialog.get_untracked();
            spawn_local(async move {
                let ok = match state {
                    DialogState::Closed => true,
                    DialogState::Add { slug } => shopping.add_item(&slug, &value).await,
                    DialogState::Rename { slug, item } => {
                        shopping.rename_item(&slug, &item.id, &value).await
                    }
                };
                // A failed write keeps the dialog and the typed title up.
                if ok {
                    dialog.set(DialogState::Closed);
                }
            });
        }
    };

    let menu_rename = move |_| {
        if let Some(state) = menu.get_untracked() {
            dialog.set(DialogState::Rename {
                slug: state.target.slug,
                item: state.target.item,
            });
        }
        menu.set(None);
    };
    let menu_delete = {
        let shopping = shopping.clone();
        move |_| {
            if let Some(state) = menu.get_untracked() {
                shopping.remove(&state.target.slug, &state.target.item.id);
            }
            menu.set(None);
        }
    };

    let error_banner = {
        let shopping = shopping.clone();
        move || {
            shopping.error.get().map(|err| {
                let shopping = shopping.clone();
                view! {
                    <div class="error-banner" role="alert">
                        <span>{err.user_message}</span>
                        <button class="error-dismiss" on:click=move |_| shopping.dismiss_error()>
                            "\u{2715}"
                        </button>
                    </div>
                }
            })
        }
    };

    let layout = {
        let shopping = shopping.clone();
        move || {
            if mobile.get() {
                view! {
                    <ShoppingPager
                        lists_data=shopping.lists
                        lists=shopping.clone()
                        active_slug=active_slug
                        swipe=swipe
                        press=press
                        on_add=open_add
                    />
                }
                .into_any()
            } else {
                view! {
                    <ShoppingBoard
                        lists_data=shopping.lists
                        lists=shopping.clone()
                        press=press
                        on_add=open_add
                    />
                }
                .into_any()
            }
        }
    };

    view! {
        <div class="shopping-page">
            {error_banner}
            {layout}
            {move || {
                menu.get().map(|state| {
                    view! {
                        <ContextMenu
                            x=state.x
                            y=state.y
                            on_rename=menu_rename.clone()
                            on_delete=menu_delete.clone()
                            on_close=move |_| menu.set(None)
                        />
                    }
                })
            }}
            {move || {
                match dialog.get() {
                    DialogState::Closed => ().into_any(),
                    DialogState::Add { .. } => {
                        view! {
                            <TitleDialog
                                title=texts::shopping::ADD_DIALOG_TITLE
                                submit_label=texts::shopping::ADD_SUBMIT
                                on_submit=submit_dialog.clone()
                                on_cancel=move |_| dialog.set(DialogState::Closed)
                            />
                        }
                            .into_any()
                    }
                    DialogState::Rename { item, .. } => {
                        view! {
                            <TitleDialog
                                title=texts::shopping::RENAME_DIALOG_TITLE
                                submit_label=texts::shopping::RENAME_SUBMIT
                                initial=item.title.clone()
                                on_submit=submit_dialog.clone()
                                on_cancel=move |_| dialog.set(DialogState::Closed)
                            />
                        }
                            .into_any()
                    }
                }
            }}
        </div>
    }
}
