//! Shopping Pager Component
//!
//! Mobile layout: one list per screen on a horizontally sliding track.
//! While a drag is active the track follows the finger with the CSS
//! transition off; on release it animates to the committed list. Paging
//! wraps at both bounds.
//!
//! The source of truth is the active list's slug; the track index is
//! derived by position lookup, so a reshaped list collection can never
//! leave the pager pointing at the wrong list.

use leptos::prelude::*;
use leptos_swipe::{step_index, LongPress, Swipe, SwipeDirection};

use shopping_core::item::ShoppingListData;
use shopping_core::pager::SwipeEnd;

use crate::components::checklist::Checklist;
use crate::components::checklist_item::ItemRef;
use crate::components::pager_dots::PagerDots;
use crate::hooks::ShoppingLists;
use crate::texts;

#[component]
pub fn ShoppingPager(
    #[prop(into)] lists_data: Signal<Vec<ShoppingListData>>,
    lists: ShoppingLists,
    active_slug: RwSignal<String>,
    swipe: Swipe,
    press: LongPress<ItemRef>,
    #[prop(into)] on_add: UnsyncCallback<String>,
) -> impl IntoView {
    let count = lists_data.read_untracked().len();

    let active_index = Memo::new(move |_| {
        lists_data.with(|all| {
            active_slug.with(|slug| all.iter().position(|list| &list.slug == slug).unwrap_or(0))
        })
    });

    let select = move |index: usize| {
        if let Some(slug) = lists_data.with_untracked(|all| all.get(index).map(|l| l.slug.clone()))
        {
            active_slug.set(slug);
        }
    };
    let step = move |direction: SwipeDirection| {
        select(step_index(active_index.get_untracked(), count, direction));
    };

    let track_style = move || {
        let base = -100.0 * active_index.get() as f64;
        let offset = swipe.offset_percent();
        let transition = if swipe.swiping.get() {
            "none"
        } else {
            "transform 0.25s ease"
        };
        format!("transform: translateX(calc({base}% + {offset}%)); transition: {transition};")
    };

    // Pointer capture on the viewport retargets every move/up/cancel for
    // the gesture away from the item that armed the dwell, so the press
    // tracker is driven from here as well.
    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        press.pointer_move(&ev);
        swipe.pointer_move(&ev, || press.cancel());
    };
    let on_pointer_up = move |ev: web_sys::PointerEvent| {
        press.pointer_up(&ev);
        if let Some(SwipeEnd::Commit(direction)) = swipe.pointer_up(&ev) {
            step(direction);
        }
    };
    let on_pointer_cancel = move |_| {
        swipe.cancel_gesture();
        press.cancel();
    };

    view! {
        <div class="shopping-pager">
            <div class="pager-tabs" role="tablist">
                {(0..count)
                    .map(|index| {
                        view! {
                            <button
                                role="tab"
                                class=move || {
                                    if active_index.get() == index {
                                        "pager-tab active"
                                    } else {
                                        "pager-tab"
                                    }
                                }
                                aria-selected=move || (active_index.get() == index).to_string()
                                on:click=move |_| select(index)
                            >
                                {move || lists_data.with(|all| all[index.min(all.len() - 1)].title.clone())}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <div
                class="pager-viewport"
                on:pointerdown=move |ev| swipe.pointer_down(&ev)
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
                on:pointercancel=on_pointer_cancel
            >
                <div class="pager-track" style=track_style>
                    {(0..count)
                        .map(|index| {
                            let one = Signal::derive(move || {
                                lists_data.with(|all| all[index.min(all.len() - 1)].clone())
                            });
                            view! {
                                <div class="pager-panel">
                                    <Checklist
                                        list=one
                                        lists=lists.clone()
                                        press=press
                                        swipe=Some(swipe)
                                        on_add=on_add
                                    />
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <div class="pager-nav">
                <button
                    class="pager-arrow"
                    aria-label=texts::shopping::PREV_LIST
                    on:click=move |_| step(SwipeDirection::Prev)
                >
                    "\u{2039}"
                </button>
                <PagerDots
                    count=count
                    active=Signal::derive(move || active_index.get())
                    on_select=select
                />
                <button
                    class="pager-arrow"
                    aria-label=texts::shopping::NEXT_LIST
                    on:click=move |_| step(SwipeDirection::Next)
                >
                    "\u{203A}"
                </button>
            </div>
        </div>
    }
}
