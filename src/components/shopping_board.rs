//! Shopping Board Component
//!
//! Desktop layout: every list side by side, no paging gesture.

use leptos::prelude::*;
use leptos_swipe::LongPress;

use shopping_core::item::ShoppingListData;

use crate::components::checklist::Checklist;
use crate::components::checklist_item::ItemRef;
use crate::hooks::ShoppingLists;

#[component]
pub fn ShoppingBoard(
    #[prop(into)] lists_data: Signal<Vec<ShoppingListData>>,
    lists: ShoppingLists,
    press: LongPress<ItemRef>,
    #[prop(into)] on_add: UnsyncCallback<String>,
) -> impl IntoView {
    // The list set is fixed at provisioning time, so panels are built once
    // and each tracks its own slot.
    let count = lists_data.read_untracked().len();

    view! {
        <div class="shopping-board">
            {(0..count)
                .map(|index| {
                    let one = Signal::derive(move || {
                        lists_data.with(|all| all[index.min(all.len() - 1)].clone())
                    });
                    view! {
                        <Checklist list=one lists=lists.clone() press=press on_add=on_add />
                    }
                })
                .collect_view()}
        </div>
    }
}
