//! Checklist Component
//!
//! One list panel: unchecked items first, checked below, and a trailing
//! add entry. Ordering is already resolved upstream; this only renders.

use leptos::prelude::*;
use leptos_swipe::{LongPress, Swipe};

use shopping_core::item::ShoppingListData;

use crate::components::checklist_item::{ChecklistItem, ItemRef};
use crate::hooks::ShoppingLists;
use crate::texts;

#[component]
pub fn Checklist(
    #[prop(into)] list: Signal<ShoppingListData>,
    lists: ShoppingLists,
    press: LongPress<ItemRef>,
    #[prop(optional_no_strip)] swipe: Option<Swipe>,
    /// Opens the add dialog for this list's slug.
    #[prop(into)]
    on_add: UnsyncCallback<String>,
) -> impl IntoView {
    let add = move |_| on_add.run(list.read_untracked().slug.clone());

    view! {
        <section class="checklist">
            <h2 class="checklist-title">{move || list.get().title}</h2>
            {move || {
                let data = list.get();
                if data.items.is_empty() {
                    view! { <p class="checklist-empty">{texts::shopping::EMPTY_LIST}</p> }
                        .into_any()
                } else {
                    let slug = data.slug;
                    view! {
                        <ul class="checklist-items">
                            {data
                                .items
                                .into_iter()
                                .map(|item| {
                                    view! {
                                        <ChecklistItem
                                            slug=slug.clone()
                                            item=item
                                            lists=lists.clone()
                                            press=press
                                            swipe=swipe
                                        />
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
            <button class="checklist-add" on:click=add>{texts::shopping::ADD_ENTRY}</button>
        </section>
    }
}
