//! Pager Dots Component

use leptos::prelude::*;

use crate::texts;

/// One dot per list; the active one is highlighted and tapping a dot jumps
/// straight to its list.
#[component]
pub fn PagerDots(
    count: usize,
    #[prop(into)] active: Signal<usize>,
    #[prop(into)] on_select: UnsyncCallback<usize>,
) -> impl IntoView {
    view! {
        <div class="pager-dots" role="tablist">
            {(0..count)
                .map(|index| {
                    view! {
                        <button
                            role="tab"
                            class=move || {
                                if active.get() == index { "pager-dot active" } else { "pager-dot" }
                            }
                            aria-label=texts::shopping::goto_list(index + 1)
                            aria-selected=move || (active.get() == index).to_string()
                            on:click=move |_| on_select.run(index)
                        ></button>
                    }
                })
                .collect_view()}
        </div>
    }
}
