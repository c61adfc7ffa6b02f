//! Title Dialog Component
//!
//! Modal used for both adding and renaming items. The parent decides when
//! to close it, so a failed write keeps the dialog (and the typed title) up.

use leptos::html;
use leptos::prelude::*;

use crate::texts;

#[component]
pub fn TitleDialog(
    title: &'static str,
    submit_label: &'static str,
    #[prop(optional)] initial: String,
    #[prop(into)] on_submit: UnsyncCallback<String>,
    #[prop(into)] on_cancel: UnsyncCallback<()>,
) -> impl IntoView {
    let (value, set_value) = signal(initial);
    let input_ref = NodeRef::<html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(value.get());
    };

    let cancel = move |_| on_cancel.run(());

    view! {
        // Clicking outside the dialog card cancels.
        <div class="dialog-backdrop" on:click=cancel>
            <div class="dialog" on:click=|ev| ev.stop_propagation()>
                <h3 class="dialog-title">{title}</h3>
                <form on:submit=submit>
                    <input
                        type="text"
                        class="dialog-input"
                        placeholder=texts::shopping::TITLE_PLACEHOLDER
                        prop:value=move || value.get()
                        on:input=move |ev| set_value.set(event_target_value(&ev))
                        node_ref=input_ref
                    />
                    <div class="dialog-actions">
                        <button type="button" class="dialog-cancel" on:click=cancel>
                            {texts::shopping::CANCEL}
                        </button>
                        <button type="submit" class="dialog-submit">{submit_label}</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
