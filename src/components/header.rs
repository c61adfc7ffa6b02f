//! App Header Component

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};
use crate::texts;

/// Top bar with the app title and the Telegram user's name.
#[component]
pub fn Header() -> impl IntoView {
    let store = use_app_store();

    let user_name = move || {
        store
            .user()
            .get()
            .map(|user| user.name)
            .unwrap_or_else(|| texts::GUEST.to_string())
    };

    view! {
        <header class="app-header">
            <h1 class="app-title">{texts::APP_TITLE}</h1>
            <span class="app-user">{user_name}</span>
        </header>
    }
}
