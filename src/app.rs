//! Family Assistant Frontend App
//!
//! Shell component: tab navigation, Telegram bootstrap, and the store
//! client injected once for the whole tree.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use send_wrapper::SendWrapper;
use shopping_core::store::ShoppingStore;
use web_sys::console;

use shopping_core::memory::MemoryStore;

use crate::components::{BudgetPage, CalendarPage, Header, ShoppingPage};
use crate::context::AppContext;
use crate::firestore::{self, FirestoreStore};
use crate::store::{AppState, AppStateStoreFields, Page};
use crate::texts;
use crate::viewport::use_viewport_width;

const TABS: &[(Page, &str)] = &[
    (Page::Shopping, texts::tabs::SHOPPING),
    (Page::Calendar, texts::tabs::CALENDAR),
    (Page::Budget, texts::tabs::BUDGET),
];

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let client: Rc<dyn ShoppingStore> = if firestore::bridge_available() {
        Rc::new(FirestoreStore::new())
    } else {
        console::warn_1(&"no database bridge found, using the seeded in-memory store".into());
        Rc::new(MemoryStore::seeded())
    };
    provide_context(SendWrapper::new(AppContext::new(client.clone())));

    // Inside the Mini App container this expands the WebView and yields the
    // user; in a plain browser it is a no-op.
    if let Some(user) = crate::telegram::init_web_app() {
        store.user().set(Some(user));
    }

    spawn_local(async move {
        if let Err(err) = client.ensure_provisioned().await {
            console::error_1(&format!("provisioning failed: {err}").into());
        }
    });

    let viewport_width = use_viewport_width();

    view! {
        <div class="app-layout">
            <Header />
            <nav class="tab-bar">
                {TABS
                    .iter()
                    .map(|&(page, label)| {
                        view! {
                            <button
                                class=move || {
                                    if store.page().get() == page { "tab active" } else { "tab" }
                                }
                                on:click=move |_| store.page().set(page)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <main class="page-content">
                {move || match store.page().get() {
                    Page::Shopping => {
                        view! { <ShoppingPage viewport_width=viewport_width /> }.into_any()
                    }
                    Page::Calendar => view! { <CalendarPage /> }.into_any(),
                    Page::Budget => view! { <BudgetPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
