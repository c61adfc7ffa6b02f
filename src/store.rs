//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::telegram::BasicUser;

/// Top-level navigation tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Shopping,
    Calendar,
    Budget,
}

/// App-wide state with field-level reactivity.
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Currently selected top tab
    pub page: Page,
    /// Telegram user, when launched inside the Mini App container
    pub user: Option<BasicUser>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
