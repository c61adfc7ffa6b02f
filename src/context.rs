//! Application Context
//!
//! The store client is constructed once at startup and injected through
//! Leptos context, so components and hooks never reach for a module-level
//! singleton and tests can hand them an in-memory store instead.

use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use shopping_core::ShoppingStore;

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppContext {
    /// Shopping list persistence client
    pub store: Rc<dyn ShoppingStore>,
}

impl AppContext {
    pub fn new(store: Rc<dyn ShoppingStore>) -> Self {
        Self { store }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<SendWrapper<AppContext>>().take()
}
