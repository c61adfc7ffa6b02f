//! Live shopping-list state for the UI.
//!
//! `use_shopping_lists` subscribes both sides of every configured list,
//! folds snapshot deliveries through the per-list merge slots into one
//! signal of presented lists, and funnels every failure through the shared
//! error log so the page shows at most one banner at a time.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use send_wrapper::SendWrapper;
use web_sys::console;

use shopping_core::item::{initial_lists, CheckItem, ShoppingListData, SHOPPING_LISTS};
use shopping_core::store::{
    Section, ShoppingStore, SnapshotHandler, StoreResult, SubscribeErrorHandler, Subscription,
};
use shopping_core::sync::{ErrorLog, ErrorSource, SnapshotSlots, SyncError};

/// Handle returned by [`use_shopping_lists`]. Cloning is cheap; signals are
/// shared, the store and error log are reference-counted.
#[derive(Clone)]
pub struct ShoppingLists {
    pub lists: ReadSignal<Vec<ShoppingListData>>,
    pub error: ReadSignal<Option<SyncError>>,
    store: SendWrapper<Rc<dyn ShoppingStore>>,
    error_log: SendWrapper<Rc<RefCell<ErrorLog>>>,
    set_error: WriteSignal<Option<SyncError>>,
}

impl ShoppingLists {
    /// Adds an unchecked item. `true` means the write landed (or the title
    /// was blank and the call no-opped), so a dialog may close.
    pub async fn add_item(&self, slug: &str, title: &str) -> bool {
        self.run(ErrorSource::AddItem, self.store.add_item(slug, title))
            .await
    }

    /// Renames an item. Same success contract as [`Self::add_item`].
    pub async fn rename_item(&self, slug: &str, item_id: &str, title: &str) -> bool {
        self.run(
            ErrorSource::RenameItem,
            self.store.rename_item(slug, item_id, title),
        )
        .await
    }

    /// Flips an item's checked state, fire and forget. The live query
    /// delivers the authoritative result either way.
    pub fn toggle(&self, slug: &str, item: &CheckItem) {
        let this = self.clone();
        let slug = slug.to_string();
        let item_id = item.id.clone();
        let next_done = !item.done;
        spawn_local(async move {
            this.run(
                ErrorSource::ToggleChecked,
                this.store.toggle_checked(&slug, &item_id, next_done),
            )
            .await;
        });
    }

    /// Deletes an item, fire and forget.
    pub fn remove(&self, slug: &str, item_id: &str) {
        let this = self.clone();
        let slug = slug.to_string();
        let item_id = item_id.to_string();
        spawn_local(async move {
            this.run(
                ErrorSource::RemoveItem,
                this.store.remove_item(&slug, &item_id),
            )
            .await;
        });
    }

    /// Dismisses the visible banner by clearing its entry; any remaining
    /// recorded error surfaces next.
    pub fn dismiss_error(&self) {
        let mut log = self.error_log.borrow_mut();
        if let Some(source) = log.current().map(|err| err.source) {
            log.clear(source);
        }
        self.set_error.set(log.current().cloned());
    }

    async fn run(
        &self,
        source: ErrorSource,
        fut: impl Future<Output = StoreResult<()>>,
    ) -> bool {
        let ok = match fut.await {
            Ok(()) => {
                self.error_log.borrow_mut().clear(source);
                true
            }
            Err(err) => {
                console::error_1(&format!("shopping mutation failed: {err}").into());
                self.error_log
                    .borrow_mut()
                    .record(SyncError::new(source, &err));
                false
            }
        };
        self.set_error
            .set(self.error_log.borrow().current().cloned());
        ok
    }
}

/// Subscribes every list on both sides and keeps the subscriptions alive
/// until the calling component's owner is disposed.
pub fn use_shopping_lists(store: Rc<dyn ShoppingStore>) -> ShoppingLists {
    let (lists, set_lists) = signal(initial_lists());
    let (error, set_error) = signal(None::<SyncError>);
    let error_log = Rc::new(RefCell::new(ErrorLog::new()));

    let mut subscriptions: Vec<Subscription> = Vec::new();
    for (index, meta) in SHOPPING_LISTS.iter().enumerate() {
        let slots = Rc::new(RefCell::new(SnapshotSlots::default()));
        for section in [Section::Unchecked, Section::Checked] {
            let on_snapshot: SnapshotHandler = {
                let slots = Rc::clone(&slots);
                let error_log = Rc::clone(&error_log);
                Rc::new(move |records| {
                    let sections = slots.borrow_mut().apply(section, records);
                    set_lists.update(|lists| {
                        if let Some(list) = lists.get_mut(index) {
                            list.items = sections.all_items;
                        }
                    });
                    // A successful delivery supersedes an earlier failure
                    // of the same query.
                    let mut log = error_log.borrow_mut();
                    log.clear(ErrorSource::subscription(section));
                    set_error.set(log.current().cloned());
                })
            };
            let on_error: SubscribeErrorHandler = {
                let error_log = Rc::clone(&error_log);
                Rc::new(move |err| {
                    console::error_1(
                        &format!("live query failed ({}): {err}", if section.is_checked() { "checked" } else { "unchecked" }).into(),
                    );
                    let mut log = error_log.borrow_mut();
                    log.record(SyncError::new(ErrorSource::subscription(section), &err));
                    set_error.set(log.current().cloned());
                })
            };
            subscriptions.push(store.subscribe(meta.slug, section, on_snapshot, on_error));
        }
    }

    // Dropped with the owner, which unsubscribes every live query.
    StoredValue::new_local(subscriptions);

    ShoppingLists {
        lists,
        error,
        store: SendWrapper::new(store),
        error_log: SendWrapper::new(error_log),
        set_error,
    }
}
