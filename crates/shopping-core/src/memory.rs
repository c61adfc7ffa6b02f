//! In-memory shopping store.
//!
//! Backs the unit tests and local development without a Firestore project.
//! Live queries are plain listener registrations: each matching mutation
//! re-delivers the affected side's snapshot synchronously.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;

use crate::item::{seed_list_items, ItemRecord, SHOPPING_LISTS};
use crate::store::{
    normalize_title, Section, ShoppingStore, SnapshotHandler, StoreError, StoreResult,
    SubscribeErrorHandler, Subscription, title_payload,
};

#[derive(Debug, Clone, Default)]
struct ItemDoc {
    title: String,
    title_lower: Option<String>,
    checked: bool,
    qty: Option<f64>,
    unit: Option<String>,
}

struct Listener {
    id: u64,
    slug: String,
    section: Section,
    on_snapshot: SnapshotHandler,
    #[allow(dead_code)]
    on_error: SubscribeErrorHandler,
}

#[derive(Default)]
struct State {
    family_provisioned: bool,
    list_docs: BTreeMap<String, String>,
    items: BTreeMap<String, BTreeMap<String, ItemDoc>>,
    listeners: Vec<Listener>,
    next_listener_id: u64,
    next_item_id: u64,
    fail_next: Option<StoreError>,
}

impl State {
    fn snapshot(&self, slug: &str, section: Section) -> Vec<ItemRecord> {
        self.items
            .get(slug)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| doc.checked == section.is_checked())
                    .map(|(id, doc)| ItemRecord {
                        id: id.clone(),
                        title: doc.title.clone(),
                        title_lower: doc.title_lower.clone(),
                        checked: doc.checked,
                        qty: doc.qty,
                        unit: doc.unit.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Reactive in-memory store with the same contract as the Firestore bridge.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the development seed data, for running the app
    /// without a Firestore project behind it.
    pub fn seeded() -> Self {
        let store = Self::default();
        {
            let mut state = store.state.borrow_mut();
            state.family_provisioned = true;
            for meta in SHOPPING_LISTS {
                state
                    .list_docs
                    .insert(meta.slug.to_string(), meta.title.to_string());
                let docs = state.items.entry(meta.slug.to_string()).or_default();
                for item in seed_list_items(meta.slug) {
                    docs.insert(
                        item.id.clone(),
                        ItemDoc {
                            title: item.title,
                            title_lower: item.title_lower,
                            checked: item.done,
                            qty: item.qty,
                            unit: item.unit,
                        },
                    );
                }
            }
        }
        store
    }

    /// Makes the next mutating call reject with `error`.
    pub fn fail_next_mutation(&self, error: StoreError) {
        self.state.borrow_mut().fail_next = Some(error);
    }

    /// Reports an error to every listener on the given list side, as a
    /// backing-store subscription failure would.
    pub fn emit_subscription_error(&self, slug: &str, section: Section, error: StoreError) {
        let handlers: Vec<SubscribeErrorHandler> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.slug == slug && l.section == section)
            .map(|l| Rc::clone(&l.on_error))
            .collect();
        for handler in handlers {
            handler(error.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    fn take_failure(&self) -> StoreResult<()> {
        match self.state.borrow_mut().fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Snapshots are delivered outside the state borrow so a handler can
    /// issue further store calls.
    fn notify(&self, slug: &str, sections: &[Section]) {
        let pending: Vec<(SnapshotHandler, Vec<ItemRecord>)> = {
            let state = self.state.borrow();
            state
                .listeners
                .iter()
                .filter(|l| l.slug == slug && sections.contains(&l.section))
                .map(|l| (Rc::clone(&l.on_snapshot), state.snapshot(slug, l.section)))
                .collect()
        };
        for (handler, records) in pending {
            handler(records);
        }
    }
}

#[async_trait(?Send)]
impl ShoppingStore for MemoryStore {
    fn subscribe(
        &self,
        slug: &str,
        section: Section,
        on_snapshot: SnapshotHandler,
        on_error: SubscribeErrorHandler,
    ) -> Subscription {
        let (id, initial) = {
            let mut state = self.state.borrow_mut();
            state.next_listener_id += 1;
            let id = state.next_listener_id;
            state.listeners.push(Listener {
                id,
                slug: slug.to_string(),
                section,
                on_snapshot: Rc::clone(&on_snapshot),
                on_error,
            });
            (id, state.snapshot(slug, section))
        };
        on_snapshot(initial);

        let state = Rc::clone(&self.state);
        Subscription::new(move || {
            state.borrow_mut().listeners.retain(|l| l.id != id);
        })
    }

    async fn add_item(&self, slug: &str, title: &str) -> StoreResult<()> {
        let Some(normalized) = normalize_title(title) else {
            return Ok(());
        };
        self.take_failure()?;

        let (title, title_lower) = title_payload(&normalized);
        {
            let mut state = self.state.borrow_mut();
            state.next_item_id += 1;
            let id = format!("item-{}", state.next_item_id);
            state.items.entry(slug.to_string()).or_default().insert(
                id,
                ItemDoc {
                    title,
                    title_lower: Some(title_lower),
                    checked: false,
                    qty: None,
                    unit: None,
                },
            );
        }
        self.notify(slug, &[Section::Unchecked]);
        Ok(())
    }

    async fn toggle_checked(&self, slug: &str, item_id: &str, next_done: bool) -> StoreResult<()> {
        self.take_failure()?;
        let changed = {
            let mut state = self.state.borrow_mut();
            match state.items.get_mut(slug).and_then(|docs| docs.get_mut(item_id)) {
                Some(doc) => {
                    doc.checked = next_done;
                    true
                }
                None => false,
            }
        };
        if changed {
            // A toggle moves the item between sides, so both must refresh.
            self.notify(slug, &[Section::Unchecked, Section::Checked]);
        }
        Ok(())
    }

    async fn rename_item(&self, slug: &str, item_id: &str, title: &str) -> StoreResult<()> {
        let Some(normalized) = normalize_title(title) else {
            return Ok(());
        };
        self.take_failure()?;

        let (title, title_lower) = title_payload(&normalized);
        let affected = {
            let mut state = self.state.borrow_mut();
            match state.items.get_mut(slug).and_then(|docs| docs.get_mut(item_id)) {
                Some(doc) => {
                    doc.title = title;
                    doc.title_lower = Some(title_lower);
                    Some(if doc.checked {
                        Section::Checked
                    } else {
                        Section::Unchecked
                    })
                }
                None => None,
            }
        };
        if let Some(section) = affected {
            self.notify(slug, &[section]);
        }
        Ok(())
    }

    async fn remove_item(&self, slug: &str, item_id: &str) -> StoreResult<()> {
        self.take_failure()?;
        let removed = {
            let mut state = self.state.borrow_mut();
            state
                .items
                .get_mut(slug)
                .and_then(|docs| docs.remove(item_id))
                .map(|doc| {
                    if doc.checked {
                        Section::Checked
                    } else {
                        Section::Unchecked
                    }
                })
        };
        if let Some(section) = removed {
            self.notify(slug, &[section]);
        }
        Ok(())
    }

    async fn ensure_provisioned(&self) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        state.family_provisioned = true;
        for meta in SHOPPING_LISTS {
            state
                .list_docs
                .entry(meta.slug.to_string())
                .or_insert_with(|| meta.title.to_string());
            state.items.entry(meta.slug.to_string()).or_default();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn collect_snapshots() -> (SnapshotHandler, Rc<RefCell<Vec<Vec<ItemRecord>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let handler: SnapshotHandler = Rc::new(move |records| sink.borrow_mut().push(records));
        (handler, seen)
    }

    fn ignore_errors() -> SubscribeErrorHandler {
        Rc::new(|_| {})
    }

    #[tokio::test]
    async fn subscribe_delivers_current_snapshot_immediately() {
        let store = MemoryStore::new();
        store.add_item("food", "Молоко").await.unwrap();

        let (handler, seen) = collect_snapshots();
        let _sub = store.subscribe("food", Section::Unchecked, handler, ignore_errors());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[0][0].title, "Молоко");
    }

    #[tokio::test]
    async fn add_trims_and_folds_title() {
        let store = MemoryStore::new();
        store.add_item("food", "  Ёлка  ").await.unwrap();

        let (handler, seen) = collect_snapshots();
        let _sub = store.subscribe("food", Section::Unchecked, handler, ignore_errors());

        let seen = seen.borrow();
        let record = &seen[0][0];
        assert_eq!(record.title, "Ёлка");
        assert_eq!(record.title_lower.as_deref(), Some("елка"));
        assert!(!record.checked);
    }

    #[tokio::test]
    async fn blank_add_is_a_silent_no_op() {
        let store = MemoryStore::new();
        store.add_item("food", "").await.unwrap();
        store.add_item("food", "   ").await.unwrap();

        let (handler, seen) = collect_snapshots();
        let _sub = store.subscribe("food", Section::Unchecked, handler, ignore_errors());
        assert!(seen.borrow()[0].is_empty());
    }

    #[tokio::test]
    async fn blank_add_skips_injected_failure_because_nothing_is_written() {
        let store = MemoryStore::new();
        store.fail_next_mutation(StoreError::Unavailable("offline".into()));
        assert!(store.add_item("food", "   ").await.is_ok());
        // The injected failure still applies to the next real write.
        assert!(store.add_item("food", "Молоко").await.is_err());
    }

    #[tokio::test]
    async fn toggle_moves_item_between_query_sides() {
        let store = MemoryStore::new();
        store.add_item("food", "Банан").await.unwrap();

        let (unchecked_handler, unchecked_seen) = collect_snapshots();
        let (checked_handler, checked_seen) = collect_snapshots();
        let _u = store.subscribe("food", Section::Unchecked, unchecked_handler, ignore_errors());
        let _c = store.subscribe("food", Section::Checked, checked_handler, ignore_errors());

        let id = unchecked_seen.borrow()[0][0].id.clone();
        store.toggle_checked("food", &id, true).await.unwrap();

        assert!(unchecked_seen.borrow().last().unwrap().is_empty());
        let checked = checked_seen.borrow();
        assert_eq!(checked.last().unwrap().len(), 1);
        assert_eq!(checked.last().unwrap()[0].title, "Банан");
    }

    #[tokio::test]
    async fn rename_updates_title_and_fold_but_not_done() {
        let store = MemoryStore::new();
        store.add_item("food", "Малоко").await.unwrap();

        let (handler, seen) = collect_snapshots();
        let _sub = store.subscribe("food", Section::Unchecked, handler, ignore_errors());
        let id = seen.borrow()[0][0].id.clone();

        store.rename_item("food", &id, "  Молоко ").await.unwrap();

        let seen = seen.borrow();
        let record = &seen.last().unwrap()[0];
        assert_eq!(record.title, "Молоко");
        assert_eq!(record.title_lower.as_deref(), Some("молоко"));
        assert!(!record.checked);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = MemoryStore::new();
        store.add_item("food", "Сыр").await.unwrap();

        let (handler, seen) = collect_snapshots();
        let _sub = store.subscribe("food", Section::Unchecked, handler, ignore_errors());
        let id = seen.borrow()[0][0].id.clone();

        store.remove_item("food", &id).await.unwrap();
        store.remove_item("food", &id).await.unwrap();
        store.remove_item("food", "missing").await.unwrap();

        assert!(seen.borrow().last().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ensure_provisioned_never_overwrites() {
        let store = MemoryStore::new();
        store.ensure_provisioned().await.unwrap();
        store.add_item("food", "Молоко").await.unwrap();
        store.ensure_provisioned().await.unwrap();

        let (handler, seen) = collect_snapshots();
        let _sub = store.subscribe("food", Section::Unchecked, handler, ignore_errors());
        assert_eq!(seen.borrow()[0].len(), 1);
    }

    #[tokio::test]
    async fn dropping_subscription_unregisters_listener() {
        let store = MemoryStore::new();
        let (handler, seen) = collect_snapshots();
        let sub = store.subscribe("food", Section::Unchecked, handler, ignore_errors());
        assert_eq!(store.listener_count(), 1);

        drop(sub);
        assert_eq!(store.listener_count(), 0);

        store.add_item("food", "Молоко").await.unwrap();
        // Only the initial empty delivery was observed.
        assert_eq!(seen.borrow().len(), 1);
    }

    #[tokio::test]
    async fn seeded_store_has_every_list_filled_and_unchecked() {
        let store = MemoryStore::seeded();
        for meta in SHOPPING_LISTS {
            let (handler, seen) = collect_snapshots();
            let _sub = store.subscribe(meta.slug, Section::Unchecked, handler, ignore_errors());
            let seen = seen.borrow();
            assert!(!seen[0].is_empty(), "{} seed is empty", meta.slug);
            assert!(seen[0].iter().all(|record| !record.checked));
        }
    }

    #[tokio::test]
    async fn subscription_errors_reach_the_side_channel() {
        let store = MemoryStore::new();
        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&errors);
        let _sub = store.subscribe(
            "food",
            Section::Checked,
            Rc::new(|_| {}),
            Rc::new(move |err| sink.borrow_mut().push(err)),
        );

        store.emit_subscription_error(
            "food",
            Section::Checked,
            StoreError::PermissionDenied("rules".into()),
        );
        assert_eq!(errors.borrow().len(), 1);
    }
}
