//! Snapshot merge state and the sync error taxonomy.
//!
//! Each list runs two independent live queries (checked / unchecked). The
//! merge keeps an arena of two slots per list so a delivery on one side
//! never discards the other side's last known data, then rebuilds the
//! presented sections from both.

use std::collections::HashMap;

use crate::item::ItemRecord;
use crate::ordering::{build_sections, Sections};
use crate::store::{Section, StoreError};

/// Latest known snapshot per query side of one list.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSlots {
    unchecked: Vec<ItemRecord>,
    checked: Vec<ItemRecord>,
}

impl SnapshotSlots {
    /// Stores a fresh delivery for one side and rebuilds the sections from
    /// the latest state of both.
    pub fn apply(&mut self, section: Section, records: Vec<ItemRecord>) -> Sections {
        match section {
            Section::Unchecked => self.unchecked = records,
            Section::Checked => self.checked = records,
        }
        build_sections(&self.unchecked, &self.checked)
    }
}

/// Which operation produced a recorded error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSource {
    SubscribeUnchecked,
    SubscribeChecked,
    AddItem,
    ToggleChecked,
    RenameItem,
    RemoveItem,
}

impl ErrorSource {
    pub fn subscription(section: Section) -> Self {
        match section {
            Section::Unchecked => ErrorSource::SubscribeUnchecked,
            Section::Checked => ErrorSource::SubscribeChecked,
        }
    }

    /// Russian user-facing message for a failure of this operation.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorSource::SubscribeUnchecked | ErrorSource::SubscribeChecked => {
                "Не удалось обновить список. Показаны последние данные."
            }
            ErrorSource::AddItem => "Не удалось добавить покупку. Попробуйте ещё раз.",
            ErrorSource::ToggleChecked => "Не удалось отметить покупку. Попробуйте ещё раз.",
            ErrorSource::RenameItem => "Не удалось переименовать покупку. Попробуйте ещё раз.",
            ErrorSource::RemoveItem => "Не удалось удалить покупку. Попробуйте ещё раз.",
        }
    }
}

/// A user-visible error scoped to the operation that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncError {
    pub source: ErrorSource,
    pub user_message: String,
    pub detail: String,
}

impl SyncError {
    pub fn new(source: ErrorSource, error: &StoreError) -> Self {
        Self {
            source,
            user_message: source.user_message().to_string(),
            detail: error.to_string(),
        }
    }
}

/// Per-source error log: one live entry per source. A success for a
/// source clears only that source's entry, never unrelated ones.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    entries: HashMap<ErrorSource, SyncError>,
    last_recorded: Option<ErrorSource>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, error: SyncError) {
        self.last_recorded = Some(error.source);
        self.entries.insert(error.source, error);
    }

    pub fn clear(&mut self, source: ErrorSource) {
        self.entries.remove(&source);
        if self.last_recorded == Some(source) {
            self.last_recorded = None;
        }
    }

    /// The most recently recorded error that is still live, falling back to
    /// any remaining entry.
    pub fn current(&self) -> Option<&SyncError> {
        self.last_recorded
            .and_then(|source| self.entries.get(&source))
            .or_else(|| self.entries.values().next())
    }

    pub fn get(&self, source: ErrorSource) -> Option<&SyncError> {
        self.entries.get(&source)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::CheckItem;
    use crate::memory::MemoryStore;
    use crate::store::{ShoppingStore, SnapshotHandler};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn record(id: &str, title: &str, checked: bool) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            title: title.to_string(),
            title_lower: Some(crate::ordering::fold_title(title)),
            checked,
            qty: None,
            unit: None,
        }
    }

    fn titles(items: &[CheckItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn one_side_delivery_keeps_the_other_side() {
        let mut slots = SnapshotSlots::default();
        slots.apply(Section::Unchecked, vec![record("u1", "Авокадо", false)]);
        let sections = slots.apply(Section::Checked, vec![record("c1", "Молоко", true)]);
        assert_eq!(titles(&sections.all_items), vec!["Авокадо", "Молоко"]);

        // Fresh unchecked delivery must not lose the checked slot.
        let sections = slots.apply(Section::Unchecked, vec![record("u2", "Банан", false)]);
        assert_eq!(titles(&sections.all_items), vec!["Банан", "Молоко"]);
    }

    #[test]
    fn success_clears_only_its_own_source() {
        let mut log = ErrorLog::new();
        let unavailable = StoreError::Unavailable("offline".into());
        log.record(SyncError::new(ErrorSource::AddItem, &unavailable));
        log.record(SyncError::new(ErrorSource::RemoveItem, &unavailable));

        log.clear(ErrorSource::AddItem);
        assert!(log.get(ErrorSource::AddItem).is_none());
        assert!(log.get(ErrorSource::RemoveItem).is_some());
        assert_eq!(log.current().unwrap().source, ErrorSource::RemoveItem);

        log.clear(ErrorSource::RemoveItem);
        assert!(log.is_empty());
        assert!(log.current().is_none());
    }

    #[test]
    fn current_prefers_the_latest_recorded_error() {
        let mut log = ErrorLog::new();
        let err = StoreError::Internal("boom".into());
        log.record(SyncError::new(ErrorSource::ToggleChecked, &err));
        log.record(SyncError::new(ErrorSource::RenameItem, &err));
        assert_eq!(log.current().unwrap().source, ErrorSource::RenameItem);
    }

    #[test]
    fn subscription_errors_carry_a_non_fatal_message() {
        let err = SyncError::new(
            ErrorSource::subscription(Section::Checked),
            &StoreError::PermissionDenied("rules".into()),
        );
        assert_eq!(err.source, ErrorSource::SubscribeChecked);
        assert!(err.user_message.contains("последние данные"));
        assert!(err.detail.contains("rules"));
    }

    /// End-to-end merge over the in-memory store: both sides subscribed,
    /// every delivery folded through the slots into one ordered sequence.
    #[tokio::test]
    async fn store_deliveries_merge_into_one_ordered_list() {
        let store = MemoryStore::new();
        let slots = Rc::new(RefCell::new(SnapshotSlots::default()));
        let merged = Rc::new(RefCell::new(Vec::<CheckItem>::new()));

        let make_handler = |section: Section| -> SnapshotHandler {
            let slots = Rc::clone(&slots);
            let merged = Rc::clone(&merged);
            Rc::new(move |records| {
                let sections = slots.borrow_mut().apply(section, records);
                *merged.borrow_mut() = sections.all_items;
            })
        };

        let _u = store.subscribe(
            "food",
            Section::Unchecked,
            make_handler(Section::Unchecked),
            Rc::new(|_| {}),
        );
        let _c = store.subscribe(
            "food",
            Section::Checked,
            make_handler(Section::Checked),
            Rc::new(|_| {}),
        );

        store.add_item("food", "Банан").await.unwrap();
        store.add_item("food", "Авокадо").await.unwrap();
        assert_eq!(titles(&merged.borrow()), vec!["Авокадо", "Банан"]);

        let banana_id = merged
            .borrow()
            .iter()
            .find(|i| i.title == "Банан")
            .unwrap()
            .id
            .clone();
        store.toggle_checked("food", &banana_id, true).await.unwrap();

        let items = merged.borrow();
        assert_eq!(titles(&items), vec!["Авокадо", "Банан"]);
        assert!(!items[0].done);
        assert!(items[1].done);
        assert_eq!(items.len(), 2);
    }
}
