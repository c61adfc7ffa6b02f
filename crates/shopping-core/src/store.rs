//! Remote list store seam.
//!
//! The trait abstracts a reactive document store (Firestore in production,
//! [`crate::memory::MemoryStore`] in tests and dev): two live queries per
//! list, plus the item mutations. Everything runs on the single-threaded UI
//! event loop, so futures and callbacks are deliberately `?Send`.

use std::rc::Rc;

use async_trait::async_trait;

use crate::item::ItemRecord;
use crate::ordering::fold_title;

/// Which side of a list a live query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Unchecked,
    Checked,
}

impl Section {
    pub fn is_checked(self) -> bool {
        matches!(self, Section::Checked)
    }
}

/// Common result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level errors. Mutating calls never throw synchronously; failures
/// always arrive as a rejected future carrying one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    PermissionDenied(String),
    Unavailable(String),
    Internal(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            StoreError::Unavailable(msg) => write!(f, "Backend unavailable: {}", msg),
            StoreError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Delivered the current snapshot on subscribe and again on every change.
pub type SnapshotHandler = Rc<dyn Fn(Vec<ItemRecord>)>;

/// Subscription failures are reported here instead of being thrown.
pub type SubscribeErrorHandler = Rc<dyn Fn(StoreError)>;

/// Handle for a live query registration. Dropping it unsubscribes, so a
/// component that keeps its subscriptions in scope cannot leak listeners.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Trims a user-entered title; `None` means the mutation must silently
/// no-op (no write, no error).
pub fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Folded payload written alongside a normalized title.
pub fn title_payload(title: &str) -> (String, String) {
    (title.to_string(), fold_title(title))
}

/// Per-family shopping list persistence.
#[async_trait(?Send)]
pub trait ShoppingStore {
    /// Registers a live query for one side of a list. The current snapshot
    /// is delivered immediately, then again on every matching change.
    fn subscribe(
        &self,
        slug: &str,
        section: Section,
        on_snapshot: SnapshotHandler,
        on_error: SubscribeErrorHandler,
    ) -> Subscription;

    /// Adds an unchecked item. Empty or whitespace-only titles are a silent
    /// no-op.
    async fn add_item(&self, slug: &str, title: &str) -> StoreResult<()>;

    /// Flips `done`; title fields are untouched.
    async fn toggle_checked(&self, slug: &str, item_id: &str, next_done: bool) -> StoreResult<()>;

    /// Renames an item, recomputing `title_lower`. Empty titles no-op;
    /// `done` is untouched.
    async fn rename_item(&self, slug: &str, item_id: &str, title: &str) -> StoreResult<()>;

    /// Deletes an item. Idempotent: removing an absent item is not an error.
    async fn remove_item(&self, slug: &str, item_id: &str) -> StoreResult<()>;

    /// Idempotently creates the family and list metadata documents. Never
    /// overwrites existing data.
    async fn ensure_provisioned(&self) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rejects_blank_titles() {
        assert_eq!(normalize_title(""), None);
        assert_eq!(normalize_title("   "), None);
        assert_eq!(normalize_title("\t\n"), None);
    }

    #[test]
    fn normalize_trims() {
        assert_eq!(normalize_title("  Молоко  "), Some("Молоко".to_string()));
    }

    #[test]
    fn title_payload_folds() {
        let (title, lower) = title_payload("Ёлка");
        assert_eq!(title, "Ёлка");
        assert_eq!(lower, "елка");
    }
}
