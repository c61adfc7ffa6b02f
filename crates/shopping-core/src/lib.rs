//! Checklist logic for the household mini app.
//!
//! Everything here is platform-free and natively testable: the data model,
//! the locale-aware ordering engine, the store seam with its in-memory
//! implementation, the two-slot snapshot merge, and the pure gesture state
//! machines wrapped by `leptos-swipe` on the WASM side.

pub mod item;
pub mod long_press;
pub mod memory;
pub mod ordering;
pub mod pager;
pub mod store;
pub mod sync;

pub use item::{initial_lists, CheckItem, ItemRecord, ListMeta, ShoppingListData, SHOPPING_LISTS};
pub use ordering::{build_sections, fold_title, sort_items, Sections};
pub use store::{Section, ShoppingStore, StoreError, StoreResult, Subscription};
pub use sync::{ErrorLog, ErrorSource, SnapshotSlots, SyncError};
