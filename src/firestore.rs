//! Firestore Bridge Wrappers
//!
//! Frontend bindings to the Firestore helpers the hosting page installs on
//! `window.__FAMILY_DB__` (thin wrappers over the Firebase JS SDK:
//! per-side `onSnapshot` queries ordered by `titleLower`, document writes
//! with server timestamps, and idempotent provisioning). The Rust side
//! never talks to the SDK directly, just like the Tauri `invoke` seam this
//! mirrors.

use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use shopping_core::item::{ItemRecord, SHOPPING_LISTS};
use shopping_core::store::{
    normalize_title, title_payload, Section, ShoppingStore, SnapshotHandler, StoreError,
    StoreResult, SubscribeErrorHandler, Subscription,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__FAMILY_DB__"], js_name = subscribeItems)]
    fn subscribe_items(
        slug: &str,
        checked: bool,
        on_snapshot: &js_sys::Function,
        on_error: &js_sys::Function,
    ) -> js_sys::Function;

    #[wasm_bindgen(catch, js_namespace = ["window", "__FAMILY_DB__"], js_name = addItem)]
    async fn add_item_js(slug: &str, payload: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "__FAMILY_DB__"], js_name = updateItem)]
    async fn update_item_js(slug: &str, item_id: &str, payload: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "__FAMILY_DB__"], js_name = deleteItem)]
    async fn delete_item_js(slug: &str, item_id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "__FAMILY_DB__"], js_name = ensureProvisioned)]
    async fn ensure_provisioned_js(lists: JsValue) -> Result<JsValue, JsValue>;
}

// ========================
// Bridge Payload Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewItemPayload<'a> {
    title: &'a str,
    title_lower: &'a str,
    checked: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TogglePayload {
    checked: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenamePayload<'a> {
    title: &'a str,
    title_lower: &'a str,
}

#[derive(Serialize)]
struct ListMetaPayload {
    slug: &'static str,
    name: &'static str,
}

#[derive(Deserialize)]
struct SnapshotPayload {
    docs: Vec<DocPayload>,
}

#[derive(Deserialize)]
struct DocPayload {
    id: String,
    data: ItemDocData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDocData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    title_lower: Option<String>,
    #[serde(default)]
    qty: Option<f64>,
    #[serde(default)]
    unit: Option<String>,
}

/// Whether the hosting page installed the Firestore helpers. Absent in
/// local development, where the in-memory store takes over.
pub fn bridge_available() -> bool {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &"__FAMILY_DB__".into()).ok())
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}

fn js_error(source: &str, value: JsValue) -> StoreError {
    let message = value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"));
    StoreError::Unavailable(format!("{source}: {message}"))
}

fn to_payload<T: Serialize>(payload: &T) -> StoreResult<JsValue> {
    serde_wasm_bindgen::to_value(payload).map_err(|e| StoreError::Internal(e.to_string()))
}

/// Firestore-backed shopping store.
#[derive(Clone, Default)]
pub struct FirestoreStore;

impl FirestoreStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl ShoppingStore for FirestoreStore {
    fn subscribe(
        &self,
        slug: &str,
        section: Section,
        on_snapshot: SnapshotHandler,
        on_error: SubscribeErrorHandler,
    ) -> Subscription {
        let error_for_snapshot = Rc::clone(&on_error);
        let snapshot_cb = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            match serde_wasm_bindgen::from_value::<SnapshotPayload>(value) {
                Ok(snapshot) => {
                    let records = snapshot
                        .docs
                        .into_iter()
                        .map(|doc| ItemRecord {
                            id: doc.id,
                            title: doc.data.title,
                            title_lower: doc.data.title_lower,
                            // The query side is authoritative for `checked`.
                            checked: section.is_checked(),
                            qty: doc.data.qty,
                            unit: doc.data.unit,
                        })
                        .collect();
                    on_snapshot(records);
                }
                Err(e) => error_for_snapshot(StoreError::Internal(format!(
                    "malformed snapshot: {e}"
                ))),
            }
        });
        let error_cb = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            on_error(js_error("onSnapshot", value));
        });

        let unsubscribe = subscribe_items(
            slug,
            section.is_checked(),
            snapshot_cb.as_ref().unchecked_ref(),
            error_cb.as_ref().unchecked_ref(),
        );

        // The closures must outlive the registration; the cancel closure
        // owns them and drops them after unsubscribing.
        Subscription::new(move || {
            let _ = unsubscribe.call0(&JsValue::NULL);
            drop(snapshot_cb);
            drop(error_cb);
        })
    }

    async fn add_item(&self, slug: &str, title: &str) -> StoreResult<()> {
        let Some(normalized) = normalize_title(title) else {
            return Ok(());
        };
        let (title, title_lower) = title_payload(&normalized);
        let payload = to_payload(&NewItemPayload {
            title: &title,
            title_lower: &title_lower,
            checked: false,
        })?;
        add_item_js(slug, payload)
            .await
            .map(|_| ())
            .map_err(|e| js_error("addItem", e))
    }

    async fn toggle_checked(&self, slug: &str, item_id: &str, next_done: bool) -> StoreResult<()> {
        let payload = to_payload(&TogglePayload { checked: next_done })?;
        update_item_js(slug, item_id, payload)
            .await
            .map(|_| ())
            .map_err(|e| js_error("updateItem", e))
    }

    async fn rename_item(&self, slug: &str, item_id: &str, title: &str) -> StoreResult<()> {
        let Some(normalized) = normalize_title(title) else {
            return Ok(());
        };
        let (title, title_lower) = title_payload(&normalized);
        let payload = to_payload(&RenamePayload {
            title: &title,
            title_lower: &title_lower,
        })?;
        update_item_js(slug, item_id, payload)
            .await
            .map(|_| ())
            .map_err(|e| js_error("updateItem", e))
    }

    async fn remove_item(&self, slug: &str, item_id: &str) -> StoreResult<()> {
        delete_item_js(slug, item_id)
            .await
            .map(|_| ())
            .map_err(|e| js_error("deleteItem", e))
    }

    async fn ensure_provisioned(&self) -> StoreResult<()> {
        let lists: Vec<ListMetaPayload> = SHOPPING_LISTS
            .iter()
            .map(|meta| ListMetaPayload {
                slug: meta.slug,
                name: meta.title,
            })
            .collect();
        let payload = to_payload(&lists)?;
        ensure_provisioned_js(payload)
            .await
            .map(|_| ())
            .map_err(|e| js_error("ensureProvisioned", e))
    }
}
