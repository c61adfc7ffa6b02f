//! Shopping list data model.
//!
//! Shapes mirror the Firestore documents under
//! `families/{family}/lists/{slug}/items/{id}`.

use serde::{Deserialize, Serialize};

use crate::ordering::sort_items;

/// A single checklist entry as presented to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItem {
    pub id: String,
    pub title: String,
    pub done: bool,
    /// Locale-folded cache of `title`, kept in sync on rename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_lower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Raw item document as delivered by a live query snapshot.
///
/// `checked` is implied by which query delivered the record, but the store
/// keeps it on the document so either side can be rebuilt independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_lower: Option<String>,
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl ItemRecord {
    pub fn into_check_item(self, done: bool) -> CheckItem {
        CheckItem {
            id: self.id,
            title: self.title,
            done,
            title_lower: self.title_lower,
            qty: self.qty,
            unit: self.unit,
        }
    }
}

/// A shopping list with its presented item sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListData {
    pub title: String,
    pub slug: String,
    pub items: Vec<CheckItem>,
}

/// Stable list metadata. Lists are provisioned once and never created or
/// deleted by end users; `slug` is the persistence key, `title` the
/// displayed Russian name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMeta {
    pub slug: &'static str,
    pub title: &'static str,
}

/// The fixed set of household lists.
pub const SHOPPING_LISTS: &[ListMeta] = &[
    ListMeta { slug: "food", title: "Еда" },
    ListMeta { slug: "household", title: "Бытовое" },
    ListMeta { slug: "stuff", title: "Вещи" },
];

/// Empty lists for every configured slug, in presentation order.
pub fn initial_lists() -> Vec<ShoppingListData> {
    SHOPPING_LISTS
        .iter()
        .map(|meta| ShoppingListData {
            title: meta.title.to_string(),
            slug: meta.slug.to_string(),
            items: Vec::new(),
        })
        .collect()
}

/// Seed items used by dev provisioning, already sorted for presentation.
pub fn seed_list_items(slug: &str) -> Vec<CheckItem> {
    let titles: &[&str] = match slug {
        "food" => &[
            "Авокадо",
            "Базилик свежий",
            "Гречневая крупа",
            "Йогурт греческий",
            "Клубника",
            "Кофе молотый",
            "Молоко",
            "Огурцы",
            "Пармезан",
            "Сметана",
            "Хлеб цельнозерновой",
        ],
        "household" => &[
            "Бумажные полотенца",
            "Губки для посуды",
            "Зубная паста",
            "Мешки для мусора",
            "Мыло жидкое",
            "Туалетная бумага",
        ],
        "stuff" => &[
            "Батарейки АА",
            "Зонт складной",
            "Кабель USB-C",
            "Носки теплые",
            "Повербанк",
        ],
        _ => &[],
    };

    let items: Vec<CheckItem> = titles
        .iter()
        .enumerate()
        .map(|(index, title)| CheckItem {
            id: format!("{slug}-{:02}", index + 1),
            title: (*title).to_string(),
            done: false,
            title_lower: Some(crate::ordering::fold_title(title)),
            qty: None,
            unit: None,
        })
        .collect();
    sort_items(&items)
}
