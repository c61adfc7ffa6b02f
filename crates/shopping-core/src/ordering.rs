//! Item ordering engine.
//!
//! Sorting is locale-aware for Russian: comparison runs over a folded key
//! (Unicode lowercase with `ё` collapsing to its base letter `е`, the same
//! base-sensitivity the reference collator used). The fold is also what the
//! store writes into `title_lower` on add and rename, so the comparator and
//! the persisted cache can never disagree.

use std::cmp::Ordering;

use crate::item::{CheckItem, ItemRecord};

/// Russian-locale case fold used for `title_lower` and for comparison keys.
pub fn fold_title(title: &str) -> String {
    title
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ё' { 'е' } else { c })
        .collect()
}

fn collation_key(item: &CheckItem) -> String {
    // A remote `title_lower` may have been produced by a different folding
    // routine, so fold it again before comparing.
    fold_title(item.title_lower.as_deref().unwrap_or(&item.title))
}

fn compare_items(a: &CheckItem, b: &CheckItem) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.id.cmp(&b.id))
}

/// Returns a new sequence ordered by the locale comparator; the input is
/// never mutated. Ties fall back to the raw title, then the item id, so the
/// result is the same for any permutation of the input.
pub fn sort_items(items: &[CheckItem]) -> Vec<CheckItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(compare_items);
    sorted
}

/// The two sorted runs of a list plus their concatenation, unchecked first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections {
    pub unchecked_items: Vec<CheckItem>,
    pub checked_items: Vec<CheckItem>,
    pub all_items: Vec<CheckItem>,
}

/// Builds the presented item sequence from the two raw query snapshots.
/// Each side is sorted independently; unchecked items always render before
/// checked ones.
pub fn build_sections(unchecked: &[ItemRecord], checked: &[ItemRecord]) -> Sections {
    let unchecked_items = sort_items(
        &unchecked
            .iter()
            .cloned()
            .map(|record| record.into_check_item(false))
            .collect::<Vec<_>>(),
    );
    let checked_items = sort_items(
        &checked
            .iter()
            .cloned()
            .map(|record| record.into_check_item(true))
            .collect::<Vec<_>>(),
    );

    let mut all_items = unchecked_items.clone();
    all_items.extend(checked_items.iter().cloned());

    Sections {
        unchecked_items,
        checked_items,
        all_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> CheckItem {
        CheckItem {
            id: id.to_string(),
            title: title.to_string(),
            done: false,
            title_lower: Some(fold_title(title)),
            qty: None,
            unit: None,
        }
    }

    fn record(id: &str, title: &str, checked: bool) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            title: title.to_string(),
            title_lower: Some(fold_title(title)),
            checked,
            qty: None,
            unit: None,
        }
    }

    fn titles(items: &[CheckItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn fold_lowercases_and_collapses_yo() {
        assert_eq!(fold_title("Ёлка"), "елка");
        assert_eq!(fold_title("АВОКАДО"), "авокадо");
        assert_eq!(fold_title("USB-C Кабель"), "usb-c кабель");
    }

    #[test]
    fn sorts_case_insensitively_in_russian_order() {
        let items = vec![item("1", "Банан"), item("2", "аарон"), item("3", "Авокадо")];
        let sorted = sort_items(&items);
        assert_eq!(titles(&sorted), vec!["аарон", "Авокадо", "Банан"]);
    }

    #[test]
    fn sort_is_idempotent_and_permutation_invariant() {
        let a = vec![
            item("1", "Ёлка"),
            item("2", "елка"),
            item("3", "Молоко"),
            item("4", "молоко"),
        ];
        let mut b = a.clone();
        b.reverse();

        let sorted_a = sort_items(&a);
        let sorted_b = sort_items(&b);
        assert_eq!(sorted_a, sorted_b);
        assert_eq!(sort_items(&sorted_a), sorted_a);
    }

    #[test]
    fn duplicate_titles_fall_back_to_id() {
        let items = vec![item("b", "Молоко"), item("a", "Молоко")];
        let sorted = sort_items(&items);
        assert_eq!(sorted[0].id, "a");
        assert_eq!(sorted[1].id, "b");
    }

    #[test]
    fn missing_title_lower_still_compares_case_insensitively() {
        let mut upper = item("1", "БАНАН");
        upper.title_lower = None;
        let items = vec![upper, item("2", "авокадо")];
        let sorted = sort_items(&items);
        assert_eq!(titles(&sorted), vec!["авокадо", "БАНАН"]);
    }

    #[test]
    fn empty_input_sorts_to_empty() {
        assert!(sort_items(&[]).is_empty());
    }

    #[test]
    fn sections_keep_unchecked_before_checked() {
        let unchecked = vec![record("u2", "Банан", false), record("u1", "Авокадо", false)];
        let checked = vec![record("c1", "Сметана", true), record("c2", "Молоко", true)];

        let sections = build_sections(&unchecked, &checked);
        assert_eq!(titles(&sections.unchecked_items), vec!["Авокадо", "Банан"]);
        assert_eq!(titles(&sections.checked_items), vec!["Молоко", "Сметана"]);
        assert_eq!(
            titles(&sections.all_items),
            vec!["Авокадо", "Банан", "Молоко", "Сметана"]
        );
        assert!(sections.all_items[..2].iter().all(|i| !i.done));
        assert!(sections.all_items[2..].iter().all(|i| i.done));
    }

    #[test]
    fn sections_cover_every_record_exactly_once() {
        let unchecked: Vec<_> = (0..5)
            .map(|n| record(&format!("u{n}"), &format!("Товар {n}"), false))
            .collect();
        let checked: Vec<_> = (0..3)
            .map(|n| record(&format!("c{n}"), &format!("Готово {n}"), true))
            .collect();

        let sections = build_sections(&unchecked, &checked);
        assert_eq!(sections.all_items.len(), 8);
        assert_eq!(sections.unchecked_items.len(), 5);
        assert_eq!(sections.checked_items.len(), 3);
    }

    #[test]
    fn added_item_lands_in_locale_position() {
        let unchecked = vec![
            record("1", "Авокадо", false),
            record("2", "Банан", false),
            record("3", "аарон", false),
        ];
        let sections = build_sections(&unchecked, &[]);
        assert_eq!(
            titles(&sections.unchecked_items),
            vec!["аарон", "Авокадо", "Банан"]
        );
    }
}
