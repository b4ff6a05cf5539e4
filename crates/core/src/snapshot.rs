use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::item::Item;

/// Tags kept per entry when projecting the catalog for prompting.
const MAX_SNAPSHOT_TAGS: usize = 8;

/// Characters of short description kept per entry.
const MAX_SNAPSHOT_DESC_CHARS: usize = 160;

/// Prompt-ready projection of one catalog item. Field names match the JSON
/// shape embedded in the recommendation prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub tags: Vec<String>,
    pub desc: String,
    pub retailer: String,
}

/// Projects the catalog into a bounded summary suitable for prompting.
///
/// Pure and order-preserving: calling it twice on an unchanged catalog yields
/// identical output. Descriptions are truncated to keep outbound prompt size
/// small; an empty catalog yields an empty snapshot.
pub fn build_snapshot(items: &[Item]) -> Vec<SnapshotEntry> {
    items
        .iter()
        .map(|item| SnapshotEntry {
            item_id: item.id.0.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price,
            tags: item.tags.iter().take(MAX_SNAPSHOT_TAGS).cloned().collect(),
            desc: item.description_short.chars().take(MAX_SNAPSHOT_DESC_CHARS).collect(),
            retailer: item.retailer.0.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::item::{Item, RetailerId};

    use super::build_snapshot;

    fn item(name: &str, tags: Vec<String>, description: &str) -> Item {
        Item::new(
            RetailerId("acme".to_string()),
            name,
            "tech",
            description,
            Decimal::new(99_900, 2),
            3,
            tags,
        )
    }

    #[test]
    fn empty_catalog_yields_empty_snapshot() {
        assert!(build_snapshot(&[]).is_empty());
    }

    #[test]
    fn snapshot_preserves_catalog_order() {
        let items =
            vec![item("First", vec![], "d"), item("Second", vec![], "d"), item("Third", vec![], "d")];
        let names: Vec<_> =
            build_snapshot(&items).into_iter().map(|entry| entry.name).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn tags_are_capped_at_eight() {
        let tags: Vec<String> = (0..12).map(|n| format!("tag{n}")).collect();
        let snapshot = build_snapshot(&[item("Laptop", tags, "d")]);
        assert_eq!(snapshot[0].tags.len(), 8);
        assert_eq!(snapshot[0].tags[0], "tag0");
    }

    #[test]
    fn snapshot_is_idempotent_for_unchanged_catalog() {
        let items = vec![item("Laptop X", vec!["fast".to_string()], "A fast laptop")];
        assert_eq!(build_snapshot(&items), build_snapshot(&items));
    }

    #[test]
    fn entry_carries_retailer_for_deep_link_lookup() {
        let snapshot = build_snapshot(&[item("Laptop X", vec![], "d")]);
        assert_eq!(snapshot[0].retailer, "acme");
    }
}
