use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of the auto-derived short description.
const SHORT_DESCRIPTION_CHARS: usize = 120;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RetailerId(pub String);

/// A catalog listing owned by a single retailer.
///
/// Identity (`id`, `retailer`) is fixed at creation; descriptive fields are
/// mutable through explicit setters that keep the derived short description
/// in sync.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub retailer: RetailerId,
    pub name: String,
    pub category: String,
    pub description_full: String,
    pub description_short: String,
    pub price: Decimal,
    pub stock: u32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(
        retailer: RetailerId,
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        stock: u32,
        tags: Vec<String>,
    ) -> Self {
        let description_full = description.into();
        let now = Utc::now();
        Self {
            id: ItemId(Uuid::new_v4().to_string()),
            retailer,
            name: name.into(),
            category: category.into(),
            description_short: derive_short_description(&description_full),
            description_full,
            price,
            stock,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the full description and re-derives the short form.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description_full = description.into();
        self.description_short = derive_short_description(&self.description_full);
        self.updated_at = Utc::now();
    }

    /// Replaces the tag list from a comma-separated string, dropping blanks.
    pub fn set_tags_from_csv(&mut self, csv: &str) {
        self.tags = csv
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        self.updated_at = Utc::now();
    }
}

fn derive_short_description(full: &str) -> String {
    let full = full.trim();
    if full.chars().count() > SHORT_DESCRIPTION_CHARS {
        let truncated: String = full.chars().take(SHORT_DESCRIPTION_CHARS).collect();
        format!("{truncated}...")
    } else {
        full.to_string()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{derive_short_description, Item, RetailerId};

    fn item_with_description(description: &str) -> Item {
        Item::new(
            RetailerId("acme".to_string()),
            "Laptop X",
            "tech",
            description,
            Decimal::new(99_900, 2),
            4,
            vec!["laptop".to_string(), "fast".to_string()],
        )
    }

    #[test]
    fn short_description_passes_through_when_small() {
        let item = item_with_description("A fast laptop");
        assert_eq!(item.description_short, "A fast laptop");
    }

    #[test]
    fn short_description_truncates_long_text_with_ellipsis() {
        let long = "x".repeat(200);
        let item = item_with_description(&long);
        assert_eq!(item.description_short.chars().count(), 123);
        assert!(item.description_short.ends_with("..."));
    }

    #[test]
    fn set_description_keeps_short_form_in_sync() {
        let mut item = item_with_description("old");
        item.set_description("y".repeat(150));
        assert!(item.description_short.starts_with("yyy"));
        assert!(item.description_short.ends_with("..."));
        assert_eq!(item.description_full.len(), 150);
    }

    #[test]
    fn csv_tags_drop_blanks_and_whitespace() {
        let mut item = item_with_description("d");
        item.set_tags_from_csv("gaming, , portable ,");
        assert_eq!(item.tags, vec!["gaming".to_string(), "portable".to_string()]);
    }

    #[test]
    fn boundary_length_description_is_not_truncated() {
        let exact = "z".repeat(120);
        assert_eq!(derive_short_description(&exact), exact);
    }
}
