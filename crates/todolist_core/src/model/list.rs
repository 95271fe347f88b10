//! Item and List records.
//!
//! # Responsibility
//! - Define `Item` and `List` with fixed attribute sets.
//! - Provide the seed items used for first-run and new-list bootstrap.
//! - Normalize list names into their canonical lookup key.
//!
//! # Invariants
//! - `normalize_list_name` is idempotent.
//! - Items are never updated in place; they are created and deleted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one to-do item.
pub type ItemId = Uuid;

/// Stable identifier of one named list document.
pub type ListId = Uuid;

/// Title under which the default (unnamed) collection is rendered and posted.
pub const DEFAULT_LIST_TITLE: &str = "Today";

/// Texts of the starter items inserted on first run and into new lists.
pub const SEED_ITEM_NAMES: [&str; 3] = [
    "Welcome to your to-do-list.",
    "Hit the + button to add a new item.",
    "<-- Hit this to delete an item.",
];

/// One to-do entry, either in the default collection or embedded in a List.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Display text. May be empty; submissions are not validated.
    pub name: String,
}

impl Item {
    /// Creates an item with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Named custom list owning an ordered sequence of embedded items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    /// Normalized name; unique across all lists.
    pub name: String,
    pub items: Vec<Item>,
}

impl List {
    /// Creates a list document with a fresh id and normalized `name`.
    pub fn new(name: &str, items: Vec<Item>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: normalize_list_name(name),
            items,
        }
    }
}

/// Builds the three seed items with fresh ids.
///
/// Each call yields distinct ids so that seeded copies in different lists
/// never share identity.
pub fn seed_items() -> Vec<Item> {
    SEED_ITEM_NAMES.iter().map(|name| Item::new(*name)).collect()
}

/// Returns the canonical form of a list name: the whole name lowercased,
/// then its first character uppercased.
///
/// A first character whose uppercase form is more than one character (for
/// example `ß`) is kept unchanged so that normalization stays idempotent.
/// Every normalized name `n` satisfies
/// `normalize_list_name(&n.to_lowercase()) == n`, so lowercased request
/// paths resolve back to the stored list.
pub fn normalize_list_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut chars = lowered.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let mut normalized = String::with_capacity(lowered.len());
    match (upper.next(), upper.next()) {
        (Some(single), None) => normalized.push(single),
        _ => normalized.push(first),
    }
    normalized.push_str(chars.as_str());
    normalized
}

/// Parses a submitted item identifier.
///
/// Returns `None` for text that cannot name any stored item, which callers
/// treat the same as an unknown id.
pub fn parse_item_id(value: &str) -> Option<ItemId> {
    Uuid::parse_str(value.trim()).ok()
}
