//! List use-case service.
//!
//! # Responsibility
//! - Decide between the default collection and named lists from a list title.
//! - Bootstrap the default collection and new lists with seed items.
//! - Report where a caller should redirect after each write.
//!
//! # Invariants
//! - The service never creates a list as a side effect of adding an item.
//! - Store errors are returned unchanged; nothing is retried or swallowed.

use crate::model::list::{
    normalize_list_name, parse_item_id, seed_items, Item, List, DEFAULT_LIST_TITLE,
};
use crate::repo::list_repo::{ListStore, StoreResult};
use log::info;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when a list name is placed in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Outcome of reading the default collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodayView {
    /// The collection was empty and has just been seeded; re-read it.
    Seeded,
    Items(Vec<Item>),
}

/// Outcome of visiting a named list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListVisit {
    /// The list did not exist and was created with seed items.
    Created(String),
    Existing(List),
}

/// Collection a write was applied to, used to pick the redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTarget {
    Today,
    /// Normalized list name.
    Named(String),
}

impl ListTarget {
    /// Resolves a submitted list title.
    ///
    /// Only the exact title `Today` addresses the default collection.
    pub fn from_title(title: &str) -> Self {
        if title == DEFAULT_LIST_TITLE {
            Self::Today
        } else {
            Self::Named(normalize_list_name(title))
        }
    }

    /// Returns the path that renders this collection.
    pub fn path(&self) -> String {
        match self {
            Self::Today => "/".to_string(),
            Self::Named(name) => list_path(name),
        }
    }
}

/// Returns the request path of a named list: `/` plus the lowercased,
/// percent-encoded name.
pub fn list_path(name: &str) -> String {
    let lowered = name.to_lowercase();
    format!("/{}", utf8_percent_encode(&lowered, PATH_SEGMENT))
}

/// List service facade over list store implementations.
pub struct ListService<S: ListStore> {
    store: S,
}

impl<S: ListStore> ListService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the default collection, seeding it on first run.
    pub fn today(&self) -> StoreResult<TodayView> {
        let items = self.store.get_default_items()?;
        if items.is_empty() {
            info!("event=default_seed module=service status=ok action=redirect");
            return Ok(TodayView::Seeded);
        }
        Ok(TodayView::Items(items))
    }

    /// Opens a named list, creating it with seed items when absent.
    ///
    /// # Errors
    /// - `DuplicateKey` when a concurrent visit created the same list first.
    pub fn visit_list(&self, raw_name: &str) -> StoreResult<ListVisit> {
        let name = normalize_list_name(raw_name);
        if let Some(list) = self.store.get_list(&name)? {
            return Ok(ListVisit::Existing(list));
        }

        let created = self.store.create_list(&name, seed_items())?;
        Ok(ListVisit::Created(created.name))
    }

    /// Adds an item with `text` to the collection addressed by `list_title`.
    ///
    /// # Errors
    /// - `NotFound` when `list_title` names a list that does not exist.
    pub fn add_item(&self, list_title: &str, text: &str) -> StoreResult<ListTarget> {
        let target = ListTarget::from_title(list_title);
        match &target {
            ListTarget::Today => self.store.add_item_to_default(text)?,
            ListTarget::Named(name) => self.store.add_item_to_list(name, text)?,
        };
        Ok(target)
    }

    /// Deletes the item identified by `raw_id` from the addressed collection.
    ///
    /// Unknown or malformed ids leave the collection unchanged.
    pub fn delete_item(&self, list_title: &str, raw_id: &str) -> StoreResult<ListTarget> {
        let target = ListTarget::from_title(list_title);
        let Some(id) = parse_item_id(raw_id) else {
            return Ok(target);
        };

        match &target {
            ListTarget::Today => self.store.delete_default_item(id)?,
            ListTarget::Named(name) => self.store.delete_item_from_list(name, id)?,
        };
        Ok(target)
    }
}
