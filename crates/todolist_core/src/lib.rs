//! Core domain logic for the to-do list service.
//! This crate owns list storage, seeding and name normalization.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::{
    normalize_list_name, parse_item_id, seed_items, Item, ItemId, List, ListId,
    DEFAULT_LIST_TITLE, SEED_ITEM_NAMES,
};
pub use repo::list_repo::{ListStore, SqliteListStore, StoreError, StoreResult};
pub use service::list_service::{list_path, ListService, ListTarget, ListVisit, TodayView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
