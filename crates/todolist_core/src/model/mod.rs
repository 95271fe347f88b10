//! Domain model for the default list and named lists.
//!
//! # Responsibility
//! - Define the fixed-field records persisted by the list store.
//! - Own list-name normalization and the first-run seed data.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId` assigned on creation.
//! - List names are stored and looked up in normalized form only.

pub mod list;
