//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the list store contract consumed by services.
//! - Isolate SQLite query and document encoding details from callers.
//!
//! # Invariants
//! - List lookups and writes always go through normalized names.
//! - Store APIs return semantic errors (`NotFound`, `DuplicateKey`) in
//!   addition to backend failures, and never retry internally.

pub mod list_repo;
