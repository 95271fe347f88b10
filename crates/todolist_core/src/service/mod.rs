//! Core use-case services.
//!
//! # Responsibility
//! - Turn HTTP-agnostic list use-cases into list store calls.
//! - Keep the server layer decoupled from storage details.

pub mod list_service;
