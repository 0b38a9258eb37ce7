//! Persistence boundary for the agenda document.
//!
//! # Responsibility
//! - Define the load/save contract consumed by the service layer.
//! - Keep file and serialization details out of the store.
//!
//! # Invariants
//! - `load` distinguishes "no prior state" (`Ok(None)`) from unreadable or
//!   invalid content (`Err`).
//! - `save` writes the whole document; the last full write wins.

pub mod agenda_repo;
pub mod document;
