//! In-memory contact store.
//!
//! # Responsibility
//! - Own the contact collection and id allocation.
//! - Provide CRUD, listing order and search over contacts.
//!
//! # Invariants
//! - Ids are unique, immutable and never reused after deletion.
//! - `next_id` is always greater than every id in the store.

pub mod contact_store;
