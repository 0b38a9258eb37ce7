//! Accent- and case-insensitive text search.
//!
//! # Responsibility
//! - Own the text normalization used by both listing order and search.
//! - Decide whether a contact matches a free-text query.

pub mod matcher;
pub mod normalize;
