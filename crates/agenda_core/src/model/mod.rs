//! Domain model for agenda contacts.
//!
//! # Responsibility
//! - Define the canonical contact record and its create/update inputs.
//! - Own field-level validation shared by store and persistence paths.
//!
//! # Invariants
//! - Every contact is identified by a store-assigned `ContactId`.
//! - A contact id never changes after assignment.

pub mod contact;
