//! vCard import support.
//!
//! # Responsibility
//! - Parse `.vcf` text into typed cards with explicit missing fields.
//! - Convert cards into contact drafts for the store.

pub mod parser;
