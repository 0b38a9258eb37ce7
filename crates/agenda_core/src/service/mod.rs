//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and repository persistence.
//! - Keep the shell decoupled from storage details.

pub mod agenda_service;
