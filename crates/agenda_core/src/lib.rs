//! Core domain logic for the agenda contact book.
//! This crate is the single source of truth for contact invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;
pub mod vcard;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{
    parse_age, Contact, ContactDraft, ContactId, ContactPatch, ContactValidationError,
};
pub use repo::agenda_repo::{
    AgendaRepository, InMemoryRepository, JsonFileRepository, RepoError, RepoResult,
};
pub use repo::document::AgendaDocument;
pub use search::matcher::ContactQuery;
pub use search::normalize::normalize_text;
pub use service::agenda_service::{AgendaService, ImportSummary, ServiceError, ServiceResult};
pub use store::contact_store::ContactStore;
pub use vcard::parser::{parse_vcards, VCard, VCardError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
