//! Agenda use-case service.
//!
//! # Responsibility
//! - Bind one `ContactStore` to one `AgendaRepository`.
//! - Recover from unreadable persisted state by starting empty.
//! - Persist the store after every successful mutation.
//!
//! # Invariants
//! - Validation failures and not-found lookups never trigger a save.
//! - A failed save keeps the in-memory mutation and reports the error.

use crate::model::contact::{
    Contact, ContactDraft, ContactId, ContactPatch, ContactValidationError,
};
use crate::repo::agenda_repo::{AgendaRepository, RepoError};
use crate::store::contact_store::ContactStore;
use crate::vcard::parser::{parse_vcards, VCardError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for agenda use-cases.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ContactValidationError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "failed to save agenda: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ContactValidationError> for ServiceError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of a vCard import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Created contacts, in input order.
    pub imported: Vec<Contact>,
    /// Cards that could not be turned into contacts, in input order.
    pub skipped: Vec<VCardError>,
}

/// Use-case service wrapper for agenda operations.
pub struct AgendaService<R: AgendaRepository> {
    repo: R,
    store: ContactStore,
}

impl<R: AgendaRepository> AgendaService<R> {
    /// Loads the persisted agenda from `repo`.
    ///
    /// Missing, unreadable or invalid documents yield an empty store; the
    /// failure is logged and not returned.
    pub fn open(repo: R) -> Self {
        let store = match repo.load() {
            Ok(Some(document)) => match ContactStore::from_document(document) {
                Ok(store) => store,
                Err(err) => {
                    warn!(
                        "event=agenda_open module=service status=recovered error_code=invalid_document error={}",
                        err
                    );
                    ContactStore::new()
                }
            },
            Ok(None) => ContactStore::new(),
            Err(err) => {
                warn!(
                    "event=agenda_open module=service status=recovered error_code=load_failed error={}",
                    err
                );
                ContactStore::new()
            }
        };

        info!(
            "event=agenda_open module=service status=ok contacts={} next_id={}",
            store.len(),
            store.next_id()
        );
        Self { repo, store }
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    /// Creates a contact and saves the agenda.
    ///
    /// # Errors
    /// - `Validation` when `name` or `surname` is blank; nothing is saved.
    /// - `Repo` when the save fails; the contact stays in memory.
    pub fn create_contact(&mut self, draft: ContactDraft) -> ServiceResult<Contact> {
        let contact = self.store.create(draft)?;
        info!(
            "event=contact_create module=service status=ok id={}",
            contact.id()
        );
        self.save()?;
        Ok(contact)
    }

    pub fn get_contact(&self, id: ContactId) -> Option<&Contact> {
        self.store.find_by_id(id)
    }

    /// Applies `patch` to contact `id`; returns `Ok(false)` for unknown ids.
    pub fn update_contact(&mut self, id: ContactId, patch: &ContactPatch) -> ServiceResult<bool> {
        if !self.store.update(id, patch) {
            info!("event=contact_update module=service status=not_found id={id}");
            return Ok(false);
        }
        info!("event=contact_update module=service status=ok id={id}");
        self.save()?;
        Ok(true)
    }

    /// Deletes contact `id`; returns `Ok(None)` for unknown ids.
    pub fn delete_contact(&mut self, id: ContactId) -> ServiceResult<Option<Contact>> {
        let Some(removed) = self.store.delete(id) else {
            info!("event=contact_delete module=service status=not_found id={id}");
            return Ok(None);
        };
        info!("event=contact_delete module=service status=ok id={id}");
        self.save()?;
        Ok(Some(removed))
    }

    pub fn list_contacts(&self) -> Vec<Contact> {
        self.store.list()
    }

    pub fn search_contacts(&self, query: &str) -> Vec<Contact> {
        self.store.search(query)
    }

    /// Creates one contact per valid card in `text`.
    ///
    /// Saves once when at least one contact was created.
    pub fn import_vcards(&mut self, text: &str) -> ServiceResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for parsed in parse_vcards(text) {
            let created = parsed
                .and_then(|card| card.to_draft())
                .and_then(|draft| self.store.create(draft).map_err(VCardError::from));
            match created {
                Ok(contact) => summary.imported.push(contact),
                Err(err) => summary.skipped.push(err),
            }
        }

        info!(
            "event=vcard_import module=service status=ok imported={} skipped={}",
            summary.imported.len(),
            summary.skipped.len()
        );
        if !summary.imported.is_empty() {
            self.save()?;
        }
        Ok(summary)
    }

    /// Writes the current store through the repository.
    pub fn save(&self) -> ServiceResult<()> {
        self.repo.save(&self.store.to_document())?;
        Ok(())
    }
}
