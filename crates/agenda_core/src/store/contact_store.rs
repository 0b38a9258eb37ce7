//! Contact store with id allocation, CRUD, ordering and search.

use crate::model::contact::{
    Contact, ContactDraft, ContactId, ContactPatch, ContactValidationError,
};
use crate::repo::agenda_repo::{RepoError, RepoResult};
use crate::repo::document::AgendaDocument;
use crate::search::matcher::ContactQuery;
use crate::search::normalize::normalize_text;
use std::cmp::Ordering;
use std::collections::HashSet;

/// In-memory contact collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    next_id: ContactId,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStore {
    /// Creates an empty store whose first id is `1`.
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a store from a persisted document.
    ///
    /// A counter that does not exceed the largest id is raised to `max + 1`.
    ///
    /// # Errors
    /// - `InvalidData` for id `0`, id `ContactId::MAX`, duplicate ids or
    ///   contacts with blank required fields.
    pub fn from_document(document: AgendaDocument) -> RepoResult<Self> {
        let mut seen = HashSet::with_capacity(document.contacts.len());
        for contact in &document.contacts {
            if contact.id() == 0 {
                return Err(RepoError::InvalidData(
                    "contact id 0 is reserved".to_string(),
                ));
            }
            if contact.id() == ContactId::MAX {
                return Err(RepoError::InvalidData(format!(
                    "contact id {} leaves no next id",
                    contact.id()
                )));
            }
            if !seen.insert(contact.id()) {
                return Err(RepoError::duplicate_id(contact.id()));
            }
            contact
                .validate()
                .map_err(|err| RepoError::invalid_contact(contact.id(), err))?;
        }

        let min_next_id = document
            .contacts
            .iter()
            .map(Contact::id)
            .max()
            .map_or(1, |max| max + 1);

        Ok(Self {
            contacts: document.contacts,
            next_id: document.next_id.max(min_next_id),
        })
    }

    /// Snapshots the store in listing order.
    pub fn to_document(&self) -> AgendaDocument {
        AgendaDocument {
            next_id: self.next_id,
            contacts: self.list(),
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Id the next successful `create` will assign.
    pub fn next_id(&self) -> ContactId {
        self.next_id
    }

    /// Validates `draft`, assigns the next id and stores the contact.
    ///
    /// # Errors
    /// - Returns the validation error and leaves the store untouched when
    ///   `name` or `surname` is blank.
    /// - `IdsExhausted` once the counter has reached `ContactId::MAX`.
    pub fn create(&mut self, draft: ContactDraft) -> Result<Contact, ContactValidationError> {
        let draft = draft.normalized()?;
        let following = self
            .next_id
            .checked_add(1)
            .ok_or(ContactValidationError::IdsExhausted)?;
        let contact = Contact::from_draft(self.next_id, draft);
        self.next_id = following;
        self.contacts.push(contact.clone());
        Ok(contact)
    }

    pub fn find_by_id(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id() == id)
    }

    /// Overwrites the present, non-blank fields of `patch`.
    ///
    /// Returns `false` when `id` is unknown.
    pub fn update(&mut self, id: ContactId, patch: &ContactPatch) -> bool {
        match self.contacts.iter_mut().find(|contact| contact.id() == id) {
            Some(contact) => {
                contact.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the contact with `id`.
    pub fn delete(&mut self, id: ContactId) -> Option<Contact> {
        let index = self.contacts.iter().position(|contact| contact.id() == id)?;
        Some(self.contacts.remove(index))
    }

    /// All contacts ordered by surname, then name, then id.
    pub fn list(&self) -> Vec<Contact> {
        sorted(self.contacts.iter())
    }

    /// Contacts whose name, surname, phone or email contain `query`,
    /// ignoring case and diacritics. A blank query returns every contact.
    pub fn search(&self, query: &str) -> Vec<Contact> {
        let query = ContactQuery::new(query);
        sorted(self.contacts.iter().filter(|contact| query.matches(contact)))
    }
}

fn sorted<'a>(contacts: impl Iterator<Item = &'a Contact>) -> Vec<Contact> {
    let mut keyed = contacts
        .map(|contact| {
            (
                normalize_text(&contact.surname),
                normalize_text(&contact.name),
                contact,
            )
        })
        .collect::<Vec<_>>();
    keyed.sort_by(compare_keys);
    keyed.into_iter().map(|(_, _, contact)| contact.clone()).collect()
}

type SortKey<'a> = (String, String, &'a Contact);

fn compare_keys(left: &SortKey<'_>, right: &SortKey<'_>) -> Ordering {
    left.0
        .cmp(&right.0)
        .then_with(|| left.1.cmp(&right.1))
        .then_with(|| left.2.id().cmp(&right.2.id()))
}
