//! Query matching over searchable contact fields.

use crate::model::contact::Contact;
use crate::search::normalize::normalize_text;

/// A pre-normalized search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactQuery {
    normalized: String,
}

impl ContactQuery {
    /// Trims and normalizes raw query text.
    pub fn new(text: &str) -> Self {
        Self {
            normalized: normalize_text(text.trim()),
        }
    }

    /// Returns whether this query matches every contact.
    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Checks name, surname, phone and email for a normalized substring match.
    pub fn matches(&self, contact: &Contact) -> bool {
        if self.is_blank() {
            return true;
        }

        searchable_fields(contact).any(|field| normalize_text(field).contains(&self.normalized))
    }
}

fn searchable_fields(contact: &Contact) -> impl Iterator<Item = &str> {
    [
        Some(contact.name.as_str()),
        Some(contact.surname.as_str()),
        contact.phone.as_deref(),
        contact.email.as_deref(),
    ]
    .into_iter()
    .flatten()
}
