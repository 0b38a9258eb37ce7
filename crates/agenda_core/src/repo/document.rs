//! Persisted agenda document shape.
//!
//! # Invariants
//! - Written documents always carry `nextId` and `contactos`.
//! - Reading accepts the counter as `nextId`/`proximoId` (next id) or
//!   `lastId`/`ultimoId` (last assigned id).

use crate::model::contact::{Contact, ContactId};
use serde::{Deserialize, Serialize};

/// Snapshot of a contact store as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAgendaDocument")]
pub struct AgendaDocument {
    #[serde(rename = "nextId")]
    pub next_id: ContactId,
    #[serde(rename = "contactos")]
    pub contacts: Vec<Contact>,
}

impl AgendaDocument {
    pub fn empty() -> Self {
        Self {
            next_id: 1,
            contacts: Vec::new(),
        }
    }
}

impl Default for AgendaDocument {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Deserialize)]
struct RawAgendaDocument {
    #[serde(rename = "nextId", alias = "proximoId", default)]
    next_id: Option<ContactId>,
    #[serde(rename = "lastId", alias = "ultimoId", default)]
    last_id: Option<ContactId>,
    #[serde(rename = "contactos", alias = "contacts", default)]
    contacts: Vec<Contact>,
}

impl TryFrom<RawAgendaDocument> for AgendaDocument {
    type Error = String;

    fn try_from(raw: RawAgendaDocument) -> Result<Self, Self::Error> {
        let next_id = match (raw.next_id, raw.last_id) {
            (Some(next_id), _) => next_id,
            (None, Some(last)) => last
                .checked_add(1)
                .ok_or_else(|| format!("last id {last} leaves no next id"))?,
            (None, None) => match raw.contacts.iter().map(Contact::id).max() {
                Some(max) => max
                    .checked_add(1)
                    .ok_or_else(|| format!("contact id {max} leaves no next id"))?,
                None => 1,
            },
        };

        Ok(Self {
            next_id,
            contacts: raw.contacts,
        })
    }
}
