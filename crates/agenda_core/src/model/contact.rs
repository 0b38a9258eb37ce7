//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record persisted in the agenda document.
//! - Define typed inputs for creation (`ContactDraft`) and partial updates
//!   (`ContactPatch`).
//!
//! # Invariants
//! - `id` is assigned by the store and has no public mutator.
//! - `name` and `surname` are non-empty after trimming.
//! - Optional text fields are either `None` or non-empty trimmed strings.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned numeric identifier.
pub type ContactId = u64;

/// Validation errors for contact input and persisted contact state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
    EmptySurname,
    /// Age input that is not a non-negative integer.
    InvalidAge(String),
    /// The store has no id left to assign.
    IdsExhausted,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::EmptySurname => write!(f, "surname cannot be empty"),
            Self::InvalidAge(value) => {
                write!(f, "invalid age `{value}`; expected a non-negative integer")
            }
            Self::IdsExhausted => write!(f, "no contact ids left to assign"),
        }
    }
}

impl Error for ContactValidationError {}

/// Canonical contact record.
///
/// Serialized with the field names used by the agenda JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    id: ContactId,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "apellido", alias = "surname")]
    pub surname: String,
    #[serde(
        rename = "telefono",
        alias = "phone",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        rename = "edad",
        alias = "age",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<u32>,
}

impl Contact {
    /// Builds a contact from an already validated draft.
    pub(crate) fn from_draft(id: ContactId, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            surname: draft.surname,
            phone: draft.phone,
            email: draft.email,
            age: draft.age,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> ContactId {
        self.id
    }

    /// Display label in `Surname, Name` form.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.surname, self.name)
    }

    /// Checks required fields of a contact read back from storage.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if self.surname.trim().is_empty() {
            return Err(ContactValidationError::EmptySurname);
        }
        Ok(())
    }

    /// Applies every present, non-blank field of `patch`; `id` is untouched.
    pub(crate) fn apply_patch(&mut self, patch: &ContactPatch) {
        if let Some(name) = non_empty(patch.name.as_deref()) {
            self.name = name.to_string();
        }
        if let Some(surname) = non_empty(patch.surname.as_deref()) {
            self.surname = surname.to_string();
        }
        if let Some(phone) = non_empty(patch.phone.as_deref()) {
            self.phone = Some(phone.to_string());
        }
        if let Some(email) = non_empty(patch.email.as_deref()) {
            self.email = Some(email.to_string());
        }
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
    }
}

/// Input for creating a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Validates required fields and returns the trimmed draft.
    ///
    /// # Errors
    /// - `EmptyName` / `EmptySurname` when a required field is blank.
    pub fn normalized(self) -> Result<Self, ContactValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        let surname = self.surname.trim().to_string();
        if surname.is_empty() {
            return Err(ContactValidationError::EmptySurname);
        }

        Ok(Self {
            name,
            surname,
            phone: non_empty(self.phone.as_deref()).map(str::to_string),
            email: non_empty(self.email.as_deref()).map(str::to_string),
            age: self.age,
        })
    }
}

/// Partial update input.
///
/// `None` and blank strings both mean "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

impl ContactPatch {
    /// Returns whether applying this patch could change anything.
    pub fn is_empty(&self) -> bool {
        non_empty(self.name.as_deref()).is_none()
            && non_empty(self.surname.as_deref()).is_none()
            && non_empty(self.phone.as_deref()).is_none()
            && non_empty(self.email.as_deref()).is_none()
            && self.age.is_none()
    }
}

/// Parses free-form age input.
///
/// Blank input means "no age given" and returns `Ok(None)`.
pub fn parse_age(input: &str) -> Result<Option<u32>, ContactValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ContactValidationError::InvalidAge(trimmed.to_string()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{parse_age, ContactDraft, ContactPatch, ContactValidationError};

    #[test]
    fn normalized_trims_and_drops_blank_optionals() {
        let draft = ContactDraft::new("  Ana ", " Diaz")
            .with_phone("   ")
            .with_email(" ana@example.com ")
            .normalized()
            .unwrap();

        assert_eq!(draft.name, "Ana");
        assert_eq!(draft.surname, "Diaz");
        assert_eq!(draft.phone, None);
        assert_eq!(draft.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn normalized_rejects_blank_required_fields() {
        let err = ContactDraft::new(" ", "Diaz").normalized().unwrap_err();
        assert_eq!(err, ContactValidationError::EmptyName);

        let err = ContactDraft::new("Ana", "\t").normalized().unwrap_err();
        assert_eq!(err, ContactValidationError::EmptySurname);
    }

    #[test]
    fn parse_age_accepts_blank_and_digits_only() {
        assert_eq!(parse_age("").unwrap(), None);
        assert_eq!(parse_age(" 42 ").unwrap(), Some(42));
        assert_eq!(
            parse_age("-3").unwrap_err(),
            ContactValidationError::InvalidAge("-3".to_string())
        );
    }

    #[test]
    fn patch_with_only_blank_values_is_empty() {
        let patch = ContactPatch {
            phone: Some(String::new()),
            email: Some("  ".to_string()),
            ..ContactPatch::default()
        };
        assert!(patch.is_empty());
    }
}
