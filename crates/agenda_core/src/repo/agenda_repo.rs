//! Agenda repository contract with JSON file and in-memory implementations.
//!
//! # Responsibility
//! - Load and save the whole `AgendaDocument` as one JSON value.
//! - Report unreadable or malformed content as typed errors.
//!
//! # Invariants
//! - A missing or blank file is "no prior state", not an error.
//! - File saves go through a sibling temp file and a rename.

use crate::model::contact::{ContactId, ContactValidationError};
use crate::repo::document::AgendaDocument;
use log::{error, info, warn};
use std::cell::RefCell;
use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for agenda documents.
#[derive(Debug)]
pub enum RepoError {
    Io(io::Error),
    Serialization(serde_json::Error),
    /// Document parsed but violates store invariants.
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn duplicate_id(id: ContactId) -> Self {
        Self::InvalidData(format!("duplicate contact id {id}"))
    }

    pub(crate) fn invalid_contact(id: ContactId, err: ContactValidationError) -> Self {
        Self::InvalidData(format!("contact {id}: {err}"))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid agenda document: {err}"),
            Self::InvalidData(message) => write!(f, "invalid agenda data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<io::Error> for RepoError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Repository interface for agenda document persistence.
pub trait AgendaRepository {
    fn load(&self) -> RepoResult<Option<AgendaDocument>>;
    fn save(&self, document: &AgendaDocument) -> RepoResult<()>;
}

impl<R: AgendaRepository + ?Sized> AgendaRepository for &R {
    fn load(&self) -> RepoResult<Option<AgendaDocument>> {
        (**self).load()
    }

    fn save(&self, document: &AgendaDocument) -> RepoResult<()> {
        (**self).save(document)
    }
}

/// JSON-file-backed agenda repository.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_document(&self, document: &AgendaDocument) -> RepoResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut json = serde_json::to_string_pretty(document)?;
        json.push('\n');

        let temp_path = self.temp_path();
        fs::write(&temp_path, json)?;
        if let Err(err) = fs::rename(&temp_path, &self.path) {
            if let Err(cleanup_err) = fs::remove_file(&temp_path) {
                warn!(
                    "event=agenda_save module=repo status=error error_code=temp_cleanup_failed error={}",
                    cleanup_err
                );
            }
            return Err(err.into());
        }
        Ok(())
    }
}

impl AgendaRepository for JsonFileRepository {
    fn load(&self) -> RepoResult<Option<AgendaDocument>> {
        let started_at = Instant::now();
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=agenda_load module=repo status=ok mode=file found=false");
                return Ok(None);
            }
            Err(err) => {
                error!(
                    "event=agenda_load module=repo status=error mode=file error_code=read_failed error={}",
                    err
                );
                return Err(err.into());
            }
        };

        let document = parse_document(&text).inspect_err(|err| {
            error!(
                "event=agenda_load module=repo status=error mode=file error_code=parse_failed error={}",
                err
            );
        })?;

        info!(
            "event=agenda_load module=repo status=ok mode=file found={} contacts={} duration_ms={}",
            document.is_some(),
            document.as_ref().map_or(0, |doc| doc.contacts.len()),
            started_at.elapsed().as_millis()
        );
        Ok(document)
    }

    fn save(&self, document: &AgendaDocument) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.write_document(document) {
            Ok(()) => {
                info!(
                    "event=agenda_save module=repo status=ok mode=file contacts={} duration_ms={}",
                    document.contacts.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=agenda_save module=repo status=error mode=file duration_ms={} error_code=write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

/// In-memory agenda repository holding the serialized JSON text.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    json: RefCell<Option<String>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with raw document text, valid or not.
    pub fn with_json(text: impl Into<String>) -> Self {
        Self {
            json: RefCell::new(Some(text.into())),
        }
    }

    /// Returns the last saved (or seeded) document text.
    pub fn contents(&self) -> Option<String> {
        self.json.borrow().clone()
    }
}

impl AgendaRepository for InMemoryRepository {
    fn load(&self) -> RepoResult<Option<AgendaDocument>> {
        match self.json.borrow().as_deref() {
            Some(text) => parse_document(text),
            None => Ok(None),
        }
    }

    fn save(&self, document: &AgendaDocument) -> RepoResult<()> {
        let json = serde_json::to_string(document)?;
        *self.json.borrow_mut() = Some(json);
        Ok(())
    }
}

fn parse_document(text: &str) -> RepoResult<Option<AgendaDocument>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(text)?))
}
