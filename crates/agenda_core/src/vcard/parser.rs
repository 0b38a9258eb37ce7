//! Line-oriented vCard parser.
//!
//! # Invariants
//! - Folded lines are unfolded before property matching.
//! - Missing properties stay `None`; they are never defaulted to `""`.
//! - Each `BEGIN:VCARD` block yields exactly one result.

use crate::model::contact::{ContactDraft, ContactValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PROPERTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9-]+\.)?(?P<name>[A-Za-z0-9-]+)(?:;[^:]*)?:(?P<value>.*)$")
        .expect("valid vcard property regex")
});

/// Parse or conversion failure for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VCardError {
    /// `BEGIN:VCARD` at `line` has no matching `END:VCARD`.
    Unterminated { line: usize },
    /// Line inside a card that is not a `NAME[;params]:value` property.
    MalformedLine { line: usize },
    /// Required property absent or blank.
    MissingField(&'static str),
    InvalidContact(ContactValidationError),
}

impl Display for VCardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unterminated { line } => {
                write!(f, "vcard starting at line {line} has no END:VCARD")
            }
            Self::MalformedLine { line } => write!(f, "malformed vcard line {line}"),
            Self::MissingField(field) => write!(f, "vcard is missing `{field}`"),
            Self::InvalidContact(err) => write!(f, "{err}"),
        }
    }
}

impl Error for VCardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidContact(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for VCardError {
    fn from(value: ContactValidationError) -> Self {
        Self::InvalidContact(value)
    }
}

/// Typed view of the vCard properties the agenda understands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCard {
    /// `N` component 2.
    pub given_name: Option<String>,
    /// `N` component 1.
    pub family_name: Option<String>,
    /// `FN`.
    pub formatted_name: Option<String>,
    /// First `TEL`.
    pub phone: Option<String>,
    /// First `EMAIL`.
    pub email: Option<String>,
}

impl VCard {
    /// Converts this card into a contact draft.
    ///
    /// Without `N`, `FN` is split at its last space into given and family
    /// name.
    ///
    /// # Errors
    /// - `MissingField("N")` when either name part cannot be determined.
    pub fn to_draft(&self) -> Result<ContactDraft, VCardError> {
        let (given, family) = match (&self.given_name, &self.family_name) {
            (Some(given), Some(family)) => (given.clone(), family.clone()),
            _ => self
                .split_formatted_name()
                .ok_or(VCardError::MissingField("N"))?,
        };

        let mut draft = ContactDraft::new(given, family);
        draft.phone = self.phone.clone();
        draft.email = self.email.clone();
        Ok(draft.normalized()?)
    }

    fn split_formatted_name(&self) -> Option<(String, String)> {
        let formatted = self.formatted_name.as_deref()?.trim();
        let (given, family) = formatted.rsplit_once(char::is_whitespace)?;
        let given = given.trim();
        if given.is_empty() || family.is_empty() {
            return None;
        }
        Some((given.to_string(), family.to_string()))
    }

    fn apply_property(&mut self, name: &str, value: &str) {
        match name.to_ascii_uppercase().as_str() {
            "N" => {
                let mut components = split_components(value).into_iter();
                self.family_name = components.next().and_then(non_blank);
                self.given_name = components.next().and_then(non_blank);
            }
            "FN" => self.formatted_name = non_blank(unescape(value)),
            "TEL" if self.phone.is_none() => self.phone = non_blank(unescape(value)),
            "EMAIL" if self.email.is_none() => self.email = non_blank(unescape(value)),
            _ => {}
        }
    }
}

/// Parses every `BEGIN:VCARD` .. `END:VCARD` block in `text`.
///
/// Text outside blocks is ignored.
pub fn parse_vcards(text: &str) -> Vec<Result<VCard, VCardError>> {
    let mut results = Vec::new();
    let mut current: Option<CardBuilder> = None;

    for line in unfold_lines(text) {
        let content = line.text.trim();
        if content.is_empty() {
            continue;
        }

        if content.eq_ignore_ascii_case("BEGIN:VCARD") {
            if let Some(open) = current.take() {
                results.push(Err(VCardError::Unterminated {
                    line: open.start_line,
                }));
            }
            current = Some(CardBuilder::new(line.number));
            continue;
        }

        if content.eq_ignore_ascii_case("END:VCARD") {
            if let Some(builder) = current.take() {
                results.push(builder.finish());
            }
            continue;
        }

        if let Some(builder) = current.as_mut() {
            builder.push_line(line.number, content);
        }
    }

    if let Some(open) = current {
        results.push(Err(VCardError::Unterminated {
            line: open.start_line,
        }));
    }

    results
}

struct CardBuilder {
    start_line: usize,
    card: VCard,
    error: Option<VCardError>,
}

impl CardBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            card: VCard::default(),
            error: None,
        }
    }

    fn push_line(&mut self, number: usize, content: &str) {
        match PROPERTY_RE.captures(content) {
            Some(captures) => {
                self.card
                    .apply_property(&captures["name"], &captures["value"]);
            }
            None if self.error.is_none() => {
                self.error = Some(VCardError::MalformedLine { line: number });
            }
            None => {}
        }
    }

    fn finish(self) -> Result<VCard, VCardError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.card),
        }
    }
}

struct LogicalLine {
    /// 1-based number of the first physical line.
    number: usize,
    text: String,
}

fn unfold_lines(text: &str) -> Vec<LogicalLine> {
    let mut lines: Vec<LogicalLine> = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        if raw.starts_with(' ') || raw.starts_with('\t') {
            if let Some(previous) = lines.last_mut() {
                previous.text.push_str(&raw[1..]);
                continue;
            }
        }
        lines.push(LogicalLine {
            number: index + 1,
            text: raw.to_string(),
        });
    }
    lines
}

/// Splits a structured value on unescaped `;` and unescapes each part.
fn split_components(value: &str) -> Vec<String> {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('n') | Some('N') => current.push('\n'),
                Some(other) => current.push(other),
                None => current.push('\\'),
            },
            ';' => components.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    components.push(current);
    components
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
