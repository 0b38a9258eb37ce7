//! Interactive menu loop over an `AgendaService`.
//!
//! # Responsibility
//! - Present the fixed menu and collect field values line by line.
//! - Confirm deletes before touching the store.
//!
//! # Invariants
//! - End of input behaves like choosing Exit.
//! - The shell holds no contact state of its own.

use crate::render::render_table;
use agenda_core::{
    parse_age, AgendaRepository, AgendaService, Contact, ContactDraft, ContactId, ContactPatch,
    ServiceError,
};
use log::{debug, warn};
use std::io::{self, BufRead, Write};

const MENU: &str = "\
=== Agenda ===
1) List contacts
2) Add contact
3) Edit contact
4) Delete contact
5) Search
6) Import vCard file
0) Exit";

/// Line-based interactive shell.
pub struct Shell<R: AgendaRepository, I: BufRead, O: Write> {
    service: AgendaService<R>,
    input: I,
    output: O,
}

impl<R: AgendaRepository, I: BufRead, O: Write> Shell<R, I, O> {
    pub fn new(service: AgendaService<R>, input: I, output: O) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (AgendaService<R>, O) {
        (self.service, self.output)
    }

    /// Runs the menu until Exit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Option: ")? else {
                break;
            };
            debug!("event=menu_select module=shell option={}", choice.trim());

            match choice.trim() {
                "1" => self.list_contacts()?,
                "2" => self.add_contact()?,
                "3" => self.edit_contact()?,
                "4" => self.delete_contact()?,
                "5" => self.search_contacts()?,
                "6" => self.import_vcards()?,
                "0" => break,
                other => writeln!(self.output, "Unknown option `{other}`.")?,
            }
        }

        writeln!(self.output, "Bye.")?;
        self.output.flush()
    }

    fn list_contacts(&mut self) -> io::Result<()> {
        let contacts = self.service.list_contacts();
        self.write_table(&contacts)
    }

    fn add_contact(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt_required("Name: ", "Name is required.")? else {
            return Ok(());
        };
        let Some(surname) = self.prompt_required("Surname: ", "Surname is required.")? else {
            return Ok(());
        };
        let Some(phone) = self.prompt("Phone: ")? else {
            return Ok(());
        };
        let Some(email) = self.prompt("Email: ")? else {
            return Ok(());
        };
        let Some(age) = self.prompt_age("Age: ")? else {
            return Ok(());
        };

        let draft = ContactDraft {
            name,
            surname,
            phone: Some(phone),
            email: Some(email),
            age,
        };
        match self.service.create_contact(draft) {
            Ok(contact) => writeln!(
                self.output,
                "Created contact #{}: {}.",
                contact.id(),
                contact.display_name()
            ),
            Err(err) => self.report(&err),
        }
    }

    fn edit_contact(&mut self) -> io::Result<()> {
        let Some(contact) = self.prompt_existing("Contact id to edit: ")? else {
            return Ok(());
        };

        writeln!(self.output, "Leave a field blank to keep its value.")?;
        let Some(name) = self.prompt(&labelled("Name", Some(contact.name.as_str())))? else {
            return Ok(());
        };
        let surname_label = labelled("Surname", Some(contact.surname.as_str()));
        let Some(surname) = self.prompt(&surname_label)? else {
            return Ok(());
        };
        let Some(phone) = self.prompt(&labelled("Phone", contact.phone.as_deref()))? else {
            return Ok(());
        };
        let Some(email) = self.prompt(&labelled("Email", contact.email.as_deref()))? else {
            return Ok(());
        };
        let current_age = contact.age.map(|age| age.to_string());
        let Some(age) = self.prompt_age(&labelled("Age", current_age.as_deref()))? else {
            return Ok(());
        };

        let patch = ContactPatch {
            name: Some(name),
            surname: Some(surname),
            phone: Some(phone),
            email: Some(email),
            age,
        };
        if patch.is_empty() {
            return writeln!(self.output, "Nothing to change.");
        }

        match self.service.update_contact(contact.id(), &patch) {
            Ok(true) => writeln!(self.output, "Contact #{} updated.", contact.id()),
            Ok(false) => writeln!(self.output, "Contact #{} not found.", contact.id()),
            Err(err) => self.report(&err),
        }
    }

    fn delete_contact(&mut self) -> io::Result<()> {
        let Some(contact) = self.prompt_existing("Contact id to delete: ")? else {
            return Ok(());
        };

        let question = format!("Delete {}? [y/N]: ", contact.display_name());
        let Some(answer) = self.prompt(&question)? else {
            return Ok(());
        };
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            return writeln!(self.output, "Delete cancelled.");
        }

        match self.service.delete_contact(contact.id()) {
            Ok(Some(removed)) => writeln!(self.output, "Contact #{} deleted.", removed.id()),
            Ok(None) => writeln!(self.output, "Contact #{} not found.", contact.id()),
            Err(err) => self.report(&err),
        }
    }

    fn search_contacts(&mut self) -> io::Result<()> {
        let Some(query) = self.prompt("Search: ")? else {
            return Ok(());
        };
        let hits = self.service.search_contacts(&query);
        self.write_table(&hits)
    }

    fn import_vcards(&mut self) -> io::Result<()> {
        let Some(path) = self.prompt("vCard file: ")? else {
            return Ok(());
        };
        let path = path.trim();

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    "event=vcard_read module=shell status=error error_code=read_failed error={}",
                    err
                );
                return writeln!(self.output, "Could not read `{path}`: {err}.");
            }
        };

        match self.service.import_vcards(&text) {
            Ok(summary) => {
                writeln!(
                    self.output,
                    "Imported {} contact(s), skipped {}.",
                    summary.imported.len(),
                    summary.skipped.len()
                )?;
                for reason in &summary.skipped {
                    writeln!(self.output, "  skipped: {reason}")?;
                }
                Ok(())
            }
            Err(err) => self.report(&err),
        }
    }

    fn write_table(&mut self, contacts: &[Contact]) -> io::Result<()> {
        let table = render_table(contacts).map_err(io::Error::other)?;
        self.output.write_all(table.as_bytes())
    }

    /// Reads an id and looks the contact up, reporting bad input.
    fn prompt_existing(&mut self, label: &str) -> io::Result<Option<Contact>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        let Ok(id) = raw.trim().parse::<ContactId>() else {
            writeln!(self.output, "Invalid id `{}`.", raw.trim())?;
            return Ok(None);
        };

        match self.service.get_contact(id) {
            Some(contact) => Ok(Some(contact.clone())),
            None => {
                writeln!(self.output, "Contact #{id} not found.")?;
                Ok(None)
            }
        }
    }

    /// Re-prompts until a non-blank value is entered.
    fn prompt_required(&mut self, label: &str, complaint: &str) -> io::Result<Option<String>> {
        loop {
            let Some(value) = self.prompt(label)? else {
                return Ok(None);
            };
            if !value.trim().is_empty() {
                return Ok(Some(value));
            }
            writeln!(self.output, "{complaint}")?;
        }
    }

    /// Re-prompts until the age is blank or a valid integer.
    ///
    /// Outer `None` is end of input; inner `None` is "no age".
    fn prompt_age(&mut self, label: &str) -> io::Result<Option<Option<u32>>> {
        loop {
            let Some(value) = self.prompt(label)? else {
                return Ok(None);
            };
            match parse_age(&value) {
                Ok(age) => return Ok(Some(age)),
                Err(err) => writeln!(self.output, "{err}.")?,
            }
        }
    }

    /// Writes `label` and reads one line without its line terminator.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn report(&mut self, err: &ServiceError) -> io::Result<()> {
        match err {
            ServiceError::Validation(err) => writeln!(self.output, "Invalid contact: {err}."),
            ServiceError::Repo(_) => {
                writeln!(self.output, "Error: {err}. Changes are kept in memory.")
            }
        }
    }
}

fn labelled(field: &str, current: Option<&str>) -> String {
    match current {
        Some(value) => format!("{field} [{value}]: "),
        None => format!("{field}: "),
    }
}

#[cfg(test)]
mod tests {
    use super::Shell;
    use agenda_core::{AgendaService, ContactDraft, InMemoryRepository};
    use std::io::Cursor;

    fn run_script(repo: &InMemoryRepository, script: &str) -> String {
        let service = AgendaService::open(repo);
        let mut shell = Shell::new(service, Cursor::new(script.to_string()), Vec::new());
        shell.run().unwrap();
        let (_, output) = shell.into_parts();
        String::from_utf8(output).unwrap()
    }

    fn seeded_repo() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        {
            let mut service = AgendaService::open(&repo);
            service
                .create_contact(ContactDraft::new("Ana", "Diaz").with_phone("111"))
                .unwrap();
            service
                .create_contact(ContactDraft::new("Juan", "Pérez"))
                .unwrap();
        }
        repo
    }

    #[test]
    fn add_reprompts_required_fields_and_lists_result() {
        let repo = InMemoryRepository::new();
        let output = run_script(&repo, "2\n\nAna\n  \nDiaz\n111\n\nabc\n30\n1\n0\n");

        assert!(output.contains("Name is required."));
        assert!(output.contains("Surname is required."));
        assert!(output.contains("invalid age `abc`"));
        assert!(output.contains("Created contact #1: Diaz, Ana."));
        assert!(output.contains("   1 Diaz, Ana"));

        let service = AgendaService::open(&repo);
        let contact = service.get_contact(1).unwrap();
        assert_eq!(contact.age, Some(30));
        assert_eq!(contact.email, None);
    }

    #[test]
    fn edit_keeps_blank_fields() {
        let repo = seeded_repo();
        let output = run_script(&repo, "3\n1\n\n\n\nana@example.com\n\n0\n");

        assert!(output.contains("Phone [111]: "));
        assert!(output.contains("Contact #1 updated."));

        let service = AgendaService::open(&repo);
        let contact = service.get_contact(1).unwrap();
        assert_eq!(contact.phone.as_deref(), Some("111"));
        assert_eq!(contact.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let repo = seeded_repo();
        let output = run_script(&repo, "4\n2\nn\n4\n2\ny\n4\n2\n0\n");

        assert!(output.contains("Delete cancelled."));
        assert!(output.contains("Contact #2 deleted."));
        assert!(output.contains("Contact #2 not found."));

        let service = AgendaService::open(&repo);
        assert!(service.get_contact(2).is_none());
        assert_eq!(service.store().next_id(), 3);
    }

    #[test]
    fn search_is_accent_insensitive() {
        let repo = seeded_repo();
        let output = run_script(&repo, "5\nPEREZ\n0\n");

        assert!(output.contains("   2 Pérez, Juan"));
        assert!(!output.contains("Diaz, Ana"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let repo = seeded_repo();
        let output = run_script(&repo, "2\nAna\n");

        assert!(output.ends_with("Bye.\n"));
        assert_eq!(AgendaService::open(&repo).list_contacts().len(), 2);
    }

    #[test]
    fn invalid_input_is_reported() {
        let repo = seeded_repo();
        let output = run_script(&repo, "9\n3\nabc\n3\n99\n0\n");

        assert!(output.contains("Unknown option `9`."));
        assert!(output.contains("Invalid id `abc`."));
        assert!(output.contains("Contact #99 not found."));
    }

    #[test]
    fn import_reads_vcard_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alumnos.vcf");
        std::fs::write(
            &path,
            "BEGIN:VCARD\nN:Ruiz;Eva\nTEL:222\nEND:VCARD\nBEGIN:VCARD\nEND:VCARD\n",
        )
        .unwrap();

        let repo = InMemoryRepository::new();
        let output = run_script(&repo, &format!("6\n{}\n0\n", path.display()));

        assert!(output.contains("Imported 1 contact(s), skipped 1."));
        assert!(output.contains("skipped: vcard is missing `N`"));
        let service = AgendaService::open(&repo);
        assert_eq!(service.list_contacts()[0].surname, "Ruiz");
    }

    #[test]
    fn import_reports_missing_file() {
        let repo = InMemoryRepository::new();
        let output = run_script(&repo, "6\n/definitely/not/here.vcf\n0\n");

        assert!(output.contains("Could not read `/definitely/not/here.vcf`"));
    }
}
