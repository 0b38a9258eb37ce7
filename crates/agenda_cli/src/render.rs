//! Fixed-width contact table.

use agenda_core::Contact;
use std::fmt::{self, Write};

const ID_WIDTH: usize = 4;
const NAME_WIDTH: usize = 28;
const AGE_WIDTH: usize = 4;
const PHONE_WIDTH: usize = 16;
const EMAIL_WIDTH: usize = 28;

/// Renders `contacts` in the given order, one row per contact.
pub fn render_table(contacts: &[Contact]) -> Result<String, fmt::Error> {
    if contacts.is_empty() {
        return Ok("No contacts.\n".to_string());
    }

    let mut out = String::new();
    push_row(&mut out, ["ID", "Surname, Name", "Age", "Phone", "Email"])?;
    let rule_width = ID_WIDTH + NAME_WIDTH + AGE_WIDTH + PHONE_WIDTH + EMAIL_WIDTH + 4;
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');

    for contact in contacts {
        let id = contact.id().to_string();
        let name = contact.display_name();
        let age = contact.age.map(|age| age.to_string()).unwrap_or_default();
        push_row(
            &mut out,
            [
                id.as_str(),
                name.as_str(),
                age.as_str(),
                contact.phone.as_deref().unwrap_or(""),
                contact.email.as_deref().unwrap_or(""),
            ],
        )?;
    }
    Ok(out)
}

fn push_row(out: &mut String, cells: [&str; 5]) -> fmt::Result {
    let [id, name, age, phone, email] = cells;
    writeln!(
        out,
        "{:>id_w$} {:<name_w$} {:>age_w$} {:<phone_w$} {}",
        fit(id, ID_WIDTH),
        fit(name, NAME_WIDTH),
        fit(age, AGE_WIDTH),
        fit(phone, PHONE_WIDTH),
        fit(email, EMAIL_WIDTH),
        id_w = ID_WIDTH,
        name_w = NAME_WIDTH,
        age_w = AGE_WIDTH,
        phone_w = PHONE_WIDTH,
    )
}

/// Truncates to `width` characters, marking cuts with `~`.
fn fit(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut = value.chars().take(width - 1).collect::<String>();
    cut.push('~');
    cut
}
