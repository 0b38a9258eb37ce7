use agenda_core::{parse_vcards, AgendaService, InMemoryRepository, VCard, VCardError};

const DIRECTORY: &str = "BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
N:Pérez;Lucía;;;\r\n\
FN:Lucía Pérez\r\n\
TEL;TYPE=cell:+54 11 5555-0000\r\n\
TEL;TYPE=home:4444-0000\r\n\
EMAIL;TYPE=INTERNET:lucia@alumnos.example\r\n\
END:VCARD\r\n\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Martín Gómez\r\n\
item1.EMAIL:martin@alumnos.ex\r\n ample\r\n\
END:VCARD\r\n";

#[test]
fn parses_typed_fields() {
    let cards = parse_vcards(DIRECTORY);
    assert_eq!(cards.len(), 2);

    let first = cards[0].as_ref().unwrap();
    assert_eq!(first.family_name.as_deref(), Some("Pérez"));
    assert_eq!(first.given_name.as_deref(), Some("Lucía"));
    assert_eq!(first.phone.as_deref(), Some("+54 11 5555-0000"));
    assert_eq!(first.email.as_deref(), Some("lucia@alumnos.example"));

    let second = cards[1].as_ref().unwrap();
    assert_eq!(second.family_name, None);
    assert_eq!(second.given_name, None);
    assert_eq!(second.phone, None);
    assert_eq!(second.email.as_deref(), Some("martin@alumnos.example"));
}

#[test]
fn formatted_name_fills_missing_structured_name() {
    let card = VCard {
        formatted_name: Some("María José Ruiz".to_string()),
        ..VCard::default()
    };

    let draft = card.to_draft().unwrap();
    assert_eq!(draft.name, "María José");
    assert_eq!(draft.surname, "Ruiz");
}

#[test]
fn card_without_usable_name_is_reported() {
    let cards = parse_vcards("BEGIN:VCARD\nFN:Cher\nTEL:123\nEND:VCARD\n");
    let card = cards[0].as_ref().unwrap();

    assert_eq!(card.to_draft().unwrap_err(), VCardError::MissingField("N"));
}

#[test]
fn malformed_and_unterminated_cards_are_reported() {
    let text = "BEGIN:VCARD\nN:Diaz;Ana\nthis is not a property\nEND:VCARD\nBEGIN:VCARD\nN:Ruiz;Eva\n";
    let cards = parse_vcards(text);

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0], Err(VCardError::MalformedLine { line: 3 }));
    assert_eq!(cards[1], Err(VCardError::Unterminated { line: 5 }));
}

#[test]
fn text_outside_cards_is_ignored() {
    assert!(parse_vcards("just some notes\n\n").is_empty());
}

#[test]
fn import_creates_contacts_and_reports_skips() {
    let repo = InMemoryRepository::new();
    let mut service = AgendaService::open(&repo);
    let text = format!("{DIRECTORY}BEGIN:VCARD\nFN:Cher\nEND:VCARD\n");

    let summary = service.import_vcards(&text).unwrap();

    assert_eq!(summary.imported.len(), 2);
    assert_eq!(summary.skipped, vec![VCardError::MissingField("N")]);
    assert_eq!(summary.imported[1].name, "Martín");
    assert_eq!(summary.imported[1].surname, "Gómez");

    let surnames = service
        .list_contacts()
        .into_iter()
        .map(|contact| contact.surname)
        .collect::<Vec<_>>();
    assert_eq!(surnames, vec!["Gómez", "Pérez"]);
    assert!(repo.contents().is_some());
}

#[test]
fn import_without_valid_cards_does_not_save() {
    let repo = InMemoryRepository::new();
    let mut service = AgendaService::open(&repo);

    let summary = service.import_vcards("BEGIN:VCARD\nEND:VCARD\n").unwrap();

    assert!(summary.imported.is_empty());
    assert_eq!(summary.skipped.len(), 1);
    assert!(repo.contents().is_none());
}
