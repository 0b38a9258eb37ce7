use agenda_core::{normalize_text, Contact, ContactDraft, ContactQuery, ContactStore};

fn sample_store() -> ContactStore {
    let mut store = ContactStore::new();
    store
        .create(ContactDraft::new("Juan", "Pérez").with_phone("011-4444"))
        .unwrap();
    store
        .create(ContactDraft::new("Marta", "alvarez").with_email("marta@correo.com"))
        .unwrap();
    store
        .create(
            ContactDraft::new("José", "Núñez")
                .with_phone("351-2222")
                .with_email("jose.nunez@example.com"),
        )
        .unwrap();
    store
}

fn ids(contacts: &[Contact]) -> Vec<u64> {
    contacts.iter().map(Contact::id).collect()
}

#[test]
fn search_ignores_case_and_diacritics() {
    let store = sample_store();

    let hits = store.search("PEREZ");
    assert_eq!(ids(&hits), vec![1]);

    let hits = store.search("nuñez");
    assert_eq!(ids(&hits), vec![3]);
}

#[test]
fn search_matches_phone_and_email_substrings() {
    let store = sample_store();

    assert_eq!(ids(&store.search("4444")), vec![1]);
    assert_eq!(ids(&store.search("@CORREO")), vec![2]);
    assert_eq!(ids(&store.search("example.com")), vec![3]);
}

#[test]
fn empty_query_matches_list() {
    let store = sample_store();

    assert_eq!(store.search(""), store.list());
    assert_eq!(store.search("   "), store.list());
}

#[test]
fn normalized_query_returns_same_results() {
    let store = sample_store();

    for query in ["PÉREZ", "Núñ", "MARTA", "José", "zzz"] {
        assert_eq!(store.search(query), store.search(&normalize_text(query)));
    }
}

#[test]
fn search_results_use_listing_order() {
    let store = sample_store();

    let hits = store.search("e");
    assert_eq!(ids(&hits), vec![2, 3, 1]);
}

#[test]
fn search_without_matches_is_empty() {
    let store = sample_store();
    assert!(store.search("gonzalez").is_empty());
}

#[test]
fn query_matches_only_searchable_fields() {
    let mut store = ContactStore::new();
    let contact = store
        .create(ContactDraft::new("Ana", "Diaz").with_age(33))
        .unwrap();

    assert!(ContactQuery::new("dÍa").matches(&contact));
    assert!(!ContactQuery::new("33").matches(&contact));
    assert!(ContactQuery::new("").is_blank());
}
