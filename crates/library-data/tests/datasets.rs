//! Loader tests for the catalogue and roster fixtures.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]


use camino::Utf8Path;
use library_data::{BookDataset, DatasetError, RoleRecord, StatusRecord, UserRoster};
use rstest::rstest;
use test_support::write_temp_dataset;

const CATALOGUE_JSON: &str = r#"[
    {"id": 1, "title": "Dune", "author": "Frank Herbert",
     "image": "https://covers.test/dune.jpg", "description": "Desert planet.",
     "borrowed_by": [42], "favorited_by": [7, 42]},
    {"id": 2, "title": "Emma", "author": "Jane Austen",
     "borrowed_by": [], "favorited_by": []}
]"#;

const ROSTER_JSON: &str = r#"[
    {"id": 1, "username": "admin", "password": "admin123", "role": "admin",
     "email": "admin@library.test", "phone": "+1-555-0100", "status": "active"},
    {"id": 42, "username": "reader", "password": "books", "role": "user",
     "email": "reader@library.test", "status": "inactive"}
]"#;

#[test]
fn parses_catalogue_in_fixture_order() {
    let dataset = BookDataset::from_json(CATALOGUE_JSON).expect("valid catalogue");
    let ids: Vec<u64> = dataset.books().iter().map(|book| book.id).collect();
    assert_eq!(ids, vec![1, 2]);
    let dune = dataset.books().first().expect("first book");
    assert_eq!(dune.favorited_by, vec![7, 42]);
}

#[rstest]
#[case::zero_id(
    r#"[{"id": 0, "title": "Dune", "author": "Herbert"}]"#,
    DatasetError::InvalidBookId { index: 0 }
)]
#[case::duplicate_id(
    r#"[{"id": 4, "title": "A", "author": "X"}, {"id": 4, "title": "B", "author": "Y"}]"#,
    DatasetError::DuplicateBookId { id: 4 }
)]
#[case::blank_title(
    r#"[{"id": 5, "title": "   ", "author": "X"}]"#,
    DatasetError::BlankTitle { id: 5 }
)]
#[case::zero_seed_member(
    r#"[{"id": 6, "title": "A", "author": "X", "favorited_by": [0]}]"#,
    DatasetError::InvalidSeedMember { book_id: 6 }
)]
fn rejects_structurally_invalid_catalogues(#[case] json: &str, #[case] expected: DatasetError) {
    let err = BookDataset::from_json(json).expect_err("catalogue must be rejected");
    assert_eq!(err, expected);
}

#[rstest]
#[case::zero_id(
    r#"[{"id": 0, "username": "a", "password": "p", "role": "user"}]"#,
    DatasetError::InvalidUserId { index: 0 }
)]
#[case::duplicate_id(
    r#"[{"id": 2, "username": "a", "password": "p", "role": "user"},
        {"id": 2, "username": "b", "password": "p", "role": "user"}]"#,
    DatasetError::DuplicateUserId { id: 2 }
)]
#[case::duplicate_username(
    r#"[{"id": 2, "username": "a", "password": "p", "role": "user"},
        {"id": 3, "username": "a", "password": "p", "role": "admin"}]"#,
    DatasetError::DuplicateUsername { username: "a".to_owned() }
)]
#[case::blank_username(
    r#"[{"id": 9, "username": "", "password": "p", "role": "user"}]"#,
    DatasetError::BlankUsername { id: 9 }
)]
fn rejects_structurally_invalid_rosters(#[case] json: &str, #[case] expected: DatasetError) {
    let err = UserRoster::from_json(json).expect_err("roster must be rejected");
    assert_eq!(err, expected);
}

#[test]
fn roster_lookups_use_exact_matches() {
    let roster = UserRoster::from_json(ROSTER_JSON).expect("valid roster");
    assert!(roster.find_by_username("Admin").is_none());
    let reader = roster.find_by_username("reader").expect("reader present");
    assert_eq!(reader.role, RoleRecord::User);
    assert_eq!(reader.status, StatusRecord::Inactive);
    assert!(reader.phone.is_empty());
}

#[test]
fn loads_catalogue_from_file() {
    let path = write_temp_dataset("catalogue", "books.json", CATALOGUE_JSON)
        .expect("write catalogue fixture");
    let dataset = BookDataset::from_file(&path).expect("load catalogue");
    assert_eq!(dataset.books().len(), 2);
}

#[test]
fn loads_roster_from_file() {
    let path = write_temp_dataset("roster", "users.json", ROSTER_JSON).expect("write roster");
    let roster = UserRoster::from_file(&path).expect("load roster");
    assert_eq!(roster.users().len(), 2);
}

#[test]
fn missing_file_reports_io_error_with_path() {
    let path = Utf8Path::new("target/library-data-tests/does-not-exist/books.json");
    match BookDataset::from_file(path) {
        Err(DatasetError::IoError { path: reported, .. }) => assert_eq!(reported.as_path(), path),
        other => panic!("expected IoError, got: {other:?}"),
    }
}
