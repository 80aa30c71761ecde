use super::*;

#[test]
fn loads_flat_string_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("creds.json");
    std::fs::write(&path, r#"{"token": "abc", "url": "https://example.test"}"#).unwrap();

    let creds = Credentials::load(&path).unwrap();
    assert_eq!(creds.require("token").unwrap(), "abc");
    assert_eq!(creds.require("url").unwrap(), "https://example.test");
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Credentials::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, WatcherError::Io(_)));
}

#[test]
fn missing_required_field_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("creds.json");
    std::fs::write(&path, r#"{"token": "abc"}"#).unwrap();

    let creds = Credentials::load(&path).unwrap();
    let err = creds.require("url").unwrap_err();
    assert!(matches!(err, WatcherError::MissingCredential(field) if field == "url"));
}

#[test]
fn empty_string_field_counts_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("creds.json");
    std::fs::write(&path, r#"{"token": ""}"#).unwrap();

    let creds = Credentials::load(&path).unwrap();
    assert!(creds.require("token").is_err());
}

#[test]
fn require_all_checks_every_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("creds.json");
    std::fs::write(&path, r#"{"token": "abc", "url": "u"}"#).unwrap();

    let creds = Credentials::load(&path).unwrap();
    assert!(creds.require_all(&["token", "url"]).is_ok());
    assert!(creds.require_all(&["token", "missing"]).is_err());
}
