use std::io::Write;
use std::path::Path;

use indoc::indoc;

use super::loader::{LoadError, load_bytes, load_envelopes};

fn write_temp(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn single_envelope() {
    let file = write_temp(br#"{"k": 3, "mv": [1, 1, 16]}"#);

    let envelopes = load_envelopes(file.path()).unwrap();

    assert_eq!(envelopes.len(), 1);
    assert_eq!(envelopes[0].kind, 3);
    assert_eq!(envelopes[0].metadata_version, [1, 1, 16]);
}

#[test]
fn list_of_envelopes() {
    let json = indoc! {r#"
        [
          {"k": 1, "mv": [1, 1, 16], "d1": ["x"], "d2": ["pkg.Foo"]},
          {"k": 4, "mv": [1, 1, 16], "d1": ["pkg/A__PartKt"]}
        ]
    "#};
    let file = write_temp(json.as_bytes());

    let envelopes = load_envelopes(file.path()).unwrap();

    assert_eq!(envelopes.len(), 2);
    assert_eq!(envelopes[0].data2, ["pkg.Foo"]);
    assert_eq!(envelopes[1].data1, ["pkg/A__PartKt"]);
}

#[test]
fn envelope_without_kind_is_rejected() {
    let file = write_temp(br#"{"mv": [1, 1, 16]}"#);

    let err = load_envelopes(file.path()).unwrap_err();

    assert!(matches!(err, LoadError::Json { .. }));
    assert!(err.to_string().contains("is not a metadata envelope"));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_bytes(Path::new("/nonexistent/main.kotlin_module")).unwrap_err();

    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(
        err.to_string(),
        "failed to read '/nonexistent/main.kotlin_module'"
    );
}

#[test]
fn bytes_are_read_verbatim() {
    let file = write_temp(&[0, 0, 0, 1, 0xFF]);

    assert_eq!(load_bytes(file.path()).unwrap(), [0, 0, 0, 1, 0xFF]);
}
