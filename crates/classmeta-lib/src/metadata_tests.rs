use crate::{CLASS_KIND, Metadata};

#[test]
fn missing_attributes_default_to_empty() {
    let metadata: Metadata = serde_json::from_str(r#"{"k": 1, "mv": [1, 1, 16]}"#).unwrap();

    assert_eq!(metadata.kind, CLASS_KIND);
    assert_eq!(metadata.metadata_version, vec![1, 1, 16]);
    assert!(metadata.data1.is_empty());
    assert_eq!(metadata.extra_string, "");
    assert_eq!(metadata.extra_int, 0);
}

#[test]
fn kind_is_required() {
    let err = serde_json::from_str::<Metadata>(r#"{"mv": [1, 1]}"#).unwrap_err();

    assert!(err.to_string().contains("missing field `k`"));
}

#[test]
fn serializes_short_attribute_names() {
    let metadata = Metadata {
        kind: 5,
        extra_string: "pkg/BarKt".into(),
        extra_int: 1,
        ..Metadata::default()
    };

    let json = serde_json::to_string(&metadata).unwrap();

    assert_eq!(
        json,
        r#"{"k":5,"mv":[],"bv":[],"d1":[],"d2":[],"xs":"pkg/BarKt","pn":"","xi":1}"#
    );
}

#[test]
fn extra_int_predicates() {
    let metadata = Metadata {
        extra_int: 0b110,
        ..Metadata::default()
    };

    assert!(!metadata.multi_file_parts_inherit_facade());
    assert!(metadata.is_pre_release());
    assert!(metadata.is_script());
}
