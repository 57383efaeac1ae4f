use super::*;

fn sample_record() -> ModuleRecord {
    ModuleRecord {
        package_parts: vec![PackagePartsRecord {
            package_fq_name: "pkg".into(),
            short_class_names: vec!["FooKt".into(), "Bar__PartKt".into()],
            multifile_facade_short_name_ids: vec![0, 1],
            multifile_facade_short_names: vec!["BarKt".into()],
            ..PackagePartsRecord::default()
        }],
        string_table: vec!["pkg.Ann".into()],
        annotations: vec![StringId(0)],
        ..ModuleRecord::default()
    }
}

#[test]
fn module_version_is_big_endian_prefix() {
    let bytes = encode_module(&[1, 1, 16], &ModuleRecord::default());

    assert_eq!(&bytes[..8], &[0, 0, 0, 3, 0, 0, 0, 1]);

    let (version, rest) = decode_module_version(&bytes).unwrap();
    assert_eq!(version, vec![1, 1, 16]);
    assert_eq!(decode_module(rest).unwrap(), ModuleRecord::default());
}

#[test]
fn module_record_roundtrip() {
    let record = sample_record();
    let bytes = encode_module(&[1, 1, 16], &record);

    let (_, rest) = decode_module_version(&bytes).unwrap();

    assert_eq!(decode_module(rest).unwrap(), record);
}

#[test]
fn empty_input_is_truncated() {
    let err = decode_module_version(&[]).unwrap_err();

    assert!(matches!(
        err,
        CodecError::Truncated {
            needed: 4,
            actual: 0
        }
    ));
}

#[test]
fn version_count_larger_than_input_is_truncated() {
    let err = decode_module_version(&[0, 0, 0, 5, 0, 0, 0, 1]).unwrap_err();

    assert_eq!(err.to_string(), "truncated input: needed 24 bytes, got 8");
}

#[test]
fn negative_version_count_is_rejected() {
    let err = decode_module_version(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap_err();

    assert!(matches!(err, CodecError::NegativeLength(-1)));
}
