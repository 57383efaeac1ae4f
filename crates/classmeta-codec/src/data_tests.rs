use super::*;

fn int_type(strings: &mut StringTable) -> TypeRecord {
    TypeRecord {
        classifier: Classifier::Class(strings.intern_class_name("Int")),
        ..TypeRecord::default()
    }
}

fn sample_class(strings: &mut StringTable) -> ClassRecord {
    let fq_name = strings.intern_class_name("pkg.Foo");
    let name = strings.intern("bar");
    let return_type = Some(int_type(strings));

    ClassRecord {
        flags: 0b11_0110,
        fq_name,
        functions: vec![FunctionRecord {
            flags: 0b11_0110,
            name,
            return_type,
            ..FunctionRecord::default()
        }],
        ..ClassRecord::default()
    }
}

#[test]
fn class_record_roundtrip() {
    let mut strings = StringTable::new();
    let record = sample_class(&mut strings);

    let (d1, d2) = write_data(&record, &strings);
    let (names, decoded) = read_class_data(&d1, &d2).unwrap();

    assert_eq!(decoded, record);
    assert_eq!(d2, vec!["pkg.Foo", "bar", "Int"]);
    assert_eq!(names.qualified_class_name(decoded.fq_name), "pkg.Foo");
    assert_eq!(names.string(decoded.functions[0].name), "bar");
}

#[test]
fn function_record_roundtrip() {
    let mut strings = StringTable::new();
    let name = strings.intern("<anonymous>");
    let record = FunctionRecord {
        name,
        value_parameters: vec![ValueParameterRecord {
            name: strings.intern("it"),
            ty: Some(int_type(&mut strings)),
            ..ValueParameterRecord::default()
        }],
        ..FunctionRecord::default()
    };

    let (d1, d2) = write_data(&record, &strings);
    let (_, decoded) = read_function_data(&d1, &d2).unwrap();

    assert_eq!(decoded, record);
}

#[test]
fn missing_string_is_reported() {
    let mut strings = StringTable::new();
    let record = sample_class(&mut strings);
    let (d1, mut d2) = write_data(&record, &strings);

    d2.pop();
    let err = read_class_data(&d1, &d2).unwrap_err();

    assert!(matches!(
        err,
        CodecError::StringIdOutOfRange { id: 2, len: 2 }
    ));
}

#[test]
fn unknown_value_tag_ids_are_not_checked() {
    let mut strings = StringTable::new();
    let mut record = sample_class(&mut strings);
    record.type_aliases.push(TypeAliasRecord {
        name: strings.intern("Alias"),
        annotations: vec![AnnotationRecord {
            id: strings.intern_class_name("pkg.Ann"),
            arguments: vec![ArgumentRecord {
                name_id: strings.intern("x"),
                value: ValueRecord {
                    tag: 200,
                    string_value: StringId(999),
                    ..ValueRecord::default()
                },
            }],
        }],
        ..TypeAliasRecord::default()
    });

    let (d1, d2) = write_data(&record, &strings);

    assert!(read_class_data(&d1, &d2).is_ok());
}

#[test]
fn garbage_payload_is_malformed() {
    let d1 = vec!["\u{0}\u{7f}\u{7f}\u{7f}".to_string()];

    let err = read_package_data(&d1, &[]).unwrap_err();

    assert!(matches!(err, CodecError::Malformed(_)));
}

#[test]
fn trailing_bytes_are_rejected() {
    let strings = StringTable::new();
    let record = PackageRecord::default();
    let (types, _) = strings.serialize();

    let mut bytes = postcard::to_allocvec(&types).unwrap();
    bytes.extend(postcard::to_allocvec(&record).unwrap());
    bytes.push(0);
    let d1 = bit_encoding::encode_bytes(&bytes);

    let err = read_package_data(&d1, &[]).unwrap_err();

    assert!(matches!(err, CodecError::TrailingBytes(1)));
}

#[test]
fn value_type_from_tag() {
    assert_eq!(ValueType::from_tag(0), Some(ValueType::Byte));
    assert_eq!(ValueType::from_tag(12), Some(ValueType::Array));
    assert_eq!(ValueType::from_tag(13), None);
    assert_eq!(ValueType::Enum.tag(), 10);
}

#[test]
fn error_messages() {
    let errors = [
        CodecError::TrailingBytes(2),
        CodecError::StringIdOutOfRange { id: 4, len: 3 },
        CodecError::Truncated {
            needed: 8,
            actual: 5,
        },
        CodecError::NegativeLength(-2),
    ];

    let rendered = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(rendered, @r"
    2 trailing bytes after record
    string id 4 out of range (table has 3 entries)
    truncated input: needed 8 bytes, got 5
    negative length: -2
    ");
}

/// Postcard bytes of a type whose `outer_type` chain is `hops` long.
fn outer_type_chain(hops: usize) -> Vec<u8> {
    // flags, classifier, arguments, abbreviated_type, then `outer_type: Some`
    let mut bytes = [0, 0, 0, 0, 0, 1].repeat(hops);
    // innermost type with every optional field absent
    bytes.extend([0; 10]);
    // flexible_upper_bound, flexibility_id, annotations, is_raw of each outer level
    bytes.extend([0, 0, 0, 0].repeat(hops));
    bytes
}

fn lambda_with_receiver(receiver: &[u8]) -> Vec<String> {
    let (types, _) = StringTable::new().serialize();
    let mut bytes = postcard::to_allocvec(&types).unwrap();
    // flags, name, `receiver_type: Some`
    bytes.extend([0, 0, 1]);
    bytes.extend(receiver);
    // type_parameters, value_parameters, return_type, signature
    bytes.extend([0, 0, 0, 0]);
    bit_encoding::encode_bytes(&bytes)
}

#[test]
fn shallow_hand_built_type_decodes() {
    let d1 = lambda_with_receiver(&outer_type_chain(3));

    let (_, decoded) = read_function_data(&d1, &["A".to_string()]).unwrap();

    let mut depth = 0;
    let mut ty = decoded.receiver_type.as_ref();
    while let Some(current) = ty {
        ty = current.outer_type.as_deref();
        depth += 1;
    }
    assert_eq!(depth, 4);
}

#[test]
fn nesting_below_the_limit_is_accepted() {
    let mut strings = StringTable::new();
    let mut ty = int_type(&mut strings);
    for _ in 1..MAX_NESTING_DEPTH {
        ty = TypeRecord {
            classifier: ty.classifier,
            outer_type: Some(Box::new(ty)),
            ..TypeRecord::default()
        };
    }
    let record = FunctionRecord {
        name: strings.intern("f"),
        receiver_type: Some(ty),
        ..FunctionRecord::default()
    };

    let (d1, d2) = write_data(&record, &strings);

    assert_eq!(read_function_data(&d1, &d2).unwrap().1, record);
}

#[test]
fn deeply_nested_types_are_malformed() {
    let d1 = lambda_with_receiver(&outer_type_chain(200_000));

    let err = read_function_data(&d1, &["A".to_string()]).unwrap_err();

    assert!(matches!(err, CodecError::Malformed(_)));
}

#[test]
fn deeply_nested_annotation_values_are_malformed() {
    // tag Array, zeroed scalars and ids, no annotation, then one element
    let mut level = vec![12u8];
    level.extend([0; 17]);
    level.push(1);
    let mut value = level.repeat(100_000);
    value.extend([0; 19]);

    let strings = StringTable::new();
    let (types, _) = strings.serialize();
    let mut bytes = postcard::to_allocvec(&types).unwrap();
    // one type alias with one annotation holding one argument
    bytes.extend([0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0]);
    bytes.extend(value);
    let d1 = bit_encoding::encode_bytes(&bytes);

    let err = read_package_data(&d1, &["A".to_string()]).unwrap_err();

    assert!(matches!(err, CodecError::Malformed(_)));
}
