use classmeta_codec::{StringTable, ValueRecord, ValueType};

use crate::annotation::{read_annotation, read_annotation_argument, write_annotation};
use crate::{Annotation, AnnotationArgument};

fn roundtrip(annotation: &Annotation) -> Annotation {
    let mut strings = StringTable::new();
    let record = write_annotation(annotation, &mut strings);
    read_annotation(&record, &strings.resolver())
}

#[test]
fn every_argument_kind_roundtrips() {
    let annotation = Annotation::new("pkg.Ann")
        .with_argument("b", AnnotationArgument::Byte(-1))
        .with_argument("c", AnnotationArgument::Char('λ'))
        .with_argument("s", AnnotationArgument::Short(300))
        .with_argument("i", AnnotationArgument::Int(42))
        .with_argument("l", AnnotationArgument::Long(1 << 40))
        .with_argument("f", AnnotationArgument::Float(1.5))
        .with_argument("d", AnnotationArgument::Double(-0.25))
        .with_argument("z", AnnotationArgument::Boolean(true))
        .with_argument("str", AnnotationArgument::String("text".into()))
        .with_argument("k", AnnotationArgument::KClass("pkg.Foo".into()))
        .with_argument(
            "e",
            AnnotationArgument::Enum {
                class_name: "pkg.Color".into(),
                entry_name: "RED".into(),
            },
        )
        .with_argument(
            "a",
            AnnotationArgument::Annotation(
                Annotation::new("pkg.Inner").with_argument("x", AnnotationArgument::Int(1)),
            ),
        )
        .with_argument(
            "arr",
            AnnotationArgument::Array(vec![
                AnnotationArgument::Int(1),
                AnnotationArgument::String("two".into()),
            ]),
        );

    assert_eq!(roundtrip(&annotation), annotation);
}

#[test]
fn local_class_names_keep_their_marker() {
    let annotation = Annotation::new(".Local")
        .with_argument("k", AnnotationArgument::KClass(".Other".into()));

    assert_eq!(roundtrip(&annotation), annotation);
}

#[test]
fn equality_ignores_argument_order() {
    let a = Annotation::new("pkg.Ann")
        .with_argument("x", AnnotationArgument::Int(1))
        .with_argument("y", AnnotationArgument::Int(2));
    let b = Annotation::new("pkg.Ann")
        .with_argument("y", AnnotationArgument::Int(2))
        .with_argument("x", AnnotationArgument::Int(1));

    assert_eq!(a, b);
}

#[test]
fn unknown_tag_is_absent() {
    let strings = StringTable::new();
    let value = ValueRecord {
        tag: 99,
        ..ValueRecord::default()
    };

    assert_eq!(read_annotation_argument(&value, &strings.resolver()), None);
}

#[test]
fn array_drops_unknown_elements() {
    let strings = StringTable::new();
    let int = |v: i64| ValueRecord {
        tag: ValueType::Int.tag(),
        int_value: v,
        ..ValueRecord::default()
    };
    let value = ValueRecord {
        tag: ValueType::Array.tag(),
        array_elements: vec![
            int(1),
            ValueRecord {
                tag: 42,
                ..ValueRecord::default()
            },
            int(3),
        ],
        ..ValueRecord::default()
    };

    let argument = read_annotation_argument(&value, &strings.resolver());

    assert_eq!(
        argument,
        Some(AnnotationArgument::Array(vec![
            AnnotationArgument::Int(1),
            AnnotationArgument::Int(3),
        ]))
    );
}

#[test]
fn char_outside_scalar_range_is_absent() {
    let strings = StringTable::new();
    let value = ValueRecord {
        tag: ValueType::Char.tag(),
        int_value: 0xD800,
        ..ValueRecord::default()
    };

    assert_eq!(read_annotation_argument(&value, &strings.resolver()), None);
}

#[test]
fn annotation_tag_without_payload_is_absent() {
    let strings = StringTable::new();
    let value = ValueRecord {
        tag: ValueType::Annotation.tag(),
        ..ValueRecord::default()
    };

    assert_eq!(read_annotation_argument(&value, &strings.resolver()), None);
}

#[test]
fn undecodable_arguments_are_dropped() {
    let mut strings = StringTable::new();
    let mut record = write_annotation(
        &Annotation::new("pkg.Ann").with_argument("x", AnnotationArgument::Int(7)),
        &mut strings,
    );
    let mut unknown = record.arguments[0].clone();
    unknown.name_id = strings.intern("y");
    unknown.value.tag = 77;
    record.arguments.push(unknown);

    let annotation = read_annotation(&record, &strings.resolver());

    assert_eq!(
        annotation,
        Annotation::new("pkg.Ann").with_argument("x", AnnotationArgument::Int(7))
    );
}
