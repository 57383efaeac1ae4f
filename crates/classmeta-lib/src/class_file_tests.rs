use crate::class_file::{
    ClassWriter, FileFacadeWriter, LambdaWriter, MultiFileClassFacadeWriter,
    MultiFileClassPartWriter, SyntheticClassWriter,
};
use crate::flags::{self, class, property};
use crate::visitor::*;
use crate::{
    CLASS_KIND, ClassFile, FILE_FACADE_KIND, Metadata, MULTI_FILE_CLASS_PART_KIND,
    SYNTHETIC_CLASS_KIND, Variance, WriteOptions, flags_of,
};

fn read(metadata: &Metadata) -> ClassFile {
    ClassFile::read(metadata.clone())
        .expect("consistent metadata")
        .expect("supported version")
}

fn class_type(t: Option<Box<dyn TypeVisitor + '_>>, name: &str) {
    let mut t = t.unwrap();
    t.visit_class(name);
    t.visit_end();
}

fn public_final() -> u32 {
    flags_of(&[flags::IS_PUBLIC, flags::IS_FINAL])
}

/// Emits one of every class member, in traversal order.
fn build_class(w: &mut dyn ClassVisitor) {
    w.visit(
        flags_of(&[flags::IS_PUBLIC, flags::IS_ABSTRACT, class::IS_CLASS]),
        "pkg.Foo",
    );

    let mut tp = w
        .visit_type_parameter(0, "T", 0, Variance::In, &TypeParameterExt::default())
        .unwrap();
    class_type(tp.visit_upper_bound(0, &TypeExt::default()), "kotlin.Any");
    tp.visit_end();
    drop(tp);

    class_type(w.visit_supertype(0, &TypeExt::default()), "kotlin.Any");

    let mut c = w
        .visit_constructor(flags_of(&[flags::IS_PUBLIC]), &ConstructorExt::default())
        .unwrap();
    let mut p = c.visit_value_parameter(0, "x").unwrap();
    class_type(p.visit_type(0, &TypeExt::default()), "kotlin.Int");
    p.visit_end();
    drop(p);
    c.visit_end();
    drop(c);

    let ext = FunctionExt {
        signature: Some("f()I".into()),
    };
    let mut f = w.visit_function(public_final(), "f", &ext).unwrap();
    class_type(f.visit_return_type(0, &TypeExt::default()), "kotlin.Int");
    f.visit_end();
    drop(f);

    let flags = flags_of(&[flags::IS_PUBLIC, flags::IS_FINAL, property::HAS_GETTER]);
    let mut pv = w
        .visit_property(flags, "p", public_final(), 0, &PropertyExt::default())
        .unwrap();
    class_type(pv.visit_return_type(0, &TypeExt::default()), "kotlin.Int");
    pv.visit_end();
    drop(pv);

    let mut ta = w.visit_type_alias(flags_of(&[flags::IS_PUBLIC]), "A").unwrap();
    class_type(ta.visit_underlying_type(0, &TypeExt::default()), "kotlin.Int");
    ta.visit_end();
    drop(ta);

    w.visit_companion_object("Companion");
    w.visit_nested_class("Companion");
    w.visit_enum_entry("E");
    w.visit_sealed_subclass("pkg.Sub");
    w.visit_end();
}

#[test]
fn class_roundtrip() {
    let mut w = ClassWriter::new();
    build_class(&mut w);
    let written = w.write(WriteOptions::default());

    let ClassFile::Class(class) = read(written.metadata()) else {
        panic!("expected a class");
    };
    let mut rewriter = ClassWriter::new();
    class.accept(&mut rewriter);
    let rewritten = rewriter.write(WriteOptions::default());

    assert_eq!(rewritten.metadata(), written.metadata());
    assert_eq!(written.metadata().kind, CLASS_KIND);
    assert_eq!(written.metadata().metadata_version, vec![1, 1, 16]);
    assert_eq!(written.metadata().bytecode_version, vec![1, 0, 3]);
}

#[test]
fn file_facade_roundtrip() {
    let mut w = FileFacadeWriter::new();
    let mut f = w
        .visit_function(public_final(), "main", &FunctionExt::default())
        .unwrap();
    class_type(f.visit_return_type(0, &TypeExt::default()), "kotlin.Unit");
    f.visit_end();
    drop(f);
    w.visit_end();
    let written = w.write(WriteOptions::default());

    let ClassFile::FileFacade(facade) = read(written.metadata()) else {
        panic!("expected a file facade");
    };
    let mut rewriter = FileFacadeWriter::new();
    facade.accept(&mut rewriter);

    assert_eq!(written.metadata().kind, FILE_FACADE_KIND);
    assert_eq!(
        rewriter.write(WriteOptions::default()).metadata(),
        written.metadata()
    );
}

#[test]
fn multi_file_class_part_roundtrip() {
    let mut w = MultiFileClassPartWriter::new();
    let mut pv = w
        .visit_property(public_final(), "x", 0, 0, &PropertyExt::default())
        .unwrap();
    class_type(pv.visit_return_type(0, &TypeExt::default()), "kotlin.Long");
    pv.visit_end();
    drop(pv);
    w.visit_end();
    let written = w.write("pkg/BarKt", WriteOptions::default());

    let ClassFile::MultiFileClassPart(part) = read(written.metadata()) else {
        panic!("expected a multi-file class part");
    };
    let mut rewriter = MultiFileClassPartWriter::new();
    part.accept(&mut rewriter);

    assert_eq!(part.facade_class_name(), "pkg/BarKt");
    assert_eq!(written.metadata().kind, MULTI_FILE_CLASS_PART_KIND);
    assert_eq!(written.metadata().extra_string, "pkg/BarKt");
    assert_eq!(
        rewriter
            .write(part.facade_class_name(), WriteOptions::default())
            .metadata(),
        written.metadata()
    );
}

#[test]
fn lambda_roundtrip() {
    let mut w = LambdaWriter::new();
    let mut f = w
        .visit_function(flags_of(&[flags::IS_LOCAL]), "<anonymous>", &FunctionExt::default())
        .unwrap();
    let mut p = f.visit_value_parameter(0, "it").unwrap();
    class_type(p.visit_type(0, &TypeExt::default()), "kotlin.String");
    p.visit_end();
    drop(p);
    f.visit_end();
    drop(f);
    w.visit_end();
    let written = w.write(WriteOptions::default());

    let ClassFile::Lambda(lambda) = read(written.metadata()) else {
        panic!("expected a lambda");
    };
    let mut rewriter = LambdaWriter::new();
    lambda.accept(&mut rewriter);

    assert_eq!(written.metadata().kind, SYNTHETIC_CLASS_KIND);
    assert_eq!(
        rewriter.write(WriteOptions::default()).metadata(),
        written.metadata()
    );
}

#[test]
fn synthetic_class_roundtrip() {
    let written = SyntheticClassWriter::new().write(WriteOptions::default());

    let file = read(written.metadata());

    assert!(matches!(file, ClassFile::SyntheticClass(_)));
    assert_eq!(file.metadata(), written.metadata());
}

#[test]
fn multi_file_class_facade_roundtrip() {
    let parts = vec!["pkg/Bar__AKt".to_string(), "pkg/Bar__BKt".to_string()];
    let written = MultiFileClassFacadeWriter::new().write(parts.clone(), WriteOptions::default());

    let ClassFile::MultiFileClassFacade(facade) = read(written.metadata()) else {
        panic!("expected a multi-file class facade");
    };

    assert_eq!(facade.part_class_names(), parts.as_slice());
    assert_eq!(facade.metadata().data1, parts);
}

#[test]
#[should_panic(expected = "visit_function has not been called")]
fn lambda_writer_without_function_panics() {
    let _ = LambdaWriter::new().write(WriteOptions::default());
}

#[test]
#[should_panic(expected = "visit has not been called")]
fn class_writer_without_visit_panics() {
    let mut w = ClassWriter::new();
    w.visit_function(public_final(), "bar", &FunctionExt::default())
        .unwrap()
        .visit_end();
    w.visit_end();

    let _ = w.write(WriteOptions::default());
}

#[test]
#[should_panic(expected = "type has no classifier")]
fn type_without_classifier_panics() {
    let mut w = FileFacadeWriter::new();
    let mut f = w.visit_function(public_final(), "main", &FunctionExt::default()).unwrap();
    f.visit_return_type(0, &TypeExt::default()).unwrap().visit_end();
}

#[test]
fn write_options_are_stored() {
    let options = WriteOptions {
        metadata_version: vec![1, 1, 5],
        bytecode_version: vec![1, 0, 2],
        extra_int: 0b10,
    };

    let written = SyntheticClassWriter::new().write(options);

    assert_eq!(written.metadata().metadata_version, vec![1, 1, 5]);
    assert_eq!(written.metadata().bytecode_version, vec![1, 0, 2]);
    assert!(written.metadata().is_pre_release());
}

#[test]
fn version_gate() {
    let mut w = ClassWriter::new();
    build_class(&mut w);
    let metadata = w.write(WriteOptions::default()).metadata().clone();
    let with_version = |version: &[i32]| Metadata {
        metadata_version: version.to_vec(),
        ..metadata.clone()
    };

    let accepted: [&[i32]; 3] = [&[1, 1], &[1, 1, 5], &[1, 1, 99]];
    for version in accepted {
        let file = ClassFile::read(with_version(version)).unwrap();
        assert!(matches!(file, Some(ClassFile::Class(_))), "{version:?}");
    }
    let rejected: [&[i32]; 5] = [&[], &[1], &[1, 0, 16], &[1, 2, 0], &[2, 1, 0]];
    for version in rejected {
        let file = ClassFile::read(with_version(version)).unwrap();
        assert!(file.is_none(), "{version:?}");
    }
}

#[test]
fn unknown_kind_keeps_envelope() {
    let metadata = Metadata {
        kind: 42,
        metadata_version: vec![1, 1, 16],
        data1: vec!["ignored".into()],
        ..Metadata::default()
    };

    let file = read(&metadata);

    let ClassFile::Unknown(unknown) = &file else {
        panic!("expected an unknown file");
    };
    assert_eq!(unknown, &metadata);
    assert_eq!(file.metadata(), &metadata);
}

#[test]
fn missing_data1_is_inconsistent() {
    for kind in [CLASS_KIND, FILE_FACADE_KIND, MULTI_FILE_CLASS_PART_KIND] {
        let metadata = Metadata {
            kind,
            metadata_version: vec![1, 1, 16],
            ..Metadata::default()
        };

        let err = ClassFile::read(metadata).unwrap_err();

        assert_eq!(err.message(), "No d1 in metadata");
        assert!(std::error::Error::source(&err).is_none());
    }
}

#[test]
fn undecodable_data1_keeps_codec_error() {
    let metadata = Metadata {
        kind: CLASS_KIND,
        metadata_version: vec![1, 1, 16],
        data1: vec!["\u{0}\u{7f}\u{7f}\u{7f}".into()],
        ..Metadata::default()
    };

    let err = ClassFile::read(metadata).unwrap_err();

    assert_eq!(err.to_string(), "exception occurred when reading metadata");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn field_not_meaningful_for_kind_is_ignored() {
    let written = SyntheticClassWriter::new().write(WriteOptions::default());
    let metadata = Metadata {
        extra_string: "whatever".into(),
        package_name: "pkg".into(),
        data2: vec!["unused".into()],
        ..written.metadata().clone()
    };

    assert!(matches!(read(&metadata), ClassFile::SyntheticClass(_)));
}
