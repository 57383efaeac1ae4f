//! Unit tests for StringTable and NameResolver.

use super::string_table::{NameResolver, StringId, StringTable, StringTableTypes};
use super::CodecError;

#[test]
fn intern_twice_returns_same_id() {
    let mut table = StringTable::new();

    let id1 = table.intern("hello");
    let id2 = table.intern("hello");

    assert_eq!(id1, id2);
    assert_eq!(table.len(), 1);
}

#[test]
fn intern_different_strings_returns_different_ids() {
    let mut table = StringTable::new();

    let id1 = table.intern("hello");
    let id2 = table.intern("world");

    assert_ne!(id1, id2);
    assert_eq!(table.get(id2), "world");
}

#[test]
fn local_class_name_is_kept_apart_from_plain_string() {
    let mut table = StringTable::new();

    let plain = table.intern("Foo");
    let local = table.intern_class_name(".Foo");

    assert_ne!(plain, local);
    assert_eq!(table.len(), 2);

    let (types, strings) = table.serialize();
    assert_eq!(types.local_names, vec![local.get()]);
    assert_eq!(strings, vec!["Foo".to_string(), "Foo".to_string()]);
}

#[test]
fn resolver_renders_local_class_with_dot() {
    let mut table = StringTable::new();
    let global = table.intern_class_name("pkg.Foo");
    let local = table.intern_class_name(".pkg.Bar");

    let resolver = table.resolver();

    assert_eq!(resolver.qualified_class_name(global), "pkg.Foo");
    assert_eq!(resolver.qualified_class_name(local), ".pkg.Bar");
    assert_eq!(resolver.string(local), "pkg.Bar");
    assert!(resolver.is_local_class_name(local));
    assert!(!resolver.is_local_class_name(global));
}

#[test]
fn check_rejects_out_of_range_id() {
    let resolver = NameResolver::new(StringTableTypes::default(), vec!["a".into()]).unwrap();

    assert!(resolver.check(StringId(0)).is_ok());
    let err = resolver.check(StringId(1)).unwrap_err();
    assert!(matches!(
        err,
        CodecError::StringIdOutOfRange { id: 1, len: 1 }
    ));
}

#[test]
fn new_rejects_local_name_outside_table() {
    let types = StringTableTypes {
        local_names: vec![3],
    };

    let err = NameResolver::new(types, vec!["a".into()]).unwrap_err();

    assert_eq!(
        err.to_string(),
        "string id 3 out of range (table has 1 entries)"
    );
}
