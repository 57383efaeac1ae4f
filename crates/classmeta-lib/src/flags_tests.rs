use crate::flags::{self, Flag, class, constructor, function, flags_of, ty};

#[test]
fn flags_of_empty_is_zero() {
    assert_eq!(flags_of(&[]), 0);
}

#[test]
fn public_final_declaration() {
    let value = flags_of(&[flags::IS_PUBLIC, flags::IS_FINAL, function::IS_DECLARATION]);

    assert_eq!(value, 0b0110);
    assert!(flags::IS_PUBLIC.is_set(value));
    assert!(flags::IS_FINAL.is_set(value));
    assert!(!flags::IS_OPEN.is_set(value));
    assert!(!flags::IS_PRIVATE.is_set(value));
    assert!(function::IS_DECLARATION.is_set(value));
}

#[test]
fn later_flag_overwrites_field() {
    let value = flags_of(&[flags::IS_PRIVATE, flags::IS_LOCAL]);

    assert!(flags::IS_LOCAL.is_set(value));
    assert!(!flags::IS_PRIVATE.is_set(value));
}

#[test]
fn class_kind_field() {
    let value = flags_of(&[
        flags::HAS_ANNOTATIONS,
        flags::IS_PUBLIC,
        flags::IS_ABSTRACT,
        class::IS_INTERFACE,
    ]);

    assert_eq!(value, 0b0110_0111);
    assert!(class::IS_INTERFACE.is_set(value));
    assert!(!class::IS_CLASS.is_set(value));
    assert!(!class::IS_OBJECT.is_set(value));
}

#[test]
fn constructor_primary_is_negation_of_secondary() {
    let primary = flags_of(&[flags::IS_PUBLIC]);
    let secondary = flags_of(&[flags::IS_PUBLIC, constructor::IS_SECONDARY]);

    assert!(constructor::IS_PRIMARY.is_set(primary));
    assert!(!constructor::IS_SECONDARY.is_set(primary));
    assert!(constructor::IS_SECONDARY.is_set(secondary));
    assert!(!constructor::IS_PRIMARY.is_set(secondary));
}

#[test]
fn type_flags_use_low_bits() {
    let value = flags_of(&[ty::IS_NULLABLE, ty::IS_SUSPEND]);

    assert_eq!(value, 0b11);
}

#[test]
fn apply_keeps_other_fields() {
    let flag = Flag::new(8, 1, 1);

    assert_eq!(flag.apply(0b0110), 0b1_0000_0110);
    assert_eq!(Flag::new(1, 3, 0).apply(0b1_0000_0110), 0b1_0000_0000);
}
