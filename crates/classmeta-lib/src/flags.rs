//! Bit fields of the flags word carried by every declaration and type.
//!
//! A [`Flag`] names one value of one bit field. Fields shared by all
//! declarations live at the top level; the rest are grouped by the node they
//! apply to. The same bit can mean different things for different nodes, so
//! a flag is only meaningful against the flags of its own node.

use classmeta_codec::Flags;

/// One value of a bit field inside a flags word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Flag {
    offset: u32,
    width: u32,
    value: u32,
}

impl Flag {
    pub const fn new(offset: u32, width: u32, value: u32) -> Self {
        Self {
            offset,
            width,
            value,
        }
    }

    const fn mask(self) -> u32 {
        (1 << self.width) - 1
    }

    /// Whether the field of `flags` holds this flag's value.
    pub const fn is_set(self, flags: Flags) -> bool {
        (flags >> self.offset) & self.mask() == self.value
    }

    /// `flags` with this flag's field overwritten.
    pub const fn apply(self, flags: Flags) -> Flags {
        (flags & !(self.mask() << self.offset)) | (self.value << self.offset)
    }
}

/// Combine flags into a flags word. Later flags overwrite the fields of
/// earlier ones.
pub fn flags_of(flags: &[Flag]) -> Flags {
    flags.iter().fold(0, |acc, flag| flag.apply(acc))
}

pub const HAS_ANNOTATIONS: Flag = Flag::new(0, 1, 1);

pub const IS_INTERNAL: Flag = Flag::new(1, 3, 0);
pub const IS_PRIVATE: Flag = Flag::new(1, 3, 1);
pub const IS_PROTECTED: Flag = Flag::new(1, 3, 2);
pub const IS_PUBLIC: Flag = Flag::new(1, 3, 3);
pub const IS_PRIVATE_TO_THIS: Flag = Flag::new(1, 3, 4);
pub const IS_LOCAL: Flag = Flag::new(1, 3, 5);

pub const IS_FINAL: Flag = Flag::new(4, 2, 0);
pub const IS_OPEN: Flag = Flag::new(4, 2, 1);
pub const IS_ABSTRACT: Flag = Flag::new(4, 2, 2);
pub const IS_SEALED: Flag = Flag::new(4, 2, 3);

pub mod class {
    use super::Flag;

    pub const IS_CLASS: Flag = Flag::new(6, 3, 0);
    pub const IS_INTERFACE: Flag = Flag::new(6, 3, 1);
    pub const IS_ENUM_CLASS: Flag = Flag::new(6, 3, 2);
    pub const IS_ENUM_ENTRY: Flag = Flag::new(6, 3, 3);
    pub const IS_ANNOTATION_CLASS: Flag = Flag::new(6, 3, 4);
    pub const IS_OBJECT: Flag = Flag::new(6, 3, 5);
    pub const IS_COMPANION_OBJECT: Flag = Flag::new(6, 3, 6);

    pub const IS_INNER: Flag = Flag::new(9, 1, 1);
    pub const IS_DATA: Flag = Flag::new(10, 1, 1);
    pub const IS_EXTERNAL: Flag = Flag::new(11, 1, 1);
    pub const IS_EXPECT: Flag = Flag::new(12, 1, 1);
    pub const IS_INLINE: Flag = Flag::new(13, 1, 1);
}

pub mod constructor {
    use super::Flag;

    pub const IS_PRIMARY: Flag = Flag::new(4, 1, 0);
    pub const IS_SECONDARY: Flag = Flag::new(4, 1, 1);
}

pub mod function {
    use super::Flag;

    pub const IS_DECLARATION: Flag = Flag::new(6, 2, 0);
    pub const IS_FAKE_OVERRIDE: Flag = Flag::new(6, 2, 1);
    pub const IS_DELEGATION: Flag = Flag::new(6, 2, 2);
    pub const IS_SYNTHESIZED: Flag = Flag::new(6, 2, 3);

    pub const IS_OPERATOR: Flag = Flag::new(8, 1, 1);
    pub const IS_INFIX: Flag = Flag::new(9, 1, 1);
    pub const IS_INLINE: Flag = Flag::new(10, 1, 1);
    pub const IS_TAILREC: Flag = Flag::new(11, 1, 1);
    pub const IS_EXTERNAL: Flag = Flag::new(12, 1, 1);
    pub const IS_SUSPEND: Flag = Flag::new(13, 1, 1);
    pub const IS_EXPECT: Flag = Flag::new(14, 1, 1);
}

pub mod property {
    use super::Flag;

    pub const IS_DECLARATION: Flag = Flag::new(6, 2, 0);
    pub const IS_FAKE_OVERRIDE: Flag = Flag::new(6, 2, 1);
    pub const IS_DELEGATION: Flag = Flag::new(6, 2, 2);
    pub const IS_SYNTHESIZED: Flag = Flag::new(6, 2, 3);

    pub const IS_VAR: Flag = Flag::new(8, 1, 1);
    pub const HAS_GETTER: Flag = Flag::new(9, 1, 1);
    pub const HAS_SETTER: Flag = Flag::new(10, 1, 1);
    pub const IS_CONST: Flag = Flag::new(11, 1, 1);
    pub const IS_LATEINIT: Flag = Flag::new(12, 1, 1);
    pub const HAS_CONSTANT: Flag = Flag::new(13, 1, 1);
    pub const IS_EXTERNAL: Flag = Flag::new(14, 1, 1);
    pub const IS_DELEGATED: Flag = Flag::new(15, 1, 1);
    pub const IS_EXPECT: Flag = Flag::new(16, 1, 1);
}

pub mod property_accessor {
    use super::Flag;

    pub const IS_NOT_DEFAULT: Flag = Flag::new(6, 1, 1);
    pub const IS_EXTERNAL: Flag = Flag::new(7, 1, 1);
    pub const IS_INLINE: Flag = Flag::new(8, 1, 1);
}

pub mod value_parameter {
    use super::Flag;

    pub const DECLARES_DEFAULT_VALUE: Flag = Flag::new(1, 1, 1);
    pub const IS_CROSSINLINE: Flag = Flag::new(2, 1, 1);
    pub const IS_NOINLINE: Flag = Flag::new(3, 1, 1);
}

pub mod type_parameter {
    use super::Flag;

    pub const IS_REIFIED: Flag = Flag::new(0, 1, 1);
}

/// Flags of a type use.
pub mod ty {
    use super::Flag;

    pub const IS_NULLABLE: Flag = Flag::new(0, 1, 1);
    pub const IS_SUSPEND: Flag = Flag::new(1, 1, 1);
}
