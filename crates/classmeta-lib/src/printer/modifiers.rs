//! Modifier keywords printed for each flag, in printing order.
//!
//! An empty keyword marks the default value of a field: it matches but
//! prints nothing.

use crate::flags::{
    self, Flag, class, constructor, function, property, property_accessor, ty, type_parameter,
    value_parameter,
};

pub type FlagTable = &'static [(Flag, &'static str)];

pub static VISIBILITY_FLAGS: FlagTable = &[
    (flags::IS_INTERNAL, "internal"),
    (flags::IS_PRIVATE, "private"),
    (flags::IS_PRIVATE_TO_THIS, "private"),
    (flags::IS_PROTECTED, "protected"),
    (flags::IS_PUBLIC, "public"),
    (flags::IS_LOCAL, "local"),
];

pub static MODALITY_FLAGS: FlagTable = &[
    (flags::IS_FINAL, "final"),
    (flags::IS_OPEN, "open"),
    (flags::IS_ABSTRACT, "abstract"),
    (flags::IS_SEALED, "sealed"),
];

pub static CLASS_FLAGS: FlagTable = &[
    (class::IS_INNER, "inner"),
    (class::IS_DATA, "data"),
    (class::IS_EXTERNAL, "external"),
    (class::IS_EXPECT, "expect"),
    (class::IS_INLINE, "inline"),
    (class::IS_CLASS, ""),
    (class::IS_INTERFACE, "interface"),
    (class::IS_ENUM_CLASS, "enum class"),
    (class::IS_ENUM_ENTRY, "enum entry"),
    (class::IS_ANNOTATION_CLASS, "annotation class"),
    (class::IS_OBJECT, "object"),
    (class::IS_COMPANION_OBJECT, "companion object"),
];

pub static CONSTRUCTOR_FLAGS: FlagTable = &[(constructor::IS_PRIMARY, "/* primary */")];

pub static FUNCTION_FLAGS: FlagTable = &[
    (function::IS_DECLARATION, ""),
    (function::IS_FAKE_OVERRIDE, "/* fake override */"),
    (function::IS_DELEGATION, "/* delegation */"),
    (function::IS_SYNTHESIZED, "/* synthesized */"),
    (function::IS_OPERATOR, "operator"),
    (function::IS_INFIX, "infix"),
    (function::IS_INLINE, "inline"),
    (function::IS_TAILREC, "tailrec"),
    (function::IS_EXTERNAL, "external"),
    (function::IS_SUSPEND, "suspend"),
    (function::IS_EXPECT, "expect"),
];

pub static PROPERTY_FLAGS: FlagTable = &[
    (property::IS_DECLARATION, ""),
    (property::IS_FAKE_OVERRIDE, "/* fake override */"),
    (property::IS_DELEGATION, "/* delegation */"),
    (property::IS_SYNTHESIZED, "/* synthesized */"),
    (property::IS_CONST, "const"),
    (property::IS_LATEINIT, "lateinit"),
    (property::IS_EXTERNAL, "external"),
    (property::IS_DELEGATED, "/* delegated */"),
    (property::IS_EXPECT, "expect"),
];

pub static PROPERTY_ACCESSOR_FLAGS: FlagTable = &[
    (property_accessor::IS_NOT_DEFAULT, "/* non-default */"),
    (property_accessor::IS_EXTERNAL, "external"),
    (property_accessor::IS_INLINE, "inline"),
];

pub static VALUE_PARAMETER_FLAGS: FlagTable = &[
    (value_parameter::IS_CROSSINLINE, "crossinline"),
    (value_parameter::IS_NOINLINE, "noinline"),
];

pub static TYPE_PARAMETER_FLAGS: FlagTable = &[(type_parameter::IS_REIFIED, "reified")];

pub static TYPE_FLAGS: FlagTable = &[(ty::IS_SUSPEND, "suspend")];

/// Append the keyword of every set flag, each followed by a space.
pub(crate) fn append_flags(out: &mut String, flags: classmeta_codec::Flags, tables: &[FlagTable]) {
    for table in tables {
        for (flag, keyword) in table.iter() {
            if flag.is_set(flags) && !keyword.is_empty() {
                out.push_str(keyword);
                out.push(' ');
            }
        }
    }
}
