//! Annotations with constant arguments, and their conversion to and from
//! records.

use classmeta_codec::{
    AnnotationRecord, ArgumentRecord, NameResolver, StringTable, ValueRecord, ValueType,
};
use indexmap::IndexMap;

/// An annotation on a declaration or type.
///
/// Equality does not depend on argument order.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// Qualified class name; a leading `.` marks a local class.
    pub class_name: String,
    pub arguments: IndexMap<String, AnnotationArgument>,
}

impl Annotation {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            arguments: IndexMap::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: AnnotationArgument) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }
}

/// Constant value of an annotation argument.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationArgument {
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
    /// Reference to a class, by qualified name.
    KClass(String),
    Enum {
        class_name: String,
        entry_name: String,
    },
    Annotation(Annotation),
    Array(Vec<AnnotationArgument>),
}

/// Decode an annotation. Arguments whose value cannot be decoded are dropped.
pub fn read_annotation(record: &AnnotationRecord, names: &NameResolver) -> Annotation {
    let arguments = record
        .arguments
        .iter()
        .filter_map(|arg| {
            let value = read_annotation_argument(&arg.value, names)?;
            Some((names.string(arg.name_id).to_string(), value))
        })
        .collect();

    Annotation {
        class_name: names.qualified_class_name(record.id),
        arguments,
    }
}

/// Decode one argument value; `None` for an unrecognized tag.
///
/// Array elements that cannot be decoded are dropped.
pub fn read_annotation_argument(
    value: &ValueRecord,
    names: &NameResolver,
) -> Option<AnnotationArgument> {
    let argument = match value.value_type()? {
        ValueType::Byte => AnnotationArgument::Byte(value.int_value as i8),
        ValueType::Char => {
            let c = u32::try_from(value.int_value).ok().and_then(char::from_u32)?;
            AnnotationArgument::Char(c)
        }
        ValueType::Short => AnnotationArgument::Short(value.int_value as i16),
        ValueType::Int => AnnotationArgument::Int(value.int_value as i32),
        ValueType::Long => AnnotationArgument::Long(value.int_value),
        ValueType::Float => AnnotationArgument::Float(value.float_value),
        ValueType::Double => AnnotationArgument::Double(value.double_value),
        ValueType::Boolean => AnnotationArgument::Boolean(value.int_value != 0),
        ValueType::String => {
            AnnotationArgument::String(names.string(value.string_value).to_string())
        }
        ValueType::Class => AnnotationArgument::KClass(names.qualified_class_name(value.class_id)),
        ValueType::Enum => AnnotationArgument::Enum {
            class_name: names.qualified_class_name(value.class_id),
            entry_name: names.string(value.enum_value_id).to_string(),
        },
        ValueType::Annotation => {
            AnnotationArgument::Annotation(read_annotation(value.annotation.as_deref()?, names))
        }
        ValueType::Array => AnnotationArgument::Array(
            value
                .array_elements
                .iter()
                .filter_map(|element| read_annotation_argument(element, names))
                .collect(),
        ),
    };
    Some(argument)
}

/// Encode an annotation, interning its names into `strings`.
pub fn write_annotation(annotation: &Annotation, strings: &mut StringTable) -> AnnotationRecord {
    let id = strings.intern_class_name(&annotation.class_name);
    let arguments = annotation
        .arguments
        .iter()
        .map(|(name, value)| ArgumentRecord {
            name_id: strings.intern(name),
            value: write_annotation_argument(value, strings),
        })
        .collect();

    AnnotationRecord { id, arguments }
}

fn write_annotation_argument(
    argument: &AnnotationArgument,
    strings: &mut StringTable,
) -> ValueRecord {
    let mut value = ValueRecord::default();
    let ty = match argument {
        AnnotationArgument::Byte(v) => {
            value.int_value = i64::from(*v);
            ValueType::Byte
        }
        AnnotationArgument::Char(c) => {
            value.int_value = i64::from(u32::from(*c));
            ValueType::Char
        }
        AnnotationArgument::Short(v) => {
            value.int_value = i64::from(*v);
            ValueType::Short
        }
        AnnotationArgument::Int(v) => {
            value.int_value = i64::from(*v);
            ValueType::Int
        }
        AnnotationArgument::Long(v) => {
            value.int_value = *v;
            ValueType::Long
        }
        AnnotationArgument::Float(v) => {
            value.float_value = *v;
            ValueType::Float
        }
        AnnotationArgument::Double(v) => {
            value.double_value = *v;
            ValueType::Double
        }
        AnnotationArgument::Boolean(v) => {
            value.int_value = i64::from(*v);
            ValueType::Boolean
        }
        AnnotationArgument::String(s) => {
            value.string_value = strings.intern(s);
            ValueType::String
        }
        AnnotationArgument::KClass(name) => {
            value.class_id = strings.intern_class_name(name);
            ValueType::Class
        }
        AnnotationArgument::Enum {
            class_name,
            entry_name,
        } => {
            value.class_id = strings.intern_class_name(class_name);
            value.enum_value_id = strings.intern(entry_name);
            ValueType::Enum
        }
        AnnotationArgument::Annotation(nested) => {
            value.annotation = Some(Box::new(write_annotation(nested, strings)));
            ValueType::Annotation
        }
        AnnotationArgument::Array(elements) => {
            value.array_elements = elements
                .iter()
                .map(|element| write_annotation_argument(element, strings))
                .collect();
            ValueType::Array
        }
    };
    value.tag = ty.tag();
    value
}
