//! Structural records carried in `d1`.
//!
//! Every name is a [`StringId`] into the accompanying string table. Records
//! are encoded with postcard; field order is part of the wire format.

use std::cell::Cell;

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{CodecError, NameResolver, StringId};

pub type Flags = u32;

/// Deepest nesting of types or annotation values accepted on decode.
pub const MAX_NESTING_DEPTH: usize = 128;

thread_local! {
    static NESTING_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// One level of decode nesting, released on drop.
struct NestingGuard;

impl NestingGuard {
    fn enter() -> Option<Self> {
        NESTING_DEPTH.with(|depth| {
            let current = depth.get();
            if current >= MAX_NESTING_DEPTH {
                return None;
            }
            depth.set(current + 1);
            Some(Self)
        })
    }
}

impl Drop for NestingGuard {
    fn drop(&mut self) {
        NESTING_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Decode a field that can recurse back into its parent record.
fn nested<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let Some(_guard) = NestingGuard::enter() else {
        return Err(D::Error::custom("records nested too deeply"));
    };
    T::deserialize(deserializer)
}

/// Declaration-site or use-site variance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

/// Top-level record of a class envelope.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub flags: Flags,
    pub fq_name: StringId,
    pub type_parameters: Vec<TypeParameterRecord>,
    pub supertypes: Vec<TypeRecord>,
    pub constructors: Vec<ConstructorRecord>,
    pub functions: Vec<FunctionRecord>,
    pub properties: Vec<PropertyRecord>,
    pub type_aliases: Vec<TypeAliasRecord>,
    pub companion_object_name: Option<StringId>,
    pub nested_class_names: Vec<StringId>,
    pub enum_entries: Vec<StringId>,
    pub sealed_subclass_fq_names: Vec<StringId>,
}

/// Top-level record of a file facade or multi-file class part.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub functions: Vec<FunctionRecord>,
    pub properties: Vec<PropertyRecord>,
    pub type_aliases: Vec<TypeAliasRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructorRecord {
    pub flags: Flags,
    pub value_parameters: Vec<ValueParameterRecord>,
    /// Platform method signature, e.g. `<init>(I)V`.
    pub signature: Option<StringId>,
}

/// A function; also the top-level record of a lambda envelope.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub flags: Flags,
    pub name: StringId,
    pub receiver_type: Option<TypeRecord>,
    pub type_parameters: Vec<TypeParameterRecord>,
    pub value_parameters: Vec<ValueParameterRecord>,
    pub return_type: Option<TypeRecord>,
    pub signature: Option<StringId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub flags: Flags,
    pub name: StringId,
    pub getter_flags: Flags,
    pub setter_flags: Flags,
    pub receiver_type: Option<TypeRecord>,
    pub type_parameters: Vec<TypeParameterRecord>,
    pub setter_parameter: Option<ValueParameterRecord>,
    pub return_type: Option<TypeRecord>,
    pub field_name: Option<StringId>,
    pub field_type: Option<StringId>,
    pub getter_signature: Option<StringId>,
    pub setter_signature: Option<StringId>,
    pub synthetic_method_for_annotations: Option<StringId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasRecord {
    pub flags: Flags,
    pub name: StringId,
    pub type_parameters: Vec<TypeParameterRecord>,
    pub underlying_type: Option<TypeRecord>,
    pub expanded_type: Option<TypeRecord>,
    pub annotations: Vec<AnnotationRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeParameterRecord {
    pub flags: Flags,
    pub name: StringId,
    pub id: u32,
    pub variance: Variance,
    pub upper_bounds: Vec<TypeRecord>,
    pub annotations: Vec<AnnotationRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueParameterRecord {
    pub flags: Flags,
    pub name: StringId,
    pub ty: Option<TypeRecord>,
    pub vararg_element_type: Option<TypeRecord>,
}

/// What a type refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classifier {
    /// Qualified class name.
    Class(StringId),
    /// Id of a type parameter in scope.
    TypeParameter(u32),
    /// Qualified type alias name.
    TypeAlias(StringId),
}

impl Default for Classifier {
    fn default() -> Self {
        Self::Class(StringId::default())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub flags: Flags,
    pub classifier: Classifier,
    #[serde(deserialize_with = "nested")]
    pub arguments: Vec<TypeArgumentRecord>,
    #[serde(deserialize_with = "nested")]
    pub abbreviated_type: Option<Box<TypeRecord>>,
    #[serde(deserialize_with = "nested")]
    pub outer_type: Option<Box<TypeRecord>>,
    #[serde(deserialize_with = "nested")]
    pub flexible_upper_bound: Option<Box<TypeRecord>>,
    pub flexibility_id: Option<StringId>,
    pub annotations: Vec<AnnotationRecord>,
    pub is_raw: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TypeArgumentRecord {
    Star,
    Projection { variance: Variance, ty: TypeRecord },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Qualified class name of the annotation.
    pub id: StringId,
    pub arguments: Vec<ArgumentRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgumentRecord {
    pub name_id: StringId,
    pub value: ValueRecord,
}

/// Constant value of an annotation argument.
///
/// `tag` selects which of the other fields are meaningful. Tags this version
/// does not know are carried through untouched and read as "no value".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRecord {
    pub tag: u8,
    pub int_value: i64,
    pub float_value: f32,
    pub double_value: f64,
    pub string_value: StringId,
    pub class_id: StringId,
    pub enum_value_id: StringId,
    #[serde(deserialize_with = "nested")]
    pub annotation: Option<Box<AnnotationRecord>>,
    #[serde(deserialize_with = "nested")]
    pub array_elements: Vec<ValueRecord>,
}

/// Known value tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ValueType {
    Byte = 0,
    Char = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    Boolean = 7,
    String = 8,
    Class = 9,
    Enum = 10,
    Annotation = 11,
    Array = 12,
}

impl ValueType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => Self::Byte,
            1 => Self::Char,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::Boolean,
            8 => Self::String,
            9 => Self::Class,
            10 => Self::Enum,
            11 => Self::Annotation,
            12 => Self::Array,
            _ => return None,
        })
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl ValueRecord {
    /// Known type of this value, `None` for unrecognized tags.
    pub fn value_type(&self) -> Option<ValueType> {
        ValueType::from_tag(self.tag)
    }
}

// ============================================================================
// Id validation
// ============================================================================

/// Verify that every string id reachable from a record is in the table.
///
/// Run once after decoding so that traversal can index the table freely.
pub trait CheckIds {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError>;
}

impl<T: CheckIds> CheckIds for Option<T> {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        match self {
            Some(inner) => inner.check_ids(names),
            None => Ok(()),
        }
    }
}

impl<T: CheckIds> CheckIds for Box<T> {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        (**self).check_ids(names)
    }
}

impl<T: CheckIds> CheckIds for Vec<T> {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.iter().try_for_each(|item| item.check_ids(names))
    }
}

impl CheckIds for StringId {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        names.check(*self)
    }
}

impl CheckIds for ClassRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.fq_name.check_ids(names)?;
        self.type_parameters.check_ids(names)?;
        self.supertypes.check_ids(names)?;
        self.constructors.check_ids(names)?;
        self.functions.check_ids(names)?;
        self.properties.check_ids(names)?;
        self.type_aliases.check_ids(names)?;
        self.companion_object_name.check_ids(names)?;
        self.nested_class_names.check_ids(names)?;
        self.enum_entries.check_ids(names)?;
        self.sealed_subclass_fq_names.check_ids(names)
    }
}

impl CheckIds for PackageRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.functions.check_ids(names)?;
        self.properties.check_ids(names)?;
        self.type_aliases.check_ids(names)
    }
}

impl CheckIds for ConstructorRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.value_parameters.check_ids(names)?;
        self.signature.check_ids(names)
    }
}

impl CheckIds for FunctionRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.name.check_ids(names)?;
        self.receiver_type.check_ids(names)?;
        self.type_parameters.check_ids(names)?;
        self.value_parameters.check_ids(names)?;
        self.return_type.check_ids(names)?;
        self.signature.check_ids(names)
    }
}

impl CheckIds for PropertyRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.name.check_ids(names)?;
        self.receiver_type.check_ids(names)?;
        self.type_parameters.check_ids(names)?;
        self.setter_parameter.check_ids(names)?;
        self.return_type.check_ids(names)?;
        self.field_name.check_ids(names)?;
        self.field_type.check_ids(names)?;
        self.getter_signature.check_ids(names)?;
        self.setter_signature.check_ids(names)?;
        self.synthetic_method_for_annotations.check_ids(names)
    }
}

impl CheckIds for TypeAliasRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.name.check_ids(names)?;
        self.type_parameters.check_ids(names)?;
        self.underlying_type.check_ids(names)?;
        self.expanded_type.check_ids(names)?;
        self.annotations.check_ids(names)
    }
}

impl CheckIds for TypeParameterRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.name.check_ids(names)?;
        self.upper_bounds.check_ids(names)?;
        self.annotations.check_ids(names)
    }
}

impl CheckIds for ValueParameterRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.name.check_ids(names)?;
        self.ty.check_ids(names)?;
        self.vararg_element_type.check_ids(names)
    }
}

impl CheckIds for TypeRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        match self.classifier {
            Classifier::Class(id) | Classifier::TypeAlias(id) => names.check(id)?,
            Classifier::TypeParameter(_) => {}
        }
        self.arguments.check_ids(names)?;
        self.abbreviated_type.check_ids(names)?;
        self.outer_type.check_ids(names)?;
        self.flexible_upper_bound.check_ids(names)?;
        self.flexibility_id.check_ids(names)?;
        self.annotations.check_ids(names)
    }
}

impl CheckIds for TypeArgumentRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        match self {
            Self::Star => Ok(()),
            Self::Projection { ty, .. } => ty.check_ids(names),
        }
    }
}

impl CheckIds for AnnotationRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.id.check_ids(names)?;
        self.arguments.check_ids(names)
    }
}

impl CheckIds for ArgumentRecord {
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        self.name_id.check_ids(names)?;
        self.value.check_ids(names)
    }
}

impl CheckIds for ValueRecord {
    /// Only the fields selected by the tag are checked.
    fn check_ids(&self, names: &NameResolver) -> Result<(), CodecError> {
        match self.value_type() {
            Some(ValueType::String) => names.check(self.string_value),
            Some(ValueType::Class) => names.check(self.class_id),
            Some(ValueType::Enum) => {
                names.check(self.class_id)?;
                names.check(self.enum_value_id)
            }
            Some(ValueType::Annotation) => self.annotation.check_ids(names),
            Some(ValueType::Array) => self.array_elements.check_ids(names),
            _ => Ok(()),
        }
    }
}
