//! Visitor traits for walking decoded metadata.
//!
//! A variant's `accept` drives a visitor through its content in a fixed
//! order. Every method has a no-op default, so a visitor implements only what
//! it needs. Methods that open a child node return the visitor for that
//! child; returning `None` skips the whole subtree.
//!
//! Orders:
//! - class: `visit`, type parameters, supertypes, constructors, functions,
//!   properties, type aliases, companion object, nested classes, enum
//!   entries, sealed subclasses, `visit_end`
//! - function: receiver type, type parameters, value parameters, return type
//! - property: receiver type, type parameters, setter parameter, return type
//! - type alias: type parameters, underlying type, expanded type, annotations
//! - type: classifier, arguments, abbreviated type, outer type, flexible
//!   upper bound
//!
//! Every node ends with `visit_end` after its children.

use classmeta_codec::{Flags, Variance};
use indexmap::IndexMap;

use crate::Annotation;

/// Platform data attached to a function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionExt {
    /// JVM method signature, `name(params)ret`.
    pub signature: Option<String>,
}

/// Platform data attached to a constructor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstructorExt {
    pub signature: Option<String>,
}

/// Platform data attached to a property.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyExt {
    /// Backing field name and descriptor.
    pub field_name: Option<String>,
    pub field_type: Option<String>,
    pub getter_signature: Option<String>,
    pub setter_signature: Option<String>,
    /// Method holding the property's annotations.
    pub synthetic_method_for_annotations: Option<String>,
}

/// Platform data attached to a type parameter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeParameterExt {
    pub annotations: Vec<Annotation>,
}

/// Platform data attached to a type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeExt {
    pub annotations: Vec<Annotation>,
    /// Raw use of a generic class.
    pub is_raw: bool,
}

/// Declarations shared by classes and packages.
pub trait DeclarationContainerVisitor {
    fn visit_function(
        &mut self,
        _flags: Flags,
        _name: &str,
        _ext: &FunctionExt,
    ) -> Option<Box<dyn FunctionVisitor + '_>> {
        None
    }

    fn visit_property(
        &mut self,
        _flags: Flags,
        _name: &str,
        _getter_flags: Flags,
        _setter_flags: Flags,
        _ext: &PropertyExt,
    ) -> Option<Box<dyn PropertyVisitor + '_>> {
        None
    }

    fn visit_type_alias(
        &mut self,
        _flags: Flags,
        _name: &str,
    ) -> Option<Box<dyn TypeAliasVisitor + '_>> {
        None
    }
}

pub trait ClassVisitor: DeclarationContainerVisitor {
    /// Flags and qualified name of the class.
    fn visit(&mut self, _flags: Flags, _name: &str) {}

    fn visit_type_parameter(
        &mut self,
        _flags: Flags,
        _name: &str,
        _id: u32,
        _variance: Variance,
        _ext: &TypeParameterExt,
    ) -> Option<Box<dyn TypeParameterVisitor + '_>> {
        None
    }

    fn visit_supertype(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_constructor(
        &mut self,
        _flags: Flags,
        _ext: &ConstructorExt,
    ) -> Option<Box<dyn ConstructorVisitor + '_>> {
        None
    }

    /// Simple name of the companion object.
    fn visit_companion_object(&mut self, _name: &str) {}

    /// Simple name of a nested class.
    fn visit_nested_class(&mut self, _name: &str) {}

    fn visit_enum_entry(&mut self, _name: &str) {}

    /// Qualified name of a direct subclass of a sealed class.
    fn visit_sealed_subclass(&mut self, _name: &str) {}

    fn visit_end(&mut self) {}
}

/// Top-level declarations of a file facade or multi-file class part.
pub trait PackageVisitor: DeclarationContainerVisitor {
    fn visit_end(&mut self) {}
}

pub trait LambdaVisitor {
    fn visit_function(
        &mut self,
        _flags: Flags,
        _name: &str,
        _ext: &FunctionExt,
    ) -> Option<Box<dyn FunctionVisitor + '_>> {
        None
    }

    fn visit_end(&mut self) {}
}

pub trait ConstructorVisitor {
    fn visit_value_parameter(
        &mut self,
        _flags: Flags,
        _name: &str,
    ) -> Option<Box<dyn ValueParameterVisitor + '_>> {
        None
    }

    fn visit_end(&mut self) {}
}

pub trait FunctionVisitor {
    fn visit_receiver_parameter_type(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_type_parameter(
        &mut self,
        _flags: Flags,
        _name: &str,
        _id: u32,
        _variance: Variance,
        _ext: &TypeParameterExt,
    ) -> Option<Box<dyn TypeParameterVisitor + '_>> {
        None
    }

    fn visit_value_parameter(
        &mut self,
        _flags: Flags,
        _name: &str,
    ) -> Option<Box<dyn ValueParameterVisitor + '_>> {
        None
    }

    fn visit_return_type(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_end(&mut self) {}
}

pub trait PropertyVisitor {
    fn visit_receiver_parameter_type(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_type_parameter(
        &mut self,
        _flags: Flags,
        _name: &str,
        _id: u32,
        _variance: Variance,
        _ext: &TypeParameterExt,
    ) -> Option<Box<dyn TypeParameterVisitor + '_>> {
        None
    }

    fn visit_setter_parameter(
        &mut self,
        _flags: Flags,
        _name: &str,
    ) -> Option<Box<dyn ValueParameterVisitor + '_>> {
        None
    }

    fn visit_return_type(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_end(&mut self) {}
}

pub trait TypeAliasVisitor {
    fn visit_type_parameter(
        &mut self,
        _flags: Flags,
        _name: &str,
        _id: u32,
        _variance: Variance,
        _ext: &TypeParameterExt,
    ) -> Option<Box<dyn TypeParameterVisitor + '_>> {
        None
    }

    fn visit_underlying_type(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_expanded_type(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_annotation(&mut self, _annotation: &Annotation) {}

    fn visit_end(&mut self) {}
}

pub trait TypeVisitor {
    /// Qualified name of the class this type refers to.
    fn visit_class(&mut self, _name: &str) {}

    /// Qualified name of the type alias this type refers to.
    fn visit_type_alias(&mut self, _name: &str) {}

    /// Id of the type parameter this type refers to.
    fn visit_type_parameter(&mut self, _id: u32) {}

    fn visit_argument(
        &mut self,
        _flags: Flags,
        _variance: Variance,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_star_projection(&mut self) {}

    /// The type as written, before type aliases were expanded.
    fn visit_abbreviated_type(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    /// Outer type of an inner class type.
    fn visit_outer_type(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    /// Upper bound of a flexible type; this type is then the lower bound.
    fn visit_flexible_type_upper_bound(
        &mut self,
        _flags: Flags,
        _type_flexibility_id: Option<&str>,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_end(&mut self) {}
}

pub trait TypeParameterVisitor {
    fn visit_upper_bound(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_end(&mut self) {}
}

pub trait ValueParameterVisitor {
    fn visit_type(&mut self, _flags: Flags, _ext: &TypeExt) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    /// Element type of a `vararg` parameter.
    fn visit_vararg_element_type(
        &mut self,
        _flags: Flags,
        _ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        None
    }

    fn visit_end(&mut self) {}
}

/// Content of a module file.
pub trait ModuleVisitor {
    /// One package: internal names of its file facades, and each multi-file
    /// class part mapped to its facade.
    fn visit_package_parts(
        &mut self,
        _fq_name: &str,
        _file_facades: &[String],
        _multi_file_class_parts: &IndexMap<String, String>,
    ) {
    }

    fn visit_annotation(&mut self, _annotation: &Annotation) {}

    fn visit_end(&mut self) {}
}
