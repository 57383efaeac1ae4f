//! Wire-level codec for class metadata envelopes.
//!
//! This crate contains:
//! - Record definitions for every structural node (class, package, function, ...)
//! - Bit packing of record bytes into the string array stored in an envelope
//! - The string table (producer side) and name resolver (consumer side)
//! - The raw module-file record and its versioned byte layout

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bit_encoding;
mod data;
mod error;
mod module;
mod records;
mod string_table;

#[cfg(test)]
mod data_tests;
#[cfg(test)]
mod module_tests;
#[cfg(test)]
mod string_table_tests;

pub use data::{read_class_data, read_function_data, read_package_data, write_data};
pub use error::CodecError;
pub use module::{
    ModuleRecord, PackagePartsRecord, decode_module, decode_module_version, encode_module,
};
pub use records::{
    AnnotationRecord, ArgumentRecord, CheckIds, ClassRecord, Classifier, ConstructorRecord, Flags,
    FunctionRecord, MAX_NESTING_DEPTH, PackageRecord, PropertyRecord, TypeAliasRecord,
    TypeArgumentRecord, TypeParameterRecord, TypeRecord, ValueParameterRecord, ValueRecord,
    ValueType, Variance,
};
pub use string_table::{NameResolver, StringId, StringTable, StringTableTypes};
