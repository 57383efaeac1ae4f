//! Reading, writing and printing of the compiler metadata attached to class
//! files.
//!
//! A [`Metadata`] envelope is decoded by [`ClassFile::read`] into one of a
//! closed set of variants. Each variant can replay its content into a visitor
//! (see [`visitor`]); the writers in [`class_file`] are visitors that build a
//! fresh envelope from the events they receive. The [`printer`] module renders
//! any variant as human-readable text.
//!
//! Module files, which list the package parts of a whole module, are handled
//! by [`ModuleMapping`] and [`ModuleFile`].

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod annotation;
pub mod class_file;
mod config;
pub mod flags;
mod metadata;
mod module_file;
mod module_mapping;
pub mod printer;
mod read;
mod version;
pub mod visitor;
mod write;

#[cfg(test)]
mod annotation_tests;
#[cfg(test)]
mod class_file_tests;
#[cfg(test)]
mod flags_tests;
#[cfg(test)]
mod metadata_tests;

pub use annotation::{Annotation, AnnotationArgument};
pub use class_file::{ClassFile, InconsistentMetadataError, WriteOptions};
pub use config::DeserializationConfig;
pub use flags::{Flag, flags_of};
pub use metadata::{
    CLASS_KIND, COMPATIBLE_BYTECODE_VERSION, COMPATIBLE_METADATA_VERSION, FILE_FACADE_KIND,
    MULTI_FILE_CLASS_FACADE_KIND, MULTI_FILE_CLASS_PART_KIND, Metadata, SYNTHETIC_CLASS_KIND,
};
pub use module_file::{ModuleFile, ModuleFileWriter};
pub use module_mapping::{ModuleMapping, ModuleMappingError, PackageParts};
pub use version::MetadataVersion;

pub use classmeta_codec::{Flags, Variance};
