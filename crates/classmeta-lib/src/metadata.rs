//! The raw metadata envelope attached to a class file.

use serde::{Deserialize, Serialize};

/// A class with a class record.
pub const CLASS_KIND: i32 = 1;
/// A file facade: top-level declarations of one source file.
pub const FILE_FACADE_KIND: i32 = 2;
/// A synthetic class; a lambda when it carries a function record.
pub const SYNTHETIC_CLASS_KIND: i32 = 3;
/// The facade that joins several multi-file class parts.
pub const MULTI_FILE_CLASS_FACADE_KIND: i32 = 4;
/// One part of a multi-file class.
pub const MULTI_FILE_CLASS_PART_KIND: i32 = 5;

/// Metadata version written by default.
pub const COMPATIBLE_METADATA_VERSION: [i32; 3] = [1, 1, 16];
/// Bytecode interface version written by default.
pub const COMPATIBLE_BYTECODE_VERSION: [i32; 3] = [1, 0, 3];

const MULTI_FILE_PARTS_INHERIT_FACADE_BIT: i32 = 1 << 0;
const PRE_RELEASE_BIT: i32 = 1 << 1;
const SCRIPT_BIT: i32 = 1 << 2;

/// Metadata envelope as stored in the class file annotation.
///
/// Which fields are meaningful depends on `kind`; the others are ignored.
/// Serializes under the annotation's short attribute names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "k")]
    pub kind: i32,
    #[serde(rename = "mv", default)]
    pub metadata_version: Vec<i32>,
    #[serde(rename = "bv", default)]
    pub bytecode_version: Vec<i32>,
    #[serde(rename = "d1", default)]
    pub data1: Vec<String>,
    #[serde(rename = "d2", default)]
    pub data2: Vec<String>,
    #[serde(rename = "xs", default)]
    pub extra_string: String,
    #[serde(rename = "pn", default)]
    pub package_name: String,
    #[serde(rename = "xi", default)]
    pub extra_int: i32,
}

impl Metadata {
    /// Multi-file class parts compiled with this flag inherit from their facade.
    pub fn multi_file_parts_inherit_facade(&self) -> bool {
        self.extra_int & MULTI_FILE_PARTS_INHERIT_FACADE_BIT != 0
    }

    /// The producing compiler was a pre-release build.
    pub fn is_pre_release(&self) -> bool {
        self.extra_int & PRE_RELEASE_BIT != 0
    }

    pub fn is_script(&self) -> bool {
        self.extra_int & SCRIPT_BIT != 0
    }
}
