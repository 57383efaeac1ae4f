//! Raw record of a module file.
//!
//! Layout: a big-endian `i32` count, that many big-endian `i32` version
//! components, then the postcard-encoded [`ModuleRecord`].

use serde::{Deserialize, Serialize};

use crate::{CodecError, StringId};

/// Parts of one package as stored in a module file.
///
/// Class names are short (relative to the package). A part whose entry in
/// `multifile_facade_short_name_ids` is non-zero belongs to the multi-file
/// facade at that 1-based index of `multifile_facade_short_names`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagePartsRecord {
    pub package_fq_name: String,
    pub short_class_names: Vec<String>,
    pub multifile_facade_short_name_ids: Vec<u32>,
    pub multifile_facade_short_names: Vec<String>,
    /// Parts compiled into a JVM package that differs from `package_fq_name`.
    pub class_with_jvm_package_name_short_names: Vec<String>,
    /// Index into [`ModuleRecord::jvm_package_names`] per entry above; a
    /// shorter list repeats its last id.
    pub class_with_jvm_package_name_package_ids: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub package_parts: Vec<PackagePartsRecord>,
    pub metadata_parts: Vec<PackagePartsRecord>,
    pub jvm_package_names: Vec<String>,
    pub string_table: Vec<String>,
    /// Qualified class names of module annotations.
    pub annotations: Vec<StringId>,
}

/// Encode a module file.
pub fn encode_module(version: &[i32], record: &ModuleRecord) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(4 + version.len() * 4);
    bytes.extend_from_slice(&(version.len() as i32).to_be_bytes());
    for part in version {
        bytes.extend_from_slice(&part.to_be_bytes());
    }
    bytes.extend(postcard::to_allocvec(record).expect("serialization should not fail"));
    bytes
}

/// Split a module file into its version and the undecoded record bytes.
pub fn decode_module_version(bytes: &[u8]) -> Result<(Vec<i32>, &[u8]), CodecError> {
    let count = read_i32_be(bytes, 0)?;
    if count < 0 {
        return Err(CodecError::NegativeLength(count));
    }

    let count = count as usize;
    let needed = 4 + count.saturating_mul(4);
    if bytes.len() < needed {
        return Err(CodecError::Truncated {
            needed,
            actual: bytes.len(),
        });
    }

    let version = (0..count)
        .map(|i| read_i32_be(bytes, 4 + i * 4))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((version, &bytes[needed..]))
}

/// Decode the record part of a module file.
pub fn decode_module(bytes: &[u8]) -> Result<ModuleRecord, CodecError> {
    let (record, rest) = postcard::take_from_bytes::<ModuleRecord>(bytes)?;
    if !rest.is_empty() {
        return Err(CodecError::TrailingBytes(rest.len()));
    }
    Ok(record)
}

fn read_i32_be(bytes: &[u8], offset: usize) -> Result<i32, CodecError> {
    let chunk = bytes
        .get(offset..offset + 4)
        .ok_or(CodecError::Truncated {
            needed: offset + 4,
            actual: bytes.len(),
        })?;
    Ok(i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}
