//! Conversion between records and the `d1`/`d2` string arrays.
//!
//! `d1` holds the bit-encoded bytes of the postcard-encoded
//! [`StringTableTypes`] immediately followed by the postcard-encoded record.
//! `d2` holds the string table verbatim.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::bit_encoding::{decode_bytes, encode_bytes};
use crate::records::{CheckIds, ClassRecord, FunctionRecord, PackageRecord};
use crate::{CodecError, NameResolver, StringTable, StringTableTypes};

/// Decode the record of a class envelope.
pub fn read_class_data(
    d1: &[String],
    d2: &[String],
) -> Result<(NameResolver, ClassRecord), CodecError> {
    read_data(d1, d2)
}

/// Decode the record of a file facade or multi-file class part envelope.
pub fn read_package_data(
    d1: &[String],
    d2: &[String],
) -> Result<(NameResolver, PackageRecord), CodecError> {
    read_data(d1, d2)
}

/// Decode the record of a lambda envelope.
pub fn read_function_data(
    d1: &[String],
    d2: &[String],
) -> Result<(NameResolver, FunctionRecord), CodecError> {
    read_data(d1, d2)
}

fn read_data<R>(d1: &[String], d2: &[String]) -> Result<(NameResolver, R), CodecError>
where
    R: DeserializeOwned + CheckIds,
{
    let bytes = decode_bytes(d1)?;

    let (types, rest) = postcard::take_from_bytes::<StringTableTypes>(&bytes)?;
    let (record, rest) = postcard::take_from_bytes::<R>(rest)?;
    if !rest.is_empty() {
        return Err(CodecError::TrailingBytes(rest.len()));
    }

    let names = NameResolver::new(types, d2.to_vec())?;
    record.check_ids(&names)?;
    Ok((names, record))
}

/// Encode a record and its string table into `(d1, d2)`.
pub fn write_data<R: Serialize>(record: &R, strings: &StringTable) -> (Vec<String>, Vec<String>) {
    let (types, d2) = strings.serialize();

    let mut bytes = postcard::to_allocvec(&types).expect("serialization should not fail");
    bytes.extend(postcard::to_allocvec(record).expect("serialization should not fail"));

    (encode_bytes(&bytes), d2)
}
