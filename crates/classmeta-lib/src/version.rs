//! Metadata version gate.

use crate::metadata::COMPATIBLE_METADATA_VERSION;

/// A dotted version such as `1.1.16`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetadataVersion(Vec<i32>);

impl MetadataVersion {
    pub fn new(parts: impl Into<Vec<i32>>) -> Self {
        Self(parts.into())
    }

    pub fn parts(&self) -> &[i32] {
        &self.0
    }

    /// True iff the version starts with the supported `major.minor`.
    ///
    /// Later components are not compared, so every patch of a supported
    /// minor version is accepted.
    pub fn is_compatible(&self) -> bool {
        match self.0.as_slice() {
            [major, minor, ..] => {
                *major == COMPATIBLE_METADATA_VERSION[0] && *minor == COMPATIBLE_METADATA_VERSION[1]
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for MetadataVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MetadataVersion;

    #[test]
    fn compatible_versions() {
        assert!(MetadataVersion::new([1, 1]).is_compatible());
        assert!(MetadataVersion::new([1, 1, 16]).is_compatible());
        assert!(MetadataVersion::new([1, 1, 99, 7]).is_compatible());
    }

    #[test]
    fn incompatible_versions() {
        assert!(!MetadataVersion::new([]).is_compatible());
        assert!(!MetadataVersion::new([1]).is_compatible());
        assert!(!MetadataVersion::new([1, 0, 16]).is_compatible());
        assert!(!MetadataVersion::new([1, 2, 0]).is_compatible());
        assert!(!MetadataVersion::new([2, 1]).is_compatible());
    }

    #[test]
    fn display_is_dotted() {
        assert_eq!(MetadataVersion::new([1, 1, 16]).to_string(), "1.1.16");
        assert_eq!(MetadataVersion::new([]).to_string(), "");
    }
}
