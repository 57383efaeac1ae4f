//! Package parts listed by a module file.

use classmeta_codec::{CodecError, ModuleRecord, decode_module, decode_module_version};
use indexmap::{IndexMap, IndexSet};

use crate::config::DeserializationConfig;
use crate::version::MetadataVersion;

#[derive(Debug, thiserror::Error)]
pub enum ModuleMappingError {
    #[error("corrupted module file {debug_name}")]
    Corrupted {
        debug_name: String,
        #[source]
        source: CodecError,
    },
}

/// Class files that make up one package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageParts {
    package_fq_name: String,
    /// Internal name of each part, with its multi-file facade if it has one.
    parts: IndexMap<String, Option<String>>,
    metadata_parts: IndexSet<String>,
}

impl PackageParts {
    pub fn new(package_fq_name: impl Into<String>) -> Self {
        Self {
            package_fq_name: package_fq_name.into(),
            parts: IndexMap::new(),
            metadata_parts: IndexSet::new(),
        }
    }

    pub fn package_fq_name(&self) -> &str {
        &self.package_fq_name
    }

    /// Internal names of all parts, in insertion order.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Internal name of the multi-file facade `part` belongs to.
    pub fn multifile_facade_name(&self, part: &str) -> Option<&str> {
        self.parts.get(part)?.as_deref()
    }

    pub fn metadata_parts(&self) -> impl Iterator<Item = &str> {
        self.metadata_parts.iter().map(String::as_str)
    }

    pub fn add_part(&mut self, internal_name: String, facade_internal_name: Option<String>) {
        self.parts.insert(internal_name, facade_internal_name);
    }

    pub fn add_metadata_part(&mut self, short_name: String) {
        self.metadata_parts.insert(short_name);
    }
}

/// Package parts of a whole module, keyed by package name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleMapping {
    packages: IndexMap<String, PackageParts>,
    annotations: Vec<String>,
    debug_name: String,
}

impl ModuleMapping {
    pub fn empty(debug_name: impl Into<String>) -> Self {
        Self {
            packages: IndexMap::new(),
            annotations: Vec::new(),
            debug_name: debug_name.into(),
        }
    }

    /// Read a module file.
    ///
    /// Missing input and incompatible versions give an empty mapping.
    pub fn create(
        bytes: Option<&[u8]>,
        debug_name: &str,
        config: &DeserializationConfig,
    ) -> Result<Self, ModuleMappingError> {
        let Some(bytes) = bytes else {
            return Ok(Self::empty(debug_name));
        };
        let mapping = Self::decode(bytes, debug_name, config)?;
        Ok(mapping.unwrap_or_else(|| Self::empty(debug_name)))
    }

    /// Decode a module file; `Ok(None)` if its version is not supported.
    pub(crate) fn decode(
        bytes: &[u8],
        debug_name: &str,
        config: &DeserializationConfig,
    ) -> Result<Option<Self>, ModuleMappingError> {
        let corrupted = |source| ModuleMappingError::Corrupted {
            debug_name: debug_name.to_string(),
            source,
        };

        let (version, rest) = decode_module_version(bytes).map_err(corrupted)?;
        let version = MetadataVersion::new(version);
        if !config.skip_metadata_version_check && !version.is_compatible() {
            tracing::debug!(debug_name, %version, "skipping module file with incompatible version");
            return Ok(None);
        }

        let record = decode_module(rest).map_err(corrupted)?;
        for &id in &record.annotations {
            if id.index() >= record.string_table.len() {
                return Err(corrupted(CodecError::StringIdOutOfRange {
                    id: id.get(),
                    len: record.string_table.len(),
                }));
            }
        }

        Ok(Some(Self::from_record(&record, debug_name, config)))
    }

    /// Build a mapping from a record whose annotation ids are known to be valid.
    pub(crate) fn from_record(
        record: &ModuleRecord,
        debug_name: &str,
        config: &DeserializationConfig,
    ) -> Self {
        let mut packages: IndexMap<String, PackageParts> = IndexMap::new();

        for proto in &record.package_parts {
            let fq_name = &proto.package_fq_name;
            let parts = packages
                .entry(fq_name.clone())
                .or_insert_with(|| PackageParts::new(fq_name.clone()));

            for (index, short_name) in proto.short_class_names.iter().enumerate() {
                let facade = proto
                    .multifile_facade_short_name_ids
                    .get(index)
                    .and_then(|&id| id.checked_sub(1))
                    .and_then(|id| proto.multifile_facade_short_names.get(id as usize))
                    .map(|facade| internal_name_of(fq_name, facade));
                parts.add_part(internal_name_of(fq_name, short_name), facade);
            }

            if config.is_jvm_package_name_supported {
                let package_ids = &proto.class_with_jvm_package_name_package_ids;
                for (index, short_name) in proto
                    .class_with_jvm_package_name_short_names
                    .iter()
                    .enumerate()
                {
                    let Some(&package_id) = package_ids.get(index).or(package_ids.last()) else {
                        continue;
                    };
                    let Some(jvm_package_name) = record.jvm_package_names.get(package_id as usize)
                    else {
                        continue;
                    };
                    parts.add_part(internal_name_of(jvm_package_name, short_name), None);
                }
            }
        }

        for proto in &record.metadata_parts {
            let fq_name = &proto.package_fq_name;
            let parts = packages
                .entry(fq_name.clone())
                .or_insert_with(|| PackageParts::new(fq_name.clone()));
            for short_name in &proto.short_class_names {
                parts.add_metadata_part(short_name.clone());
            }
        }

        let annotations = record
            .annotations
            .iter()
            .filter_map(|id| record.string_table.get(id.index()).cloned())
            .collect();

        Self {
            packages,
            annotations,
            debug_name: debug_name.to_string(),
        }
    }

    pub fn find_package_parts(&self, package_fq_name: &str) -> Option<&PackageParts> {
        self.packages.get(package_fq_name)
    }

    /// Packages in the order they were first listed.
    pub fn packages(&self) -> impl Iterator<Item = &PackageParts> {
        self.packages.values()
    }

    /// Qualified class names of the module's annotations.
    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.annotations.is_empty()
    }
}

impl std::fmt::Display for ModuleMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.debug_name)
    }
}

/// `pkg.name` + `Short` → `pkg/name/Short`.
pub(crate) fn internal_name_of(package_fq_name: &str, short_name: &str) -> String {
    if package_fq_name.is_empty() {
        short_name.to_string()
    } else {
        format!("{}/{short_name}", package_fq_name.replace('.', "/"))
    }
}
