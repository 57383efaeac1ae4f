//! Module files: the list of package parts compiled into one module.

use classmeta_codec::{ModuleRecord, PackagePartsRecord, StringId, encode_module};
use indexmap::IndexMap;

use crate::Annotation;
use crate::config::DeserializationConfig;
use crate::module_mapping::{ModuleMapping, ModuleMappingError};
use crate::visitor::ModuleVisitor;

/// A decoded module file.
#[derive(Clone, Debug)]
pub struct ModuleFile {
    bytes: Vec<u8>,
    mapping: ModuleMapping,
}

impl ModuleFile {
    /// Decode a module file; `Ok(None)` if its version is not supported.
    pub fn read(bytes: &[u8]) -> Result<Option<Self>, ModuleMappingError> {
        Self::read_with(bytes, "module file", &DeserializationConfig::default())
    }

    /// Like [`ModuleFile::read`], with explicit options. `debug_name`
    /// identifies the file in errors and logs.
    pub fn read_with(
        bytes: &[u8],
        debug_name: &str,
        config: &DeserializationConfig,
    ) -> Result<Option<Self>, ModuleMappingError> {
        let Some(mapping) = ModuleMapping::decode(bytes, debug_name, config)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            bytes: bytes.to_vec(),
            mapping,
        }))
    }

    /// The encoded file.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mapping(&self) -> &ModuleMapping {
        &self.mapping
    }

    /// Visit each package with its parts split into file facades and
    /// multi-file class parts, then each module annotation.
    pub fn accept(&self, v: &mut dyn ModuleVisitor) {
        for package in self.mapping.packages() {
            let mut file_facades = Vec::new();
            let mut multi_file_class_parts = IndexMap::new();
            for part in package.parts() {
                match package.multifile_facade_name(part) {
                    Some(facade) => {
                        multi_file_class_parts.insert(part.to_string(), facade.to_string());
                    }
                    None => file_facades.push(part.to_string()),
                }
            }
            v.visit_package_parts(
                package.package_fq_name(),
                &file_facades,
                &multi_file_class_parts,
            );
        }

        for class_name in self.mapping.annotations() {
            v.visit_annotation(&Annotation::new(class_name.clone()));
        }

        v.visit_end();
    }
}

/// Builds a [`ModuleFile`] from module visitor events.
#[derive(Debug, Default)]
pub struct ModuleFileWriter {
    t: ModuleRecord,
}

impl ModuleFileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(self, metadata_version: &[i32]) -> ModuleFile {
        let bytes = encode_module(metadata_version, &self.t);
        let mapping = ModuleMapping::from_record(
            &self.t,
            "ModuleFileWriter",
            &DeserializationConfig::default(),
        );
        ModuleFile { bytes, mapping }
    }

    fn add_part(
        &mut self,
        proto: &mut PackagePartsRecord,
        internal_name: &str,
        facade: Option<&str>,
    ) {
        let (package, short_name) = split_internal_name(internal_name);
        let package_fq_name = package.replace('/', ".");

        if package_fq_name != proto.package_fq_name {
            let package_id = index_of_or_insert(&mut self.t.jvm_package_names, &package_fq_name);
            proto
                .class_with_jvm_package_name_short_names
                .push(short_name.to_string());
            proto.class_with_jvm_package_name_package_ids.push(package_id);
            return;
        }

        let facade_id = match facade {
            Some(facade) => {
                let (_, facade_short_name) = split_internal_name(facade);
                index_of_or_insert(&mut proto.multifile_facade_short_names, facade_short_name) + 1
            }
            None => 0,
        };
        proto.short_class_names.push(short_name.to_string());
        proto.multifile_facade_short_name_ids.push(facade_id);
    }
}

impl ModuleVisitor for ModuleFileWriter {
    fn visit_package_parts(
        &mut self,
        fq_name: &str,
        file_facades: &[String],
        multi_file_class_parts: &IndexMap<String, String>,
    ) {
        let mut proto = PackagePartsRecord {
            package_fq_name: fq_name.to_string(),
            ..PackagePartsRecord::default()
        };
        for facade in file_facades {
            self.add_part(&mut proto, facade, None);
        }
        for (part, facade) in multi_file_class_parts {
            self.add_part(&mut proto, part, Some(facade));
        }
        self.t.package_parts.push(proto);
    }

    fn visit_annotation(&mut self, annotation: &Annotation) {
        let id = index_of_or_insert(&mut self.t.string_table, &annotation.class_name);
        self.t.annotations.push(StringId(id));
    }
}

/// `pkg/name/Short` → (`pkg/name`, `Short`).
fn split_internal_name(internal_name: &str) -> (&str, &str) {
    internal_name.rsplit_once('/').unwrap_or(("", internal_name))
}

fn index_of_or_insert(items: &mut Vec<String>, item: &str) -> u32 {
    let index = match items.iter().position(|it| it == item) {
        Some(index) => index,
        None => {
            items.push(item.to_string());
            items.len() - 1
        }
    };
    index as u32
}
