//! Decoded class files and the writers that produce them.
//!
//! [`ClassFile::read`] picks the variant from the envelope's kind. Every
//! variant keeps its envelope; variants with a record also keep the decoded
//! record and its name resolver, and replay them through `accept`.

use classmeta_codec::{
    ClassRecord, CodecError, Flags, FunctionRecord, NameResolver, PackageRecord, StringId, StringTable,
    Variance, read_class_data, read_function_data, read_package_data, write_data,
};

use crate::metadata::{
    CLASS_KIND, COMPATIBLE_BYTECODE_VERSION, COMPATIBLE_METADATA_VERSION, FILE_FACADE_KIND,
    MULTI_FILE_CLASS_FACADE_KIND, MULTI_FILE_CLASS_PART_KIND, Metadata, SYNTHETIC_CLASS_KIND,
};
use crate::read::{accept_class, accept_lambda, accept_package};
use crate::version::MetadataVersion;
use crate::visitor::{
    ClassVisitor, ConstructorExt, ConstructorVisitor, DeclarationContainerVisitor, FunctionExt,
    FunctionVisitor, LambdaVisitor, PackageVisitor, PropertyExt, PropertyVisitor,
    TypeAliasVisitor, TypeExt, TypeParameterExt, TypeParameterVisitor, TypeVisitor,
};
use crate::write::{
    FunctionWriter, write_constructor, write_function, write_property, write_type,
    write_type_alias, write_type_parameter,
};

/// The envelope disagrees with itself, or its record cannot be decoded.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct InconsistentMetadataError {
    message: String,
    #[source]
    source: Option<CodecError>,
}

impl InconsistentMetadataError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    fn codec(source: CodecError) -> Self {
        Self {
            message: "exception occurred when reading metadata".into(),
            source: Some(source),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A decoded envelope.
#[derive(Clone, Debug)]
pub enum ClassFile {
    Class(Class),
    FileFacade(FileFacade),
    /// A synthetic class that holds a lambda.
    Lambda(Lambda),
    SyntheticClass(SyntheticClass),
    MultiFileClassFacade(MultiFileClassFacade),
    MultiFileClassPart(MultiFileClassPart),
    /// A kind this version does not know.
    Unknown(Metadata),
}

impl ClassFile {
    /// Decode an envelope.
    ///
    /// Returns `Ok(None)` when the metadata version is not supported.
    pub fn read(metadata: Metadata) -> Result<Option<Self>, InconsistentMetadataError> {
        let version = MetadataVersion::new(metadata.metadata_version.clone());
        if !version.is_compatible() {
            tracing::debug!(kind = metadata.kind, %version, "unsupported metadata version");
            return Ok(None);
        }

        let file = match metadata.kind {
            CLASS_KIND => {
                let (names, record) = read_class_data(require_data1(&metadata)?, &metadata.data2)
                    .map_err(InconsistentMetadataError::codec)?;
                Self::Class(Class {
                    metadata,
                    record,
                    names,
                })
            }
            FILE_FACADE_KIND => {
                let (names, record) = read_package_data(require_data1(&metadata)?, &metadata.data2)
                    .map_err(InconsistentMetadataError::codec)?;
                Self::FileFacade(FileFacade {
                    metadata,
                    record,
                    names,
                })
            }
            SYNTHETIC_CLASS_KIND if metadata.data1.is_empty() => {
                Self::SyntheticClass(SyntheticClass { metadata })
            }
            SYNTHETIC_CLASS_KIND => {
                let (names, record) = read_function_data(&metadata.data1, &metadata.data2)
                    .map_err(InconsistentMetadataError::codec)?;
                Self::Lambda(Lambda {
                    metadata,
                    record,
                    names,
                })
            }
            MULTI_FILE_CLASS_FACADE_KIND => Self::MultiFileClassFacade(MultiFileClassFacade {
                part_class_names: metadata.data1.clone(),
                metadata,
            }),
            MULTI_FILE_CLASS_PART_KIND => {
                let (names, record) = read_package_data(require_data1(&metadata)?, &metadata.data2)
                    .map_err(InconsistentMetadataError::codec)?;
                Self::MultiFileClassPart(MultiFileClassPart {
                    facade_class_name: metadata.extra_string.clone(),
                    metadata,
                    record,
                    names,
                })
            }
            _ => Self::Unknown(metadata),
        };

        tracing::trace!(
            kind = file.metadata().kind,
            variant = file.variant_name(),
            "decoded class file"
        );
        Ok(Some(file))
    }

    /// The envelope this variant was decoded from or written to.
    pub fn metadata(&self) -> &Metadata {
        match self {
            Self::Class(c) => &c.metadata,
            Self::FileFacade(f) => &f.metadata,
            Self::Lambda(l) => &l.metadata,
            Self::SyntheticClass(s) => &s.metadata,
            Self::MultiFileClassFacade(f) => &f.metadata,
            Self::MultiFileClassPart(p) => &p.metadata,
            Self::Unknown(metadata) => metadata,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Class(_) => "class",
            Self::FileFacade(_) => "file facade",
            Self::Lambda(_) => "lambda",
            Self::SyntheticClass(_) => "synthetic class",
            Self::MultiFileClassFacade(_) => "multi-file class facade",
            Self::MultiFileClassPart(_) => "multi-file class part",
            Self::Unknown(_) => "unknown",
        }
    }
}

fn require_data1(metadata: &Metadata) -> Result<&[String], InconsistentMetadataError> {
    if metadata.data1.is_empty() {
        return Err(InconsistentMetadataError::new("No d1 in metadata"));
    }
    Ok(&metadata.data1)
}

/// Versions and flags written into a new envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    pub metadata_version: Vec<i32>,
    pub bytecode_version: Vec<i32>,
    pub extra_int: i32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            metadata_version: COMPATIBLE_METADATA_VERSION.to_vec(),
            bytecode_version: COMPATIBLE_BYTECODE_VERSION.to_vec(),
            extra_int: 0,
        }
    }
}

impl WriteOptions {
    fn envelope(self, kind: i32, data1: Vec<String>, data2: Vec<String>) -> Metadata {
        Metadata {
            kind,
            metadata_version: self.metadata_version,
            bytecode_version: self.bytecode_version,
            data1,
            data2,
            extra_int: self.extra_int,
            ..Metadata::default()
        }
    }
}

// ============================================================================
// Variants
// ============================================================================

/// A class, interface, object or similar declaration.
#[derive(Clone, Debug)]
pub struct Class {
    metadata: Metadata,
    record: ClassRecord,
    names: NameResolver,
}

impl Class {
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn accept(&self, v: &mut dyn ClassVisitor) {
        accept_class(&self.record, v, &self.names);
    }
}

/// Top-level declarations of one source file.
#[derive(Clone, Debug)]
pub struct FileFacade {
    metadata: Metadata,
    record: PackageRecord,
    names: NameResolver,
}

impl FileFacade {
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn accept(&self, v: &mut dyn PackageVisitor) {
        accept_package(&self.record, v, &self.names);
    }
}

#[derive(Clone, Debug)]
pub struct Lambda {
    metadata: Metadata,
    record: FunctionRecord,
    names: NameResolver,
}

impl Lambda {
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn accept(&self, v: &mut dyn LambdaVisitor) {
        accept_lambda(&self.record, v, &self.names);
    }
}

/// A compiler-generated class without declarations.
#[derive(Clone, Debug)]
pub struct SyntheticClass {
    metadata: Metadata,
}

impl SyntheticClass {
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// The class joining the parts of a multi-file class.
#[derive(Clone, Debug)]
pub struct MultiFileClassFacade {
    metadata: Metadata,
    part_class_names: Vec<String>,
}

impl MultiFileClassFacade {
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Internal names of the parts, in declaration order.
    pub fn part_class_names(&self) -> &[String] {
        &self.part_class_names
    }
}

#[derive(Clone, Debug)]
pub struct MultiFileClassPart {
    metadata: Metadata,
    record: PackageRecord,
    names: NameResolver,
    facade_class_name: String,
}

impl MultiFileClassPart {
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Internal name of the facade this part belongs to.
    pub fn facade_class_name(&self) -> &str {
        &self.facade_class_name
    }

    pub fn accept(&self, v: &mut dyn PackageVisitor) {
        accept_package(&self.record, v, &self.names);
    }
}

// ============================================================================
// Writers
// ============================================================================

/// Builds a [`Class`] from class visitor events.
#[derive(Debug, Default)]
pub struct ClassWriter {
    strings: StringTable,
    t: ClassRecord,
    fq_name: Option<StringId>,
}

impl ClassWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if the class itself was never visited.
    pub fn write(mut self, options: WriteOptions) -> Class {
        let Some(fq_name) = self.fq_name else {
            panic!("visit has not been called");
        };
        self.t.fq_name = fq_name;
        let (data1, data2) = write_data(&self.t, &self.strings);
        Class {
            metadata: options.envelope(CLASS_KIND, data1, data2),
            names: self.strings.resolver(),
            record: self.t,
        }
    }
}

impl DeclarationContainerVisitor for ClassWriter {
    fn visit_function(
        &mut self,
        flags: Flags,
        name: &str,
        ext: &FunctionExt,
    ) -> Option<Box<dyn FunctionVisitor + '_>> {
        write_function(&mut self.strings, &mut self.t.functions, flags, name, ext)
    }

    fn visit_property(
        &mut self,
        flags: Flags,
        name: &str,
        getter_flags: Flags,
        setter_flags: Flags,
        ext: &PropertyExt,
    ) -> Option<Box<dyn PropertyVisitor + '_>> {
        write_property(
            &mut self.strings,
            &mut self.t.properties,
            flags,
            name,
            (getter_flags, setter_flags),
            ext,
        )
    }

    fn visit_type_alias(
        &mut self,
        flags: Flags,
        name: &str,
    ) -> Option<Box<dyn TypeAliasVisitor + '_>> {
        write_type_alias(&mut self.strings, &mut self.t.type_aliases, flags, name)
    }
}

impl ClassVisitor for ClassWriter {
    fn visit(&mut self, flags: Flags, name: &str) {
        self.t.flags = flags;
        self.fq_name = Some(self.strings.intern_class_name(name));
    }

    fn visit_type_parameter(
        &mut self,
        flags: Flags,
        name: &str,
        id: u32,
        variance: Variance,
        ext: &TypeParameterExt,
    ) -> Option<Box<dyn TypeParameterVisitor + '_>> {
        write_type_parameter(
            &mut self.strings,
            &mut self.t.type_parameters,
            flags,
            name,
            (id, variance),
            ext,
        )
    }

    fn visit_supertype(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let supertypes = &mut self.t.supertypes;
        write_type(&mut self.strings, flags, ext, move |t| supertypes.push(t))
    }

    fn visit_constructor(
        &mut self,
        flags: Flags,
        ext: &ConstructorExt,
    ) -> Option<Box<dyn ConstructorVisitor + '_>> {
        write_constructor(&mut self.strings, &mut self.t.constructors, flags, ext)
    }

    fn visit_companion_object(&mut self, name: &str) {
        self.t.companion_object_name = Some(self.strings.intern(name));
    }

    fn visit_nested_class(&mut self, name: &str) {
        let id = self.strings.intern(name);
        self.t.nested_class_names.push(id);
    }

    fn visit_enum_entry(&mut self, name: &str) {
        let id = self.strings.intern(name);
        self.t.enum_entries.push(id);
    }

    fn visit_sealed_subclass(&mut self, name: &str) {
        let id = self.strings.intern_class_name(name);
        self.t.sealed_subclass_fq_names.push(id);
    }
}

/// Defines a writer that builds a package record from package visitor events.
macro_rules! package_writer {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Default)]
        pub struct $name {
            strings: StringTable,
            t: PackageRecord,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            fn finish(self) -> (Vec<String>, Vec<String>, PackageRecord, NameResolver) {
                let (data1, data2) = write_data(&self.t, &self.strings);
                (data1, data2, self.t, self.strings.resolver())
            }
        }

        impl DeclarationContainerVisitor for $name {
            fn visit_function(
                &mut self,
                flags: Flags,
                name: &str,
                ext: &FunctionExt,
            ) -> Option<Box<dyn FunctionVisitor + '_>> {
                write_function(&mut self.strings, &mut self.t.functions, flags, name, ext)
            }

            fn visit_property(
                &mut self,
                flags: Flags,
                name: &str,
                getter_flags: Flags,
                setter_flags: Flags,
                ext: &PropertyExt,
            ) -> Option<Box<dyn PropertyVisitor + '_>> {
                write_property(
                    &mut self.strings,
                    &mut self.t.properties,
                    flags,
                    name,
                    (getter_flags, setter_flags),
                    ext,
                )
            }

            fn visit_type_alias(
                &mut self,
                flags: Flags,
                name: &str,
            ) -> Option<Box<dyn TypeAliasVisitor + '_>> {
                write_type_alias(&mut self.strings, &mut self.t.type_aliases, flags, name)
            }
        }

        impl PackageVisitor for $name {}
    };
}

package_writer!(
    /// Builds a [`FileFacade`] from package visitor events.
    FileFacadeWriter
);

package_writer!(
    /// Builds a [`MultiFileClassPart`] from package visitor events.
    MultiFileClassPartWriter
);

impl FileFacadeWriter {
    pub fn write(self, options: WriteOptions) -> FileFacade {
        let (data1, data2, record, names) = self.finish();
        FileFacade {
            metadata: options.envelope(FILE_FACADE_KIND, data1, data2),
            record,
            names,
        }
    }
}

impl MultiFileClassPartWriter {
    /// `facade_class_name` is the internal name of the owning facade.
    pub fn write(self, facade_class_name: &str, options: WriteOptions) -> MultiFileClassPart {
        let (data1, data2, record, names) = self.finish();
        let metadata = Metadata {
            extra_string: facade_class_name.to_string(),
            ..options.envelope(MULTI_FILE_CLASS_PART_KIND, data1, data2)
        };
        MultiFileClassPart {
            metadata,
            record,
            names,
            facade_class_name: facade_class_name.to_string(),
        }
    }
}

/// Builds a [`Lambda`] from lambda visitor events.
#[derive(Debug, Default)]
pub struct LambdaWriter {
    strings: StringTable,
    t: Option<FunctionRecord>,
}

impl LambdaWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if no function was visited.
    pub fn write(self, options: WriteOptions) -> Lambda {
        let Some(record) = self.t else {
            panic!("visit_function has not been called");
        };
        let (data1, data2) = write_data(&record, &self.strings);
        Lambda {
            metadata: options.envelope(SYNTHETIC_CLASS_KIND, data1, data2),
            record,
            names: self.strings.resolver(),
        }
    }
}

impl LambdaVisitor for LambdaWriter {
    fn visit_function(
        &mut self,
        flags: Flags,
        name: &str,
        ext: &FunctionExt,
    ) -> Option<Box<dyn FunctionVisitor + '_>> {
        let slot = &mut self.t;
        Some(Box::new(FunctionWriter::new(
            &mut self.strings,
            flags,
            name,
            ext,
            move |f| *slot = Some(f),
        )))
    }
}

/// Builds a [`SyntheticClass`].
#[derive(Debug, Default)]
pub struct SyntheticClassWriter;

impl SyntheticClassWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(self, options: WriteOptions) -> SyntheticClass {
        SyntheticClass {
            metadata: options.envelope(SYNTHETIC_CLASS_KIND, Vec::new(), Vec::new()),
        }
    }
}

/// Builds a [`MultiFileClassFacade`].
#[derive(Debug, Default)]
pub struct MultiFileClassFacadeWriter;

impl MultiFileClassFacadeWriter {
    pub fn new() -> Self {
        Self
    }

    /// `part_class_names` are the internal names of the parts.
    pub fn write(
        self,
        part_class_names: Vec<String>,
        options: WriteOptions,
    ) -> MultiFileClassFacade {
        MultiFileClassFacade {
            metadata: options.envelope(
                MULTI_FILE_CLASS_FACADE_KIND,
                part_class_names.clone(),
                Vec::new(),
            ),
            part_class_names,
        }
    }
}
