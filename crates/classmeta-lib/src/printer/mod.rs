//! Human-readable rendering of decoded class files and module files.
//!
//! The output mimics source syntax closely enough to diff two compilations,
//! but it is not valid source: type parameters print as `T#id /* name */`,
//! platform data as `//` comments.

mod declarations;
pub mod modifiers;


use classmeta_codec::{Flags, Variance};
use indexmap::IndexMap;

use crate::Annotation;
use crate::class_file::{
    Class, ClassFile, FileFacade, Lambda, MultiFileClassFacade, MultiFileClassPart,
};
use crate::module_file::ModuleFile;
use crate::visitor::{
    ClassVisitor, ConstructorExt, ConstructorVisitor, DeclarationContainerVisitor, FunctionExt,
    FunctionVisitor, LambdaVisitor, ModuleVisitor, PackageVisitor, PropertyExt, PropertyVisitor,
    TypeAliasVisitor, TypeExt, TypeParameterExt, TypeParameterVisitor, TypeVisitor,
};

use declarations::{
    print_constructor, print_function, print_property, print_type, print_type_alias,
    print_type_parameter, render_annotation,
};
use modifiers::{CLASS_FLAGS, MODALITY_FLAGS, VISIBILITY_FLAGS, append_flags};

/// Renders one kind of input as text.
pub trait Printer<T> {
    fn print(self, input: &T) -> String;
}

/// Render any decoded class file; `None` stands for an unsupported version.
pub fn render_class_file(file: Option<&ClassFile>) -> String {
    match file {
        Some(ClassFile::Class(class)) => ClassPrinter.print(class),
        Some(ClassFile::FileFacade(facade)) => FileFacadePrinter.print(facade),
        Some(ClassFile::Lambda(lambda)) => LambdaPrinter.print(lambda),
        Some(ClassFile::SyntheticClass(_)) => "synthetic class\n".to_string(),
        Some(ClassFile::MultiFileClassFacade(facade)) => MultiFileClassFacadePrinter.print(facade),
        Some(ClassFile::MultiFileClassPart(part)) => MultiFileClassPartPrinter.print(part),
        Some(ClassFile::Unknown(metadata)) => format!("unknown file (k={})\n", metadata.kind),
        None => "unsupported file\n".to_string(),
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ClassPrinter;

impl Printer<Class> for ClassPrinter {
    fn print(self, class: &Class) -> String {
        let mut v = ClassBody::default();
        class.accept(&mut v);
        v.result
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FileFacadePrinter;

impl Printer<FileFacade> for FileFacadePrinter {
    fn print(self, facade: &FileFacade) -> String {
        let mut v = PackageBody::new("package {\n".to_string());
        facade.accept(&mut v);
        v.sb
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MultiFileClassPartPrinter;

impl Printer<MultiFileClassPart> for MultiFileClassPartPrinter {
    fn print(self, part: &MultiFileClassPart) -> String {
        let header = format!("package {{\n  // facade: {}\n", part.facade_class_name());
        let mut v = PackageBody::new(header);
        part.accept(&mut v);
        v.sb
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LambdaPrinter;

impl Printer<Lambda> for LambdaPrinter {
    fn print(self, lambda: &Lambda) -> String {
        let mut v = LambdaBody {
            sb: "lambda {\n".to_string(),
        };
        lambda.accept(&mut v);
        v.sb
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MultiFileClassFacadePrinter;

impl Printer<MultiFileClassFacade> for MultiFileClassFacadePrinter {
    fn print(self, facade: &MultiFileClassFacade) -> String {
        let mut sb = "multi-file class {\n".to_string();
        for part in facade.part_class_names() {
            sb.push_str(&format!("  // {part}\n"));
        }
        sb.push_str("}\n");
        sb
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ModuleFilePrinter;

impl Printer<ModuleFile> for ModuleFilePrinter {
    fn print(self, module: &ModuleFile) -> String {
        let mut v = ModuleBody {
            sb: "module {\n".to_string(),
        };
        module.accept(&mut v);
        v.sb
    }
}

#[derive(Default)]
struct ClassBody {
    header: String,
    type_parameters: Vec<String>,
    supertypes: Vec<String>,
    sb: String,
    result: String,
}

impl DeclarationContainerVisitor for ClassBody {
    fn visit_function(
        &mut self,
        flags: Flags,
        name: &str,
        ext: &FunctionExt,
    ) -> Option<Box<dyn FunctionVisitor + '_>> {
        print_function(&mut self.sb, flags, name, ext)
    }

    fn visit_property(
        &mut self,
        flags: Flags,
        name: &str,
        getter_flags: Flags,
        setter_flags: Flags,
        ext: &PropertyExt,
    ) -> Option<Box<dyn PropertyVisitor + '_>> {
        print_property(&mut self.sb, flags, name, (getter_flags, setter_flags), ext)
    }

    fn visit_type_alias(
        &mut self,
        flags: Flags,
        name: &str,
    ) -> Option<Box<dyn TypeAliasVisitor + '_>> {
        print_type_alias(&mut self.sb, flags, name)
    }
}

impl ClassVisitor for ClassBody {
    fn visit(&mut self, flags: Flags, name: &str) {
        append_flags(
            &mut self.header,
            flags,
            &[VISIBILITY_FLAGS, MODALITY_FLAGS, CLASS_FLAGS],
        );
        self.header.push_str(name);
    }

    fn visit_type_parameter(
        &mut self,
        flags: Flags,
        name: &str,
        id: u32,
        variance: Variance,
        ext: &TypeParameterExt,
    ) -> Option<Box<dyn TypeParameterVisitor + '_>> {
        let type_parameters = &mut self.type_parameters;
        print_type_parameter(flags, name, (id, variance), ext, move |s| {
            type_parameters.push(s)
        })
    }

    fn visit_supertype(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let supertypes = &mut self.supertypes;
        print_type(flags, ext, move |s| supertypes.push(s))
    }

    fn visit_constructor(
        &mut self,
        flags: Flags,
        ext: &ConstructorExt,
    ) -> Option<Box<dyn ConstructorVisitor + '_>> {
        print_constructor(&mut self.sb, flags, ext)
    }

    fn visit_companion_object(&mut self, name: &str) {
        self.sb.push_str(&format!("\n  // companion object: {name}\n"));
    }

    fn visit_nested_class(&mut self, name: &str) {
        self.sb.push_str(&format!("\n  // nested class: {name}\n"));
    }

    fn visit_enum_entry(&mut self, name: &str) {
        self.sb.push_str(&format!("\n  {name},\n"));
    }

    fn visit_sealed_subclass(&mut self, name: &str) {
        self.sb.push_str(&format!("\n  // sealed subclass: {name}\n"));
    }

    fn visit_end(&mut self) {
        let mut result = std::mem::take(&mut self.header);
        if !self.type_parameters.is_empty() {
            result.push_str(&format!("<{}>", self.type_parameters.join(", ")));
        }
        if !self.supertypes.is_empty() {
            result.push_str(&format!(" : {}", self.supertypes.join(", ")));
        }
        result.push_str(" {\n");
        result.push_str(&self.sb);
        result.push_str("}\n");
        self.result = result;
    }
}

struct PackageBody {
    sb: String,
}

impl PackageBody {
    fn new(header: String) -> Self {
        Self { sb: header }
    }
}

impl DeclarationContainerVisitor for PackageBody {
    fn visit_function(
        &mut self,
        flags: Flags,
        name: &str,
        ext: &FunctionExt,
    ) -> Option<Box<dyn FunctionVisitor + '_>> {
        print_function(&mut self.sb, flags, name, ext)
    }

    fn visit_property(
        &mut self,
        flags: Flags,
        name: &str,
        getter_flags: Flags,
        setter_flags: Flags,
        ext: &PropertyExt,
    ) -> Option<Box<dyn PropertyVisitor + '_>> {
        print_property(&mut self.sb, flags, name, (getter_flags, setter_flags), ext)
    }

    fn visit_type_alias(
        &mut self,
        flags: Flags,
        name: &str,
    ) -> Option<Box<dyn TypeAliasVisitor + '_>> {
        print_type_alias(&mut self.sb, flags, name)
    }
}

impl PackageVisitor for PackageBody {
    fn visit_end(&mut self) {
        self.sb.push_str("}\n");
    }
}

struct LambdaBody {
    sb: String,
}

impl LambdaVisitor for LambdaBody {
    fn visit_function(
        &mut self,
        flags: Flags,
        name: &str,
        ext: &FunctionExt,
    ) -> Option<Box<dyn FunctionVisitor + '_>> {
        print_function(&mut self.sb, flags, name, ext)
    }

    fn visit_end(&mut self) {
        self.sb.push_str("}\n");
    }
}

struct ModuleBody {
    sb: String,
}

impl ModuleVisitor for ModuleBody {
    fn visit_package_parts(
        &mut self,
        fq_name: &str,
        file_facades: &[String],
        multi_file_class_parts: &IndexMap<String, String>,
    ) {
        let package = if fq_name.is_empty() { "<root>" } else { fq_name };
        self.sb.push_str(&format!("  package {package} {{\n"));
        for facade in file_facades {
            self.sb.push_str(&format!("    {facade}\n"));
        }
        for (part, facade) in multi_file_class_parts {
            self.sb.push_str(&format!("    {part} ({facade})\n"));
        }
        self.sb.push_str("  }\n");
    }

    fn visit_annotation(&mut self, annotation: &Annotation) {
        self.sb.push_str(&format!("  @{}\n", render_annotation(annotation)));
    }

    fn visit_end(&mut self) {
        self.sb.push_str("}\n");
    }
}
