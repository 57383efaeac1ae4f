//! Visitors that build records from the events they receive.
//!
//! Each writer owns the record of one node and hands it to its `output`
//! closure on `visit_end`. The closure usually pushes into the parent's
//! record, so a child writer borrows its parent for as long as it lives.

use classmeta_codec::{
    Classifier, ConstructorRecord, Flags, FunctionRecord, PropertyRecord, StringTable,
    TypeAliasRecord, TypeArgumentRecord, TypeParameterRecord, TypeRecord, ValueParameterRecord,
    Variance,
};

use crate::Annotation;
use crate::annotation::write_annotation;
use crate::visitor::{
    ConstructorExt, ConstructorVisitor, FunctionExt, FunctionVisitor, PropertyExt,
    PropertyVisitor, TypeAliasVisitor, TypeExt, TypeParameterExt, TypeParameterVisitor,
    TypeVisitor, ValueParameterVisitor,
};

type Output<'a, T> = Box<dyn FnMut(T) + 'a>;

pub(crate) fn write_function<'a>(
    strings: &'a mut StringTable,
    functions: &'a mut Vec<FunctionRecord>,
    flags: Flags,
    name: &str,
    ext: &FunctionExt,
) -> Option<Box<dyn FunctionVisitor + 'a>> {
    Some(Box::new(FunctionWriter::new(
        strings,
        flags,
        name,
        ext,
        move |f| functions.push(f),
    )))
}

pub(crate) fn write_property<'a>(
    strings: &'a mut StringTable,
    properties: &'a mut Vec<PropertyRecord>,
    flags: Flags,
    name: &str,
    (getter_flags, setter_flags): (Flags, Flags),
    ext: &PropertyExt,
) -> Option<Box<dyn PropertyVisitor + 'a>> {
    let name = strings.intern(name);
    let t = PropertyRecord {
        flags,
        name,
        getter_flags,
        setter_flags,
        field_name: ext.field_name.as_deref().map(|s| strings.intern(s)),
        field_type: ext.field_type.as_deref().map(|s| strings.intern(s)),
        getter_signature: ext.getter_signature.as_deref().map(|s| strings.intern(s)),
        setter_signature: ext.setter_signature.as_deref().map(|s| strings.intern(s)),
        synthetic_method_for_annotations: ext
            .synthetic_method_for_annotations
            .as_deref()
            .map(|s| strings.intern(s)),
        ..PropertyRecord::default()
    };
    Some(Box::new(PropertyWriter {
        strings,
        t,
        output: Box::new(move |p| properties.push(p)),
    }))
}

pub(crate) fn write_type_alias<'a>(
    strings: &'a mut StringTable,
    type_aliases: &'a mut Vec<TypeAliasRecord>,
    flags: Flags,
    name: &str,
) -> Option<Box<dyn TypeAliasVisitor + 'a>> {
    let name = strings.intern(name);
    Some(Box::new(TypeAliasWriter {
        strings,
        t: TypeAliasRecord {
            flags,
            name,
            ..TypeAliasRecord::default()
        },
        output: Box::new(move |t| type_aliases.push(t)),
    }))
}

pub(crate) fn write_type_parameter<'a>(
    strings: &'a mut StringTable,
    type_parameters: &'a mut Vec<TypeParameterRecord>,
    flags: Flags,
    name: &str,
    (id, variance): (u32, Variance),
    ext: &TypeParameterExt,
) -> Option<Box<dyn TypeParameterVisitor + 'a>> {
    let name = strings.intern(name);
    let annotations = ext
        .annotations
        .iter()
        .map(|a| write_annotation(a, strings))
        .collect();
    Some(Box::new(TypeParameterWriter {
        strings,
        t: TypeParameterRecord {
            flags,
            name,
            id,
            variance,
            annotations,
            ..TypeParameterRecord::default()
        },
        output: Box::new(move |t| type_parameters.push(t)),
    }))
}

pub(crate) fn write_type<'a>(
    strings: &'a mut StringTable,
    flags: Flags,
    ext: &TypeExt,
    output: impl FnMut(TypeRecord) + 'a,
) -> Option<Box<dyn TypeVisitor + 'a>> {
    let annotations = ext
        .annotations
        .iter()
        .map(|a| write_annotation(a, strings))
        .collect();
    Some(Box::new(TypeWriter {
        strings,
        t: TypeRecord {
            flags,
            annotations,
            is_raw: ext.is_raw,
            ..TypeRecord::default()
        },
        classifier: None,
        output: Box::new(output),
    }))
}

pub(crate) fn write_constructor<'a>(
    strings: &'a mut StringTable,
    constructors: &'a mut Vec<ConstructorRecord>,
    flags: Flags,
    ext: &ConstructorExt,
) -> Option<Box<dyn ConstructorVisitor + 'a>> {
    let signature = ext.signature.as_deref().map(|s| strings.intern(s));
    Some(Box::new(ConstructorWriter {
        strings,
        t: ConstructorRecord {
            flags,
            signature,
            ..ConstructorRecord::default()
        },
        output: Box::new(move |c| constructors.push(c)),
    }))
}

fn write_value_parameter<'a>(
    strings: &'a mut StringTable,
    flags: Flags,
    name: &str,
    output: impl FnMut(ValueParameterRecord) + 'a,
) -> Option<Box<dyn ValueParameterVisitor + 'a>> {
    let name = strings.intern(name);
    Some(Box::new(ValueParameterWriter {
        strings,
        t: ValueParameterRecord {
            flags,
            name,
            ..ValueParameterRecord::default()
        },
        output: Box::new(output),
    }))
}

pub(crate) struct FunctionWriter<'a> {
    strings: &'a mut StringTable,
    t: FunctionRecord,
    output: Output<'a, FunctionRecord>,
}

impl<'a> FunctionWriter<'a> {
    pub(crate) fn new(
        strings: &'a mut StringTable,
        flags: Flags,
        name: &str,
        ext: &FunctionExt,
        output: impl FnMut(FunctionRecord) + 'a,
    ) -> Self {
        let name = strings.intern(name);
        let signature = ext.signature.as_deref().map(|s| strings.intern(s));
        Self {
            strings,
            t: FunctionRecord {
                flags,
                name,
                signature,
                ..FunctionRecord::default()
            },
            output: Box::new(output),
        }
    }
}

impl FunctionVisitor for FunctionWriter<'_> {
    fn visit_receiver_parameter_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.t.receiver_type;
        write_type(self.strings, flags, ext, move |t| *slot = Some(t))
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
            self.strings,
            &mut self.t.type_parameters,
            flags,
            name,
            (id, variance),
            ext,
        )
    }

    fn visit_value_parameter(
        &mut self,
        flags: Flags,
        name: &str,
    ) -> Option<Box<dyn ValueParameterVisitor + '_>> {
        let parameters = &mut self.t.value_parameters;
        write_value_parameter(self.strings, flags, name, move |p| parameters.push(p))
    }

    fn visit_return_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.t.return_type;
        write_type(self.strings, flags, ext, move |t| *slot = Some(t))
    }

    fn visit_end(&mut self) {
        (self.output)(std::mem::take(&mut self.t));
    }
}

struct PropertyWriter<'a> {
    strings: &'a mut StringTable,
    t: PropertyRecord,
    output: Output<'a, PropertyRecord>,
}

impl PropertyVisitor for PropertyWriter<'_> {
    fn visit_receiver_parameter_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.t.receiver_type;
        write_type(self.strings, flags, ext, move |t| *slot = Some(t))
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
            self.strings,
            &mut self.t.type_parameters,
            flags,
            name,
            (id, variance),
            ext,
        )
    }

    fn visit_setter_parameter(
        &mut self,
        flags: Flags,
        name: &str,
    ) -> Option<Box<dyn ValueParameterVisitor + '_>> {
        let slot = &mut self.t.setter_parameter;
        write_value_parameter(self.strings, flags, name, move |p| *slot = Some(p))
    }

    fn visit_return_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.t.return_type;
        write_type(self.strings, flags, ext, move |t| *slot = Some(t))
    }

    fn visit_end(&mut self) {
        (self.output)(std::mem::take(&mut self.t));
    }
}

struct TypeAliasWriter<'a> {
    strings: &'a mut StringTable,
    t: TypeAliasRecord,
    output: Output<'a, TypeAliasRecord>,
}

impl TypeAliasVisitor for TypeAliasWriter<'_> {
    fn visit_type_parameter(
        &mut self,
        flags: Flags,
        name: &str,
        id: u32,
        variance: Variance,
        ext: &TypeParameterExt,
    ) -> Option<Box<dyn TypeParameterVisitor + '_>> {
        write_type_parameter(
            self.strings,
            &mut self.t.type_parameters,
            flags,
            name,
            (id, variance),
            ext,
        )
    }

    fn visit_underlying_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.t.underlying_type;
        write_type(self.strings, flags, ext, move |t| *slot = Some(t))
    }

    fn visit_expanded_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.t.expanded_type;
        write_type(self.strings, flags, ext, move |t| *slot = Some(t))
    }

    fn visit_annotation(&mut self, annotation: &Annotation) {
        let record = write_annotation(annotation, self.strings);
        self.t.annotations.push(record);
    }

    fn visit_end(&mut self) {
        (self.output)(std::mem::take(&mut self.t));
    }
}

struct ConstructorWriter<'a> {
    strings: &'a mut StringTable,
    t: ConstructorRecord,
    output: Output<'a, ConstructorRecord>,
}

impl ConstructorVisitor for ConstructorWriter<'_> {
    fn visit_value_parameter(
        &mut self,
        flags: Flags,
        name: &str,
    ) -> Option<Box<dyn ValueParameterVisitor + '_>> {
        let parameters = &mut self.t.value_parameters;
        write_value_parameter(self.strings, flags, name, move |p| parameters.push(p))
    }

    fn visit_end(&mut self) {
        (self.output)(std::mem::take(&mut self.t));
    }
}

struct TypeParameterWriter<'a> {
    strings: &'a mut StringTable,
    t: TypeParameterRecord,
    output: Output<'a, TypeParameterRecord>,
}

impl TypeParameterVisitor for TypeParameterWriter<'_> {
    fn visit_upper_bound(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let bounds = &mut self.t.upper_bounds;
        write_type(self.strings, flags, ext, move |t| bounds.push(t))
    }

    fn visit_end(&mut self) {
        (self.output)(std::mem::take(&mut self.t));
    }
}

struct ValueParameterWriter<'a> {
    strings: &'a mut StringTable,
    t: ValueParameterRecord,
    output: Output<'a, ValueParameterRecord>,
}

impl ValueParameterVisitor for ValueParameterWriter<'_> {
    fn visit_type(&mut self, flags: Flags, ext: &TypeExt) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.t.ty;
        write_type(self.strings, flags, ext, move |t| *slot = Some(t))
    }

    fn visit_vararg_element_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.t.vararg_element_type;
        write_type(self.strings, flags, ext, move |t| *slot = Some(t))
    }

    fn visit_end(&mut self) {
        (self.output)(std::mem::take(&mut self.t));
    }
}

struct TypeWriter<'a> {
    strings: &'a mut StringTable,
    t: TypeRecord,
    classifier: Option<Classifier>,
    output: Output<'a, TypeRecord>,
}

impl TypeVisitor for TypeWriter<'_> {
    fn visit_class(&mut self, name: &str) {
        self.classifier = Some(Classifier::Class(self.strings.intern_class_name(name)));
    }

    fn visit_type_alias(&mut self, name: &str) {
        self.classifier = Some(Classifier::TypeAlias(self.strings.intern_class_name(name)));
    }

    fn visit_type_parameter(&mut self, id: u32) {
        self.classifier = Some(Classifier::TypeParameter(id));
    }

    fn visit_argument(
        &mut self,
        flags: Flags,
        variance: Variance,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let arguments = &mut self.t.arguments;
        write_type(self.strings, flags, ext, move |ty| {
            arguments.push(TypeArgumentRecord::Projection { variance, ty })
        })
    }

    fn visit_star_projection(&mut self) {
        self.t.arguments.push(TypeArgumentRecord::Star);
    }

    fn visit_abbreviated_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.t.abbreviated_type;
        write_type(self.strings, flags, ext, move |t| *slot = Some(Box::new(t)))
    }

    fn visit_outer_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.t.outer_type;
        write_type(self.strings, flags, ext, move |t| *slot = Some(Box::new(t)))
    }

    fn visit_flexible_type_upper_bound(
        &mut self,
        flags: Flags,
        type_flexibility_id: Option<&str>,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        self.t.flexibility_id = type_flexibility_id.map(|id| self.strings.intern(id));
        let slot = &mut self.t.flexible_upper_bound;
        write_type(self.strings, flags, ext, move |t| *slot = Some(Box::new(t)))
    }

    fn visit_end(&mut self) {
        let Some(classifier) = self.classifier.take() else {
            panic!("type has no classifier");
        };
        self.t.classifier = classifier;
        (self.output)(std::mem::take(&mut self.t));
    }
}
