//! Printers for declarations and types.
//!
//! Declaration printers append their text to the buffer of the enclosing
//! printer on `visit_end`. Parameter and type printers render into a string
//! and hand it to an `output` closure, since their owner places the text.

use classmeta_codec::{Flags, Variance};

use crate::flags::{property, ty, value_parameter};
use crate::visitor::{
    ConstructorExt, ConstructorVisitor, FunctionExt, FunctionVisitor, PropertyExt,
    PropertyVisitor, TypeAliasVisitor, TypeExt, TypeParameterExt, TypeParameterVisitor,
    TypeVisitor, ValueParameterVisitor,
};
use crate::{Annotation, AnnotationArgument};

use super::modifiers::{
    CONSTRUCTOR_FLAGS, FUNCTION_FLAGS, MODALITY_FLAGS, PROPERTY_ACCESSOR_FLAGS, PROPERTY_FLAGS,
    TYPE_FLAGS, TYPE_PARAMETER_FLAGS, VALUE_PARAMETER_FLAGS, VISIBILITY_FLAGS, append_flags,
};

type Output<'a> = Box<dyn FnMut(String) + 'a>;

pub(crate) fn print_function<'a>(
    out: &'a mut String,
    flags: Flags,
    name: &str,
    ext: &FunctionExt,
) -> Option<Box<dyn FunctionVisitor + 'a>> {
    Some(Box::new(FunctionPrinter {
        out,
        flags,
        name: name.to_string(),
        signature: ext.signature.clone(),
        receiver: None,
        type_parameters: Vec::new(),
        value_parameters: Vec::new(),
        return_type: None,
    }))
}

pub(crate) fn print_property<'a>(
    out: &'a mut String,
    flags: Flags,
    name: &str,
    (getter_flags, setter_flags): (Flags, Flags),
    ext: &PropertyExt,
) -> Option<Box<dyn PropertyVisitor + 'a>> {
    Some(Box::new(PropertyPrinter {
        out,
        flags,
        name: name.to_string(),
        getter_flags,
        setter_flags,
        ext: ext.clone(),
        receiver: None,
        type_parameters: Vec::new(),
        setter_parameter: None,
        return_type: None,
    }))
}

pub(crate) fn print_type_alias<'a>(
    out: &'a mut String,
    flags: Flags,
    name: &str,
) -> Option<Box<dyn TypeAliasVisitor + 'a>> {
    Some(Box::new(TypeAliasPrinter {
        out,
        flags,
        name: name.to_string(),
        type_parameters: Vec::new(),
        underlying_type: None,
        expanded_type: None,
        annotations: Vec::new(),
    }))
}

pub(crate) fn print_constructor<'a>(
    out: &'a mut String,
    flags: Flags,
    ext: &ConstructorExt,
) -> Option<Box<dyn ConstructorVisitor + 'a>> {
    Some(Box::new(ConstructorPrinter {
        out,
        flags,
        signature: ext.signature.clone(),
        value_parameters: Vec::new(),
    }))
}

pub(crate) fn print_type_parameter<'a>(
    flags: Flags,
    name: &str,
    (id, variance): (u32, Variance),
    ext: &TypeParameterExt,
    output: impl FnMut(String) + 'a,
) -> Option<Box<dyn TypeParameterVisitor + 'a>> {
    Some(Box::new(TypeParameterPrinter {
        flags,
        name: name.to_string(),
        id,
        variance,
        annotations: render_annotation_prefix(&ext.annotations),
        upper_bounds: Vec::new(),
        output: Box::new(output),
    }))
}

fn print_value_parameter<'a>(
    flags: Flags,
    name: &str,
    output: impl FnMut(String) + 'a,
) -> Option<Box<dyn ValueParameterVisitor + 'a>> {
    Some(Box::new(ValueParameterPrinter {
        flags,
        name: name.to_string(),
        ty: None,
        vararg_element_type: None,
        output: Box::new(output),
    }))
}

pub(crate) fn print_type<'a>(
    flags: Flags,
    ext: &TypeExt,
    output: impl FnMut(String) + 'a,
) -> Option<Box<dyn TypeVisitor + 'a>> {
    let mut prefix = String::new();
    if ext.is_raw {
        prefix.push_str("/* raw */ ");
    }
    prefix.push_str(&render_annotation_prefix(&ext.annotations));

    Some(Box::new(TypePrinter {
        flags,
        prefix,
        classifier: String::new(),
        arguments: Vec::new(),
        abbreviated_type: None,
        outer_type: None,
        flexible_upper_bound: None,
        output: Box::new(output),
    }))
}

struct FunctionPrinter<'a> {
    out: &'a mut String,
    flags: Flags,
    name: String,
    signature: Option<String>,
    receiver: Option<String>,
    type_parameters: Vec<String>,
    value_parameters: Vec<String>,
    return_type: Option<String>,
}

impl FunctionVisitor for FunctionPrinter<'_> {
    fn visit_receiver_parameter_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.receiver;
        print_type(flags, ext, move |s| *slot = Some(s))
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

    fn visit_value_parameter(
        &mut self,
        flags: Flags,
        name: &str,
    ) -> Option<Box<dyn ValueParameterVisitor + '_>> {
        let value_parameters = &mut self.value_parameters;
        print_value_parameter(flags, name, move |s| value_parameters.push(s))
    }

    fn visit_return_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.return_type;
        print_type(flags, ext, move |s| *slot = Some(s))
    }

    fn visit_end(&mut self) {
        let out = &mut *self.out;
        out.push('\n');
        if let Some(signature) = &self.signature {
            out.push_str(&format!("  // signature: {signature}\n"));
        }
        out.push_str("  ");
        append_flags(out, self.flags, &[VISIBILITY_FLAGS, MODALITY_FLAGS, FUNCTION_FLAGS]);
        out.push_str("fun ");
        if !self.type_parameters.is_empty() {
            out.push_str(&format!("<{}> ", self.type_parameters.join(", ")));
        }
        if let Some(receiver) = &self.receiver {
            out.push_str(&format!("{receiver}."));
        }
        out.push_str(&format!("{}({})", self.name, self.value_parameters.join(", ")));
        if let Some(return_type) = &self.return_type {
            out.push_str(&format!(": {return_type}"));
        }
        out.push('\n');
    }
}

struct PropertyPrinter<'a> {
    out: &'a mut String,
    flags: Flags,
    name: String,
    getter_flags: Flags,
    setter_flags: Flags,
    ext: PropertyExt,
    receiver: Option<String>,
    type_parameters: Vec<String>,
    setter_parameter: Option<String>,
    return_type: Option<String>,
}

impl PropertyVisitor for PropertyPrinter<'_> {
    fn visit_receiver_parameter_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.receiver;
        print_type(flags, ext, move |s| *slot = Some(s))
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

    fn visit_setter_parameter(
        &mut self,
        flags: Flags,
        name: &str,
    ) -> Option<Box<dyn ValueParameterVisitor + '_>> {
        let slot = &mut self.setter_parameter;
        print_value_parameter(flags, name, move |s| *slot = Some(s))
    }

    fn visit_return_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.return_type;
        print_type(flags, ext, move |s| *slot = Some(s))
    }

    fn visit_end(&mut self) {
        let out = &mut *self.out;
        let ext = &self.ext;
        out.push('\n');
        if ext.field_name.is_some() || ext.field_type.is_some() {
            out.push_str(&format!(
                "  // field: {}:{}\n",
                ext.field_name.as_deref().unwrap_or_default(),
                ext.field_type.as_deref().unwrap_or_default()
            ));
        }
        if let Some(signature) = &ext.getter_signature {
            out.push_str(&format!("  // getter: {signature}\n"));
        }
        if let Some(signature) = &ext.setter_signature {
            out.push_str(&format!("  // setter: {signature}\n"));
        }
        if let Some(signature) = &ext.synthetic_method_for_annotations {
            out.push_str(&format!("  // synthetic method for annotations: {signature}\n"));
        }

        out.push_str("  ");
        append_flags(out, self.flags, &[VISIBILITY_FLAGS, MODALITY_FLAGS, PROPERTY_FLAGS]);
        out.push_str(if property::IS_VAR.is_set(self.flags) { "var " } else { "val " });
        if !self.type_parameters.is_empty() {
            out.push_str(&format!("<{}> ", self.type_parameters.join(", ")));
        }
        if let Some(receiver) = &self.receiver {
            out.push_str(&format!("{receiver}."));
        }
        out.push_str(&self.name);
        if let Some(return_type) = &self.return_type {
            out.push_str(&format!(": {return_type}"));
        }
        if property::HAS_CONSTANT.is_set(self.flags) {
            out.push_str(" /* = ... */");
        }
        out.push('\n');

        let accessor_flags = [VISIBILITY_FLAGS, MODALITY_FLAGS, PROPERTY_ACCESSOR_FLAGS];
        if property::HAS_GETTER.is_set(self.flags) {
            out.push_str("    ");
            append_flags(out, self.getter_flags, &accessor_flags);
            out.push_str("get\n");
        }
        if property::HAS_SETTER.is_set(self.flags) {
            out.push_str("    ");
            append_flags(out, self.setter_flags, &accessor_flags);
            out.push_str("set");
            if let Some(parameter) = &self.setter_parameter {
                out.push_str(&format!("({parameter})"));
            }
            out.push('\n');
        }
    }
}

struct TypeAliasPrinter<'a> {
    out: &'a mut String,
    flags: Flags,
    name: String,
    type_parameters: Vec<String>,
    underlying_type: Option<String>,
    expanded_type: Option<String>,
    annotations: Vec<String>,
}

impl TypeAliasVisitor for TypeAliasPrinter<'_> {
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

    fn visit_underlying_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.underlying_type;
        print_type(flags, ext, move |s| *slot = Some(s))
    }

    fn visit_expanded_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.expanded_type;
        print_type(flags, ext, move |s| *slot = Some(s))
    }

    fn visit_annotation(&mut self, annotation: &Annotation) {
        self.annotations.push(render_annotation(annotation));
    }

    fn visit_end(&mut self) {
        let out = &mut *self.out;
        out.push('\n');
        for annotation in &self.annotations {
            out.push_str(&format!("  @{annotation}\n"));
        }
        out.push_str("  ");
        append_flags(out, self.flags, &[VISIBILITY_FLAGS]);
        out.push_str("typealias ");
        out.push_str(&self.name);
        if !self.type_parameters.is_empty() {
            out.push_str(&format!("<{}>", self.type_parameters.join(", ")));
        }
        if let Some(underlying) = &self.underlying_type {
            out.push_str(&format!(" = {underlying}"));
        }
        if let Some(expanded) = &self.expanded_type {
            out.push_str(&format!(" /* = {expanded} */"));
        }
        out.push('\n');
    }
}

struct ConstructorPrinter<'a> {
    out: &'a mut String,
    flags: Flags,
    signature: Option<String>,
    value_parameters: Vec<String>,
}

impl ConstructorVisitor for ConstructorPrinter<'_> {
    fn visit_value_parameter(
        &mut self,
        flags: Flags,
        name: &str,
    ) -> Option<Box<dyn ValueParameterVisitor + '_>> {
        let value_parameters = &mut self.value_parameters;
        print_value_parameter(flags, name, move |s| value_parameters.push(s))
    }

    fn visit_end(&mut self) {
        let out = &mut *self.out;
        out.push('\n');
        if let Some(signature) = &self.signature {
            out.push_str(&format!("  // signature: {signature}\n"));
        }
        out.push_str("  ");
        append_flags(out, self.flags, &[VISIBILITY_FLAGS, CONSTRUCTOR_FLAGS]);
        out.push_str(&format!("constructor({})\n", self.value_parameters.join(", ")));
    }
}

struct TypeParameterPrinter<'a> {
    flags: Flags,
    name: String,
    id: u32,
    variance: Variance,
    annotations: String,
    upper_bounds: Vec<String>,
    output: Output<'a>,
}

impl TypeParameterVisitor for TypeParameterPrinter<'_> {
    fn visit_upper_bound(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let upper_bounds = &mut self.upper_bounds;
        print_type(flags, ext, move |s| upper_bounds.push(s))
    }

    fn visit_end(&mut self) {
        let mut sb = self.annotations.clone();
        append_flags(&mut sb, self.flags, &[TYPE_PARAMETER_FLAGS]);
        sb.push_str(variance_prefix(self.variance));
        sb.push_str(&format!("T#{} /* {} */", self.id, self.name));
        if !self.upper_bounds.is_empty() {
            sb.push_str(&format!(" : {}", self.upper_bounds.join(" & ")));
        }
        (self.output)(sb);
    }
}

struct ValueParameterPrinter<'a> {
    flags: Flags,
    name: String,
    ty: Option<String>,
    vararg_element_type: Option<String>,
    output: Output<'a>,
}

impl ValueParameterVisitor for ValueParameterPrinter<'_> {
    fn visit_type(&mut self, flags: Flags, ext: &TypeExt) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.ty;
        print_type(flags, ext, move |s| *slot = Some(s))
    }

    fn visit_vararg_element_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.vararg_element_type;
        print_type(flags, ext, move |s| *slot = Some(s))
    }

    fn visit_end(&mut self) {
        let mut sb = String::new();
        append_flags(&mut sb, self.flags, &[VALUE_PARAMETER_FLAGS]);
        let ty = self.ty.as_deref().unwrap_or_default();
        match &self.vararg_element_type {
            Some(element) => sb.push_str(&format!("vararg {}: {element} /* {ty} */", self.name)),
            None => sb.push_str(&format!("{}: {ty}", self.name)),
        }
        if value_parameter::DECLARES_DEFAULT_VALUE.is_set(self.flags) {
            sb.push_str(" /* = ... */");
        }
        (self.output)(sb);
    }
}

struct TypePrinter<'a> {
    flags: Flags,
    prefix: String,
    classifier: String,
    arguments: Vec<String>,
    abbreviated_type: Option<String>,
    outer_type: Option<String>,
    flexible_upper_bound: Option<String>,
    output: Output<'a>,
}

impl TypeVisitor for TypePrinter<'_> {
    fn visit_class(&mut self, name: &str) {
        self.classifier = name.to_string();
    }

    fn visit_type_alias(&mut self, name: &str) {
        self.classifier = format!("{name}^");
    }

    fn visit_type_parameter(&mut self, id: u32) {
        self.classifier = format!("T#{id}");
    }

    fn visit_argument(
        &mut self,
        flags: Flags,
        variance: Variance,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let arguments = &mut self.arguments;
        print_type(flags, ext, move |s| {
            arguments.push(format!("{}{s}", variance_prefix(variance)))
        })
    }

    fn visit_star_projection(&mut self) {
        self.arguments.push("*".to_string());
    }

    fn visit_abbreviated_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.abbreviated_type;
        print_type(flags, ext, move |s| *slot = Some(s))
    }

    fn visit_outer_type(
        &mut self,
        flags: Flags,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.outer_type;
        print_type(flags, ext, move |s| *slot = Some(s))
    }

    fn visit_flexible_type_upper_bound(
        &mut self,
        flags: Flags,
        _type_flexibility_id: Option<&str>,
        ext: &TypeExt,
    ) -> Option<Box<dyn TypeVisitor + '_>> {
        let slot = &mut self.flexible_upper_bound;
        print_type(flags, ext, move |s| *slot = Some(s))
    }

    fn visit_end(&mut self) {
        let mut sb = self.prefix.clone();
        append_flags(&mut sb, self.flags, &[TYPE_FLAGS]);
        if let Some(outer) = &self.outer_type {
            sb.push_str(&format!("{outer}."));
        }
        sb.push_str(&self.classifier);
        if !self.arguments.is_empty() {
            sb.push_str(&format!("<{}>", self.arguments.join(", ")));
        }
        if ty::IS_NULLABLE.is_set(self.flags) {
            sb.push('?');
        }
        if let Some(abbreviated) = &self.abbreviated_type {
            sb.push_str(&format!(" /* = {abbreviated} */"));
        }

        let rendered = match &self.flexible_upper_bound {
            Some(upper) => format!("({sb}..{upper})"),
            None => sb,
        };
        (self.output)(rendered);
    }
}

fn variance_prefix(variance: Variance) -> &'static str {
    match variance {
        Variance::Invariant => "",
        Variance::In => "in ",
        Variance::Out => "out ",
    }
}

fn render_annotation_prefix(annotations: &[Annotation]) -> String {
    annotations
        .iter()
        .map(|a| format!("@{} ", render_annotation(a)))
        .collect()
}

/// `pkg.Ann(x = 1, y = "s")`, or just the class name without arguments.
pub(crate) fn render_annotation(annotation: &Annotation) -> String {
    if annotation.arguments.is_empty() {
        return annotation.class_name.clone();
    }
    format!("{}({})", annotation.class_name, render_arguments(annotation))
}

fn render_arguments(annotation: &Annotation) -> String {
    annotation
        .arguments
        .iter()
        .map(|(name, value)| format!("{name} = {}", render_argument(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_argument(argument: &AnnotationArgument) -> String {
    match argument {
        AnnotationArgument::Byte(v) => format!("{v}.toByte()"),
        AnnotationArgument::Char(c) => format!("'{c}'"),
        AnnotationArgument::Short(v) => format!("{v}.toShort()"),
        AnnotationArgument::Int(v) => v.to_string(),
        AnnotationArgument::Long(v) => format!("{v}L"),
        AnnotationArgument::Float(v) => format!("{v:?}f"),
        AnnotationArgument::Double(v) => format!("{v:?}"),
        AnnotationArgument::Boolean(v) => v.to_string(),
        AnnotationArgument::String(s) => format!("{s:?}"),
        AnnotationArgument::KClass(name) => format!("{name}::class"),
        AnnotationArgument::Enum {
            class_name,
            entry_name,
        } => format!("{class_name}.{entry_name}"),
        AnnotationArgument::Annotation(nested) => {
            format!("{}({})", nested.class_name, render_arguments(nested))
        }
        AnnotationArgument::Array(elements) => format!(
            "[{}]",
            elements
                .iter()
                .map(render_argument)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
