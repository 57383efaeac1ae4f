//! Replays decoded records into visitors.
//!
//! Ids were validated when the record was decoded, so none of this can fail.

use classmeta_codec::{
    AnnotationRecord, ClassRecord, Classifier, ConstructorRecord, FunctionRecord, NameResolver,
    PackageRecord, PropertyRecord, StringId, TypeAliasRecord, TypeArgumentRecord,
    TypeParameterRecord, TypeRecord, ValueParameterRecord,
};

use crate::Annotation;
use crate::annotation::read_annotation;
use crate::visitor::{
    ClassVisitor, ConstructorExt, ConstructorVisitor, DeclarationContainerVisitor, FunctionExt,
    FunctionVisitor, LambdaVisitor, PackageVisitor, PropertyExt, PropertyVisitor,
    TypeAliasVisitor, TypeExt, TypeParameterExt, TypeParameterVisitor, TypeVisitor,
    ValueParameterVisitor,
};

pub(crate) fn accept_class<V>(class: &ClassRecord, v: &mut V, names: &NameResolver)
where
    V: ClassVisitor + ?Sized,
{
    v.visit(class.flags, &names.qualified_class_name(class.fq_name));

    for type_parameter in &class.type_parameters {
        if let Some(mut tv) = v.visit_type_parameter(
            type_parameter.flags,
            names.string(type_parameter.name),
            type_parameter.id,
            type_parameter.variance,
            &type_parameter_ext(type_parameter, names),
        ) {
            accept_type_parameter(type_parameter, &mut *tv, names);
        }
    }

    for supertype in &class.supertypes {
        if let Some(mut tv) = v.visit_supertype(supertype.flags, &type_ext(supertype, names)) {
            accept_type(supertype, &mut *tv, names);
        }
    }

    for constructor in &class.constructors {
        let ext = ConstructorExt {
            signature: optional_string(constructor.signature, names),
        };
        if let Some(mut cv) = v.visit_constructor(constructor.flags, &ext) {
            accept_constructor(constructor, &mut *cv, names);
        }
    }

    accept_declarations(
        &class.functions,
        &class.properties,
        &class.type_aliases,
        v,
        names,
    );

    if let Some(companion) = class.companion_object_name {
        v.visit_companion_object(names.string(companion));
    }
    for &nested in &class.nested_class_names {
        v.visit_nested_class(names.string(nested));
    }
    for &entry in &class.enum_entries {
        v.visit_enum_entry(names.string(entry));
    }
    for &subclass in &class.sealed_subclass_fq_names {
        v.visit_sealed_subclass(&names.qualified_class_name(subclass));
    }

    v.visit_end();
}

pub(crate) fn accept_package<V>(package: &PackageRecord, v: &mut V, names: &NameResolver)
where
    V: PackageVisitor + ?Sized,
{
    accept_declarations(
        &package.functions,
        &package.properties,
        &package.type_aliases,
        v,
        names,
    );
    v.visit_end();
}

pub(crate) fn accept_lambda<V>(function: &FunctionRecord, v: &mut V, names: &NameResolver)
where
    V: LambdaVisitor + ?Sized,
{
    if let Some(mut fv) = v.visit_function(
        function.flags,
        names.string(function.name),
        &function_ext(function, names),
    ) {
        accept_function(function, &mut *fv, names);
    }
    v.visit_end();
}

fn accept_declarations<V>(
    functions: &[FunctionRecord],
    properties: &[PropertyRecord],
    type_aliases: &[TypeAliasRecord],
    v: &mut V,
    names: &NameResolver,
) where
    V: DeclarationContainerVisitor + ?Sized,
{
    for function in functions {
        if let Some(mut fv) = v.visit_function(
            function.flags,
            names.string(function.name),
            &function_ext(function, names),
        ) {
            accept_function(function, &mut *fv, names);
        }
    }

    for property in properties {
        let ext = PropertyExt {
            field_name: optional_string(property.field_name, names),
            field_type: optional_string(property.field_type, names),
            getter_signature: optional_string(property.getter_signature, names),
            setter_signature: optional_string(property.setter_signature, names),
            synthetic_method_for_annotations: optional_string(
                property.synthetic_method_for_annotations,
                names,
            ),
        };
        if let Some(mut pv) = v.visit_property(
            property.flags,
            names.string(property.name),
            property.getter_flags,
            property.setter_flags,
            &ext,
        ) {
            accept_property(property, &mut *pv, names);
        }
    }

    for type_alias in type_aliases {
        if let Some(mut tv) = v.visit_type_alias(type_alias.flags, names.string(type_alias.name)) {
            accept_type_alias(type_alias, &mut *tv, names);
        }
    }
}

fn accept_constructor<V>(constructor: &ConstructorRecord, v: &mut V, names: &NameResolver)
where
    V: ConstructorVisitor + ?Sized,
{
    for parameter in &constructor.value_parameters {
        if let Some(mut pv) =
            v.visit_value_parameter(parameter.flags, names.string(parameter.name))
        {
            accept_value_parameter(parameter, &mut *pv, names);
        }
    }
    v.visit_end();
}

fn accept_function<V>(function: &FunctionRecord, v: &mut V, names: &NameResolver)
where
    V: FunctionVisitor + ?Sized,
{
    if let Some(receiver) = &function.receiver_type
        && let Some(mut tv) =
            v.visit_receiver_parameter_type(receiver.flags, &type_ext(receiver, names))
    {
        accept_type(receiver, &mut *tv, names);
    }

    for type_parameter in &function.type_parameters {
        if let Some(mut tv) = v.visit_type_parameter(
            type_parameter.flags,
            names.string(type_parameter.name),
            type_parameter.id,
            type_parameter.variance,
            &type_parameter_ext(type_parameter, names),
        ) {
            accept_type_parameter(type_parameter, &mut *tv, names);
        }
    }

    for parameter in &function.value_parameters {
        if let Some(mut pv) =
            v.visit_value_parameter(parameter.flags, names.string(parameter.name))
        {
            accept_value_parameter(parameter, &mut *pv, names);
        }
    }

    if let Some(return_type) = &function.return_type
        && let Some(mut tv) = v.visit_return_type(return_type.flags, &type_ext(return_type, names))
    {
        accept_type(return_type, &mut *tv, names);
    }

    v.visit_end();
}

fn accept_property<V>(property: &PropertyRecord, v: &mut V, names: &NameResolver)
where
    V: PropertyVisitor + ?Sized,
{
    if let Some(receiver) = &property.receiver_type
        && let Some(mut tv) =
            v.visit_receiver_parameter_type(receiver.flags, &type_ext(receiver, names))
    {
        accept_type(receiver, &mut *tv, names);
    }

    for type_parameter in &property.type_parameters {
        if let Some(mut tv) = v.visit_type_parameter(
            type_parameter.flags,
            names.string(type_parameter.name),
            type_parameter.id,
            type_parameter.variance,
            &type_parameter_ext(type_parameter, names),
        ) {
            accept_type_parameter(type_parameter, &mut *tv, names);
        }
    }

    if let Some(parameter) = &property.setter_parameter
        && let Some(mut pv) =
            v.visit_setter_parameter(parameter.flags, names.string(parameter.name))
    {
        accept_value_parameter(parameter, &mut *pv, names);
    }

    if let Some(return_type) = &property.return_type
        && let Some(mut tv) = v.visit_return_type(return_type.flags, &type_ext(return_type, names))
    {
        accept_type(return_type, &mut *tv, names);
    }

    v.visit_end();
}

fn accept_type_alias<V>(type_alias: &TypeAliasRecord, v: &mut V, names: &NameResolver)
where
    V: TypeAliasVisitor + ?Sized,
{
    for type_parameter in &type_alias.type_parameters {
        if let Some(mut tv) = v.visit_type_parameter(
            type_parameter.flags,
            names.string(type_parameter.name),
            type_parameter.id,
            type_parameter.variance,
            &type_parameter_ext(type_parameter, names),
        ) {
            accept_type_parameter(type_parameter, &mut *tv, names);
        }
    }

    if let Some(underlying) = &type_alias.underlying_type
        && let Some(mut tv) =
            v.visit_underlying_type(underlying.flags, &type_ext(underlying, names))
    {
        accept_type(underlying, &mut *tv, names);
    }

    if let Some(expanded) = &type_alias.expanded_type
        && let Some(mut tv) = v.visit_expanded_type(expanded.flags, &type_ext(expanded, names))
    {
        accept_type(expanded, &mut *tv, names);
    }

    for annotation in &type_alias.annotations {
        v.visit_annotation(&read_annotation(annotation, names));
    }

    v.visit_end();
}

fn accept_type_parameter<V>(type_parameter: &TypeParameterRecord, v: &mut V, names: &NameResolver)
where
    V: TypeParameterVisitor + ?Sized,
{
    for bound in &type_parameter.upper_bounds {
        if let Some(mut tv) = v.visit_upper_bound(bound.flags, &type_ext(bound, names)) {
            accept_type(bound, &mut *tv, names);
        }
    }
    v.visit_end();
}

fn accept_value_parameter<V>(parameter: &ValueParameterRecord, v: &mut V, names: &NameResolver)
where
    V: ValueParameterVisitor + ?Sized,
{
    if let Some(ty) = &parameter.ty
        && let Some(mut tv) = v.visit_type(ty.flags, &type_ext(ty, names))
    {
        accept_type(ty, &mut *tv, names);
    }

    if let Some(element) = &parameter.vararg_element_type
        && let Some(mut tv) = v.visit_vararg_element_type(element.flags, &type_ext(element, names))
    {
        accept_type(element, &mut *tv, names);
    }

    v.visit_end();
}

fn accept_type<V>(ty: &TypeRecord, v: &mut V, names: &NameResolver)
where
    V: TypeVisitor + ?Sized,
{
    match ty.classifier {
        Classifier::Class(id) => v.visit_class(&names.qualified_class_name(id)),
        Classifier::TypeAlias(id) => v.visit_type_alias(&names.qualified_class_name(id)),
        Classifier::TypeParameter(id) => v.visit_type_parameter(id),
    }

    for argument in &ty.arguments {
        match argument {
            TypeArgumentRecord::Star => v.visit_star_projection(),
            TypeArgumentRecord::Projection { variance, ty } => {
                if let Some(mut tv) = v.visit_argument(ty.flags, *variance, &type_ext(ty, names)) {
                    accept_type(ty, &mut *tv, names);
                }
            }
        }
    }

    if let Some(abbreviated) = &ty.abbreviated_type
        && let Some(mut tv) =
            v.visit_abbreviated_type(abbreviated.flags, &type_ext(abbreviated, names))
    {
        accept_type(abbreviated, &mut *tv, names);
    }

    if let Some(outer) = &ty.outer_type
        && let Some(mut tv) = v.visit_outer_type(outer.flags, &type_ext(outer, names))
    {
        accept_type(outer, &mut *tv, names);
    }

    if let Some(upper) = &ty.flexible_upper_bound {
        let flexibility_id = ty.flexibility_id.map(|id| names.string(id));
        if let Some(mut tv) =
            v.visit_flexible_type_upper_bound(upper.flags, flexibility_id, &type_ext(upper, names))
        {
            accept_type(upper, &mut *tv, names);
        }
    }

    v.visit_end();
}

fn function_ext(function: &FunctionRecord, names: &NameResolver) -> FunctionExt {
    FunctionExt {
        signature: optional_string(function.signature, names),
    }
}

fn type_parameter_ext(
    type_parameter: &TypeParameterRecord,
    names: &NameResolver,
) -> TypeParameterExt {
    TypeParameterExt {
        annotations: annotations(&type_parameter.annotations, names),
    }
}

fn type_ext(ty: &TypeRecord, names: &NameResolver) -> TypeExt {
    TypeExt {
        annotations: annotations(&ty.annotations, names),
        is_raw: ty.is_raw,
    }
}

fn annotations(records: &[AnnotationRecord], names: &NameResolver) -> Vec<Annotation> {
    records.iter().map(|a| read_annotation(a, names)).collect()
}

fn optional_string(id: Option<StringId>, names: &NameResolver) -> Option<String> {
    id.map(|id| names.string(id).to_string())
}
