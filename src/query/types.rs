use crate::{
    catalog::Catalog,
    format::{
        self,
        types::{kind_label, type_line},
    },
    options::OptionSet,
    query::resolve_type,
    utils::{cmp_ignore_case, contains_ignore_case, eq_ignore_case, starts_with_ignore_case},
    Result,
};

/// `types`: filtered, sorted type listing.
pub(super) fn list(catalog: &Catalog<'_>, options: &OptionSet) -> Result<Vec<String>> {
    let public = options.has("public");
    let non_public = options.has("nonpublic");
    let mut types: Vec<_> = catalog
        .get_types(!non_public || public, !public || non_public)
        .collect();

    if let Some(prefix) = options.get("namespace").filter(|v| !v.trim().is_empty()) {
        types.retain(|ty| starts_with_ignore_case(ty.namespace().unwrap_or_default(), prefix));
    }

    if let Some(filter) = options.get("filter").filter(|v| !v.trim().is_empty()) {
        types.retain(|ty| contains_ignore_case(&ty.full_name(), filter));
    }

    if let Some(base) = options.get("base").filter(|v| !v.trim().is_empty()) {
        match catalog.find_type(base) {
            Some(target) => types.retain(|ty| {
                !std::ptr::eq(*ty, target) && catalog.is_assignable(target, *ty)
            }),
            None => types.retain(|ty| {
                ty.base
                    .as_ref()
                    .and_then(|reference| reference.full_name())
                    .is_some_and(|name| eq_ignore_case(name, base))
            }),
        }
    }

    types.sort_by(|left, right| cmp_ignore_case(&left.full_name(), &right.full_name()));
    Ok(types.into_iter().map(type_line).collect())
}

/// `type`: details of one type.
pub(super) fn details(catalog: &Catalog<'_>, options: &OptionSet) -> Result<Vec<String>> {
    let ty = resolve_type(catalog, options, &["type", "name"])?;

    let mut lines = vec![
        format!("FullName: {}", ty.full_name()),
        format!("Namespace: {}", ty.namespace().unwrap_or_default()),
        format!("AssemblyQualifiedName: {}", catalog.assembly_qualified_name(ty)),
        format!("Accessibility: {}", ty.accessibility()),
        format!("Kind: {}", kind_label(ty)),
        format!("Abstract: {}", ty.is_abstract()),
        format!("Sealed: {}", ty.is_sealed()),
        format!("Static: {}", ty.is_static()),
        format!("Generic: {}", ty.is_generic()),
    ];

    if ty.is_generic() {
        lines.push(format!(
            "GenericArguments: {}",
            format::types::join(&ty.generic_arguments)
        ));
    }

    if let Some(base) = &ty.base {
        lines.push(format!("BaseType: {base}"));
    }

    let mut interfaces: Vec<String> = catalog
        .interfaces_of(ty)
        .into_iter()
        .map(ToString::to_string)
        .collect();
    if !interfaces.is_empty() {
        interfaces.sort();
        lines.push("Interfaces:".to_string());
        lines.extend(interfaces);
    }

    if !ty.attributes.is_empty() {
        lines.push("Attributes:".to_string());
        lines.extend(format::attributes::render_all(&ty.attributes));
    }

    let mut nested = catalog.nested_types(ty);
    if !nested.is_empty() {
        nested.sort_by(|left, right| cmp_ignore_case(&left.full_name(), &right.full_name()));
        lines.push("NestedTypes:".to_string());
        lines.extend(nested.into_iter().map(type_line));
    }

    Ok(lines)
}
