use std::collections::BTreeSet;

use crate::{
    catalog::Catalog,
    format,
    metadata::members::MemberKind,
    Result,
};

/// `summary`: identity, location, files, type counts and namespaces.
pub(super) fn summary(catalog: &Catalog<'_>) -> Result<Vec<String>> {
    let module = catalog.module();
    let types: Vec<_> = catalog.get_types(true, true).collect();
    let public = types.iter().filter(|ty| ty.is_public()).count();

    let namespaces: BTreeSet<&str> = types.iter().filter_map(|ty| ty.namespace()).collect();

    let mut lines = vec![
        format!("Name: {}", module.identity.name),
        format!(
            "Version: {}",
            module.identity.version.as_deref().unwrap_or_default()
        ),
        format!("Location: {}", module.location),
        format!("Modules: {}", module.file_names().join(", ")),
        format!(
            "Types: {} (public {}, nonpublic {})",
            types.len(),
            public,
            types.len() - public
        ),
        format!("Namespaces: {}", namespaces.len()),
    ];
    lines.extend(namespaces.into_iter().map(str::to_string));
    Ok(lines)
}

/// `resources`: `name (N bytes)` per manifest resource.
pub(super) fn resources(catalog: &Catalog<'_>) -> Result<Vec<String>> {
    Ok(catalog
        .module()
        .resources
        .iter()
        .map(|resource| format!("{} ({} bytes)", resource.name, resource.size))
        .collect())
}

/// `entrypoint`: the entry point method and, when it resolves, its signature.
pub(super) fn entry_point(catalog: &Catalog<'_>) -> Result<Vec<String>> {
    let Some(entry) = &catalog.module().entry_point else {
        return Ok(vec!["EntryPoint: none".to_string()]);
    };

    let mut lines = vec![format!(
        "EntryPoint: {}.{}",
        entry.declaring_type, entry.method
    )];

    let resolved = catalog.find_type(&entry.declaring_type).and_then(|ty| {
        ty.declared(MemberKind::Method)
            .filter_map(|member| member.as_method())
            .find(|method| method.name == entry.method)
            .map(|method| format::members::method(ty, method))
    });
    lines.extend(resolved);
    Ok(lines)
}
