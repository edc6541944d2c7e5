use crate::{
    catalog::Catalog,
    format::types::kind_label,
    options::OptionSet,
    query::{identifier, include_non_public, resolve_type},
    utils::cmp_ignore_case,
    Error, Result,
};

/// `inheritance`: the type and its bases up to the root, most-derived first.
pub(super) fn inheritance(catalog: &Catalog<'_>, options: &OptionSet) -> Result<Vec<String>> {
    let ty = resolve_type(catalog, options, &["type"])?;
    Ok(catalog.inheritance_chain(ty))
}

/// `implements`: every module type assignable to the reference type, except itself.
pub(super) fn implements(catalog: &Catalog<'_>, options: &OptionSet) -> Result<Vec<String>> {
    let reference = identifier(options, &["type", "interface"])
        .filter(|value| !value.trim().is_empty())
        .ok_or(Error::MissingArgument("Type or interface"))?;
    let target = catalog
        .find_type(reference)
        .ok_or(Error::ReferenceTypeNotFound)?;

    let mut types: Vec<_> = catalog
        .get_types(true, include_non_public(options))
        .filter(|ty| !std::ptr::eq(*ty, target) && catalog.is_assignable(target, *ty))
        .collect();
    types.sort_by(|left, right| cmp_ignore_case(&left.full_name(), &right.full_name()));

    Ok(types
        .into_iter()
        .map(|ty| format!("{} [{}]", ty.full_name(), kind_label(ty)))
        .collect())
}
