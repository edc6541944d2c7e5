use std::str::FromStr;

use crate::{
    catalog::{Catalog, MemberEntry},
    format::{self, types::keyword_alias},
    metadata::{
        members::{MemberKind, MethodDescriptor},
        typesystem::TypeRef,
    },
    options::OptionSet,
    query::{binding_flags, include_non_public, type_with_remainder},
    utils::eq_ignore_case,
    Error, Result,
};

/// Output order of `members`.
const LISTED_KINDS: [MemberKind; 5] = [
    MemberKind::Method,
    MemberKind::Constructor,
    MemberKind::Property,
    MemberKind::Field,
    MemberKind::Event,
];

/// `members`: the members of one type, grouped by kind.
pub(super) fn list(catalog: &Catalog<'_>, options: &OptionSet) -> Result<Vec<String>> {
    let (ty, remainder) = type_with_remainder(catalog, options);
    let ty = ty.ok_or(Error::TypeNotFound)?;

    let tokens: Vec<&str> = options
        .get_all("kind")
        .chain(remainder.iter().map(String::as_str))
        .collect();
    let selected: Vec<MemberKind> = if tokens.is_empty() {
        LISTED_KINDS.to_vec()
    } else {
        tokens
            .iter()
            .filter_map(|token| MemberKind::from_str(token.trim()).ok())
            .collect()
    };

    let include_non_public = include_non_public(options);
    let flags = binding_flags(options);
    let mut lines = Vec::new();

    for kind in LISTED_KINDS.into_iter().filter(|kind| selected.contains(kind)) {
        let mut rendered: Vec<(String, String)> = catalog
            .members(ty, kind, flags)
            .into_iter()
            .map(|entry| {
                let signature =
                    format::members::member(entry.declaring_type, entry.member, include_non_public);
                (entry.member.name().to_string(), signature)
            })
            .collect();

        if kind == MemberKind::Constructor {
            rendered.sort_by(|left, right| left.1.cmp(&right.1));
        } else {
            rendered.sort_by(|left, right| left.0.cmp(&right.0));
        }
        lines.extend(rendered.into_iter().map(|(_, signature)| signature));
    }

    Ok(lines)
}

/// `method`: detailed blocks for every overload matching the name and parameter filter.
pub(super) fn method(catalog: &Catalog<'_>, options: &OptionSet) -> Result<Vec<String>> {
    let (ty, remainder) = type_with_remainder(catalog, options);
    let ty = ty.ok_or(Error::TypeNotFound)?;

    let name = options
        .first_of(&["method", "member", "name"])
        .or_else(|| remainder.first().map(String::as_str))
        .filter(|name| !name.trim().is_empty())
        .ok_or(Error::MissingArgument("Method name"))?;

    let filter: Option<Vec<&str>> = options
        .get("parameters")
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect()
        });

    let candidates: Vec<MemberEntry<'_>> = catalog
        .members(ty, MemberKind::Method, binding_flags(options))
        .into_iter()
        .filter(|entry| eq_ignore_case(entry.member.name(), name))
        .filter(|entry| match (&filter, entry.member.as_method()) {
            (Some(types), Some(method)) => parameters_match(method, types),
            _ => true,
        })
        .collect();

    if candidates.is_empty() {
        return Err(Error::MethodNotFound);
    }

    Ok(candidates
        .into_iter()
        .filter_map(|entry| {
            entry
                .member
                .as_method()
                .map(|method| format::members::method_details(entry.declaring_type, method))
        })
        .flatten()
        .collect())
}

/// Arity must match; each parameter matches its canonical name, simple name or keyword.
fn parameters_match(method: &MethodDescriptor, types: &[&str]) -> bool {
    method.parameters.len() == types.len()
        && method
            .parameters
            .iter()
            .zip(types)
            .all(|(parameter, wanted)| type_matches(&parameter.parameter_type, wanted))
}

fn type_matches(reference: &TypeRef, wanted: &str) -> bool {
    let canonical = reference.to_string();
    eq_ignore_case(&canonical, wanted)
        || eq_ignore_case(&reference.simple_name(), wanted)
        || keyword_alias(&canonical).is_some_and(|keyword| eq_ignore_case(keyword, wanted))
}
