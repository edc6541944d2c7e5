//! Canonical type names and type labels.

use std::fmt;

use crate::metadata::typesystem::{TypeDescriptor, TypeKind, TypeRef};

/// Canonical rendering of a type reference.
///
/// - closed generics: the open definition's qualified name up to the arity backtick, followed
///   by the canonical arguments, e.g. `System.Collections.Generic.Dictionary<System.String, System.Int32>`
/// - arrays: the canonical element followed by `[]`, with one comma per extra dimension
/// - by-reference types: the canonical element followed by `&`
/// - everything else: the qualified name, or the simple name when there is none
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, full_name } => f.write_str(full_name.as_deref().unwrap_or(name)),
            TypeRef::Generic {
                definition,
                arguments,
            } => {
                let outer = definition.split('`').next().unwrap_or(definition);
                write!(f, "{outer}<")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(">")
            }
            TypeRef::Array { element, rank } => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                write!(f, "{element}[{commas}]")
            }
            TypeRef::ByRef { element } => write!(f, "{element}&"),
        }
    }
}

/// The kind label of a type: `interface`, `enum`, `struct`, `static class` or `class`.
#[must_use]
pub fn kind_label(ty: &TypeDescriptor) -> &'static str {
    if ty.is_interface() {
        return "interface";
    }

    match ty.kind {
        TypeKind::Enum => "enum",
        TypeKind::Struct => "struct",
        _ if ty.is_static() => "static class",
        _ => "class",
    }
}

/// `QualifiedName [accessibility] [kind]`
#[must_use]
pub fn type_line(ty: &TypeDescriptor) -> String {
    format!(
        "{} [{}] [{}]",
        ty.full_name(),
        ty.accessibility(),
        kind_label(ty)
    )
}

/// Language keywords for the built-in types, `(keyword, qualified name)`.
const KEYWORDS: [(&str, &str); 16] = [
    ("bool", "System.Boolean"),
    ("byte", "System.Byte"),
    ("sbyte", "System.SByte"),
    ("char", "System.Char"),
    ("short", "System.Int16"),
    ("ushort", "System.UInt16"),
    ("int", "System.Int32"),
    ("uint", "System.UInt32"),
    ("long", "System.Int64"),
    ("ulong", "System.UInt64"),
    ("float", "System.Single"),
    ("double", "System.Double"),
    ("decimal", "System.Decimal"),
    ("string", "System.String"),
    ("object", "System.Object"),
    ("void", "System.Void"),
];

/// The language keyword for a built-in type, e.g. `int` for `System.Int32`.
#[must_use]
pub fn keyword_alias(full_name: &str) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|(_, name)| *name == full_name)
        .map(|(keyword, _)| *keyword)
}

/// Canonical names of a list of type references, joined by `, `.
#[must_use]
pub fn join(types: &[TypeRef]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
