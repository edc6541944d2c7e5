//! Accessibility classification for types and members.
//!
//! The accessibility of a type depends on two inputs: whether the type is nested, and the
//! three visibility bits of its [`TypeAttributes`]. Member accessibility depends only on the
//! three access bits of its [`MemberAccess`] word. Both are resolved through fixed lookup
//! tables; a combination absent from its table classifies as [`Visibility::Unknown`] instead
//! of failing, so malformed metadata still renders.
//!
//! # Examples
//!
//! ```rust
//! use dotinspect::metadata::{flags::TypeAttributes, visibility::{classify_type, Visibility}};
//!
//! assert_eq!(classify_type(false, TypeAttributes::PUBLIC), Visibility::Public);
//! assert_eq!(classify_type(true, TypeAttributes::NESTED_FAM_OR_ASSEM), Visibility::ProtectedInternal);
//! // A top-level type cannot carry a nested visibility value.
//! assert_eq!(classify_type(false, TypeAttributes::NESTED_PRIVATE), Visibility::Unknown);
//! ```

use strum::{Display, EnumIter};

use crate::metadata::flags::{MemberAccess, TypeAttributes};

/// Accessibility label of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Visibility {
    /// Accessible everywhere
    #[strum(serialize = "public")]
    Public,
    /// Accessible to the declaring type and derived types
    #[strum(serialize = "protected")]
    Protected,
    /// Accessible to derived types or anything in the same module
    #[strum(serialize = "protected internal")]
    ProtectedInternal,
    /// Accessible to anything in the same module
    #[strum(serialize = "internal")]
    Internal,
    /// Accessible to the declaring type only
    #[strum(serialize = "private")]
    Private,
    /// Accessible to derived types in the same module
    #[strum(serialize = "private protected")]
    PrivateProtected,
    /// The flag combination has no defined meaning
    #[strum(serialize = "unknown")]
    Unknown,
}

/// `(is_nested, visibility bits) -> label` for types.
const TYPE_VISIBILITY: [(bool, u32, Visibility); 8] = [
    (false, TypeAttributes::PUBLIC, Visibility::Public),
    (false, TypeAttributes::NOT_PUBLIC, Visibility::Internal),
    (true, TypeAttributes::NESTED_PUBLIC, Visibility::Public),
    (true, TypeAttributes::NESTED_FAMILY, Visibility::Protected),
    (
        true,
        TypeAttributes::NESTED_FAM_OR_ASSEM,
        Visibility::ProtectedInternal,
    ),
    (true, TypeAttributes::NESTED_PRIVATE, Visibility::Private),
    (true, TypeAttributes::NESTED_ASSEMBLY, Visibility::Internal),
    (
        true,
        TypeAttributes::NESTED_FAM_AND_ASSEM,
        Visibility::PrivateProtected,
    ),
];

/// `access bits -> label` for methods, fields and accessors.
const MEMBER_ACCESS: [(u32, Visibility); 6] = [
    (MemberAccess::PUBLIC, Visibility::Public),
    (MemberAccess::FAMILY, Visibility::Protected),
    (MemberAccess::FAM_OR_ASSEM, Visibility::ProtectedInternal),
    (MemberAccess::ASSEMBLY, Visibility::Internal),
    (MemberAccess::PRIVATE, Visibility::Private),
    (MemberAccess::FAM_AND_ASSEM, Visibility::PrivateProtected),
];

/// Classify a type from its nesting and raw `TypeAttributes`.
#[must_use]
pub fn classify_type(is_nested: bool, flags: u32) -> Visibility {
    let bits = flags & TypeAttributes::VISIBILITY_MASK;
    TYPE_VISIBILITY
        .iter()
        .find(|(nested, value, _)| *nested == is_nested && *value == bits)
        .map_or(Visibility::Unknown, |(_, _, label)| *label)
}

/// Classify a member from its raw method or field attributes.
#[must_use]
pub fn classify_member(flags: u32) -> Visibility {
    let bits = flags & MemberAccess::MASK;
    MEMBER_ACCESS
        .iter()
        .find(|(value, _)| *value == bits)
        .map_or(Visibility::Unknown, |(_, label)| *label)
}

/// Whether a type counts as public for enumeration filters.
///
/// Nested types are public when nested-public, nested-family or nested-family-or-assembly;
/// top-level types when publicly visible.
#[must_use]
pub fn is_type_public(is_nested: bool, flags: u32) -> bool {
    let bits = flags & TypeAttributes::VISIBILITY_MASK;
    if is_nested {
        matches!(
            bits,
            TypeAttributes::NESTED_PUBLIC
                | TypeAttributes::NESTED_FAMILY
                | TypeAttributes::NESTED_FAM_OR_ASSEM
        )
    } else {
        bits == TypeAttributes::PUBLIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn type_table_covers_every_nested_value() {
        let labels: Vec<String> = (0..8)
            .map(|bits| classify_type(true, bits).to_string())
            .collect();
        assert_eq!(
            labels,
            vec![
                "unknown",
                "unknown",
                "public",
                "private",
                "protected",
                "internal",
                "private protected",
                "protected internal",
            ]
        );
    }

    #[test]
    fn type_table_top_level() {
        assert_eq!(classify_type(false, 0), Visibility::Internal);
        assert_eq!(classify_type(false, 1), Visibility::Public);
        for bits in 2..8 {
            assert_eq!(classify_type(false, bits), Visibility::Unknown);
        }
    }

    #[test]
    fn type_table_ignores_unrelated_bits() {
        let flags = TypeAttributes::PUBLIC | TypeAttributes::SEALED | TypeAttributes::ABSTRACT;
        assert_eq!(classify_type(false, flags), Visibility::Public);
    }

    #[test]
    fn member_table() {
        assert_eq!(classify_member(MemberAccess::PUBLIC), Visibility::Public);
        assert_eq!(classify_member(MemberAccess::FAMILY), Visibility::Protected);
        assert_eq!(
            classify_member(MemberAccess::FAM_AND_ASSEM),
            Visibility::PrivateProtected
        );
        assert_eq!(
            classify_member(MemberAccess::COMPILER_CONTROLLED),
            Visibility::Unknown
        );
        assert_eq!(classify_member(0x0007), Visibility::Unknown);
        assert_eq!(classify_member(MemberAccess::PRIVATE | 0x0010), Visibility::Private);
    }

    #[test]
    fn public_partition() {
        assert!(is_type_public(false, TypeAttributes::PUBLIC));
        assert!(!is_type_public(false, TypeAttributes::NOT_PUBLIC));
        assert!(is_type_public(true, TypeAttributes::NESTED_PUBLIC));
        assert!(is_type_public(true, TypeAttributes::NESTED_FAMILY));
        assert!(is_type_public(true, TypeAttributes::NESTED_FAM_OR_ASSEM));
        assert!(!is_type_public(true, TypeAttributes::NESTED_ASSEMBLY));
        assert!(!is_type_public(true, TypeAttributes::NESTED_PRIVATE));
        assert!(!is_type_public(true, TypeAttributes::NESTED_FAM_AND_ASSEM));
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<String> = Visibility::iter().map(|v| v.to_string()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 7);
    }
}
