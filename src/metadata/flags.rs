//! ECMA-335 attribute flags carried by type and member descriptors.
//!
//! Descriptors keep the raw attribute words exactly as the metadata provider reported them.
//! This module names the bits of those words and offers the masks needed to pull the access
//! level apart from the modifier bits. The values follow ECMA-335, Partition II:
//!
//! - **TypeAttributes** (II.23.1.15) - visibility, interface, abstract and sealed bits
//! - **MethodAttributes** (II.23.1.10) - member access plus [`MethodModifiers`]
//! - **FieldAttributes** (II.23.1.5) - member access plus the static bit
//! - **ParamAttributes** (II.23.1.13) - [`ParamAttributes`] direction and default bits
//!
//! [`BindingFlags`] is not a metadata structure; it is the selection mask used when
//! enumerating members, mirroring the host runtime's reflection binding flags.

use bitflags::bitflags;

#[allow(non_snake_case)]
/// `TypeAttributes` bits read by type classification.
///
/// The low three bits hold the visibility value: [`TypeAttributes::NOT_PUBLIC`] and
/// [`TypeAttributes::PUBLIC`] for top-level types, the `NESTED_*` values for nested ones.
pub mod TypeAttributes {
    /// Visibility value bits
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Top-level, not visible outside the module
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Top-level, visible everywhere
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Nested, `public`
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    /// Nested, `private`
    pub const NESTED_PRIVATE: u32 = 0x0000_0003;
    /// Nested, `protected`
    pub const NESTED_FAMILY: u32 = 0x0000_0004;
    /// Nested, `internal`
    pub const NESTED_ASSEMBLY: u32 = 0x0000_0005;
    /// Nested, `private protected`
    pub const NESTED_FAM_AND_ASSEM: u32 = 0x0000_0006;
    /// Nested, `protected internal`
    pub const NESTED_FAM_OR_ASSEM: u32 = 0x0000_0007;
    /// Interface semantics
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Cannot be instantiated
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Cannot be derived from
    pub const SEALED: u32 = 0x0000_0100;
}

#[allow(non_snake_case)]
/// Access values shared by `MethodAttributes` and `FieldAttributes`.
///
/// The access level is an enumeration in the low three bits, not a bit set.
pub mod MemberAccess {
    /// Access value bits
    pub const MASK: u32 = 0x0007;
    /// Not referenceable by name; has no accessibility label
    pub const COMPILER_CONTROLLED: u32 = 0x0000;
    /// `private`
    pub const PRIVATE: u32 = 0x0001;
    /// `private protected`
    pub const FAM_AND_ASSEM: u32 = 0x0002;
    /// `internal`
    pub const ASSEMBLY: u32 = 0x0003;
    /// `protected`
    pub const FAMILY: u32 = 0x0004;
    /// `protected internal`
    pub const FAM_OR_ASSEM: u32 = 0x0005;
    /// `public`
    pub const PUBLIC: u32 = 0x0006;
}

#[allow(non_snake_case)]
/// `FieldAttributes` bits outside the access value.
pub mod FieldAttributes {
    /// One value per type instead of per instance
    pub const STATIC: u32 = 0x0010;
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// `MethodAttributes` bits shown in method detail blocks.
    pub struct MethodModifiers: u32 {
        /// Called on the type, not an instance
        const STATIC = 0x0010;
        /// Dispatched through the vtable
        const VIRTUAL = 0x0040;
        /// Declared without a body
        const ABSTRACT = 0x0400;
    }
}

impl MethodModifiers {
    /// The modifier bits of a raw `MethodAttributes` word, access value removed.
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !MemberAccess::MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// `ParamAttributes` bits that change how a parameter renders.
    pub struct ParamAttributes: u32 {
        /// Passed out by reference; renders `out` instead of `ref`
        const OUT = 0x0002;
        /// Carries a default value
        const HAS_DEFAULT = 0x1000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Selection mask for member enumeration.
    ///
    /// A member is selected when its visibility matches `PUBLIC`/`NON_PUBLIC` and its
    /// static-ness matches `INSTANCE`/`STATIC`. Without `DECLARED_ONLY`, inherited
    /// members of base types take part in the enumeration.
    pub struct BindingFlags: u32 {
        /// Only members declared on the queried type itself
        const DECLARED_ONLY = 0x0002;
        /// Instance members
        const INSTANCE = 0x0004;
        /// Static members
        const STATIC = 0x0008;
        /// Public members
        const PUBLIC = 0x0010;
        /// Non-public members
        const NON_PUBLIC = 0x0020;
    }
}

impl BindingFlags {
    /// Public instance and static members, widened to non-public ones on request.
    ///
    /// This is the mask every query command enumerates members with.
    #[must_use]
    pub fn for_visibility(include_non_public: bool) -> Self {
        let mut flags = BindingFlags::PUBLIC | BindingFlags::INSTANCE | BindingFlags::STATIC;
        if include_non_public {
            flags |= BindingFlags::NON_PUBLIC;
        }
        flags
    }

    /// Returns `true` if a member with the given visibility and static-ness is selected.
    #[must_use]
    pub fn selects(self, is_public: bool, is_static: bool) -> bool {
        let visibility = if is_public {
            self.contains(BindingFlags::PUBLIC)
        } else {
            self.contains(BindingFlags::NON_PUBLIC)
        };
        let storage = if is_static {
            self.contains(BindingFlags::STATIC)
        } else {
            self.contains(BindingFlags::INSTANCE)
        };
        visibility && storage
    }
}
