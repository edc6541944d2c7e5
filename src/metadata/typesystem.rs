//! Type references and type descriptors.
//!
//! A [`TypeDescriptor`] describes one type declared in (or referenced by) the inspected module:
//! its names, raw [`TypeAttributes`] flags, kind, base type, interfaces, generic arguments,
//! attributes and members. Descriptors are produced once by the metadata provider and never
//! change afterwards.
//!
//! A [`TypeRef`] is how a type is *referenced* from a signature: the base type of a class,
//! a parameter type, the element type of an array. References are structural; turning one
//! into the descriptor it names is the job of [`crate::catalog::Catalog::resolve`].
//!
//! # Names
//!
//! Qualified names follow the host runtime's conventions:
//!
//! - `Namespace.Name` for top-level types, `Name` when there is no namespace
//! - `Outer+Name` for nested types
//! - `` Name`N `` for generic type definitions with `N` type parameters
//!
//! # Examples
//!
//! ```rust
//! use dotinspect::metadata::typesystem::TypeRef;
//!
//! let list = TypeRef::generic(
//!     "System.Collections.Generic.List`1",
//!     vec![TypeRef::named("System.String")],
//! );
//! assert_eq!(list.simple_name(), "List`1");
//! assert_eq!(list.to_string(), "System.Collections.Generic.List<System.String>");
//! ```

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

use crate::metadata::{
    attributes::AttributeInstance,
    flags::TypeAttributes,
    members::{Member, MemberKind},
    visibility::{self, Visibility},
};

/// Qualified name of the type every method without a return value returns.
pub const VOID: &str = "System.Void";

/// Highest array rank the runtime accepts.
pub const MAX_ARRAY_RANK: u32 = 32;

fn array_rank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let rank = u32::deserialize(deserializer)?;
    if (1..=MAX_ARRAY_RANK).contains(&rank) {
        Ok(rank)
    } else {
        Err(D::Error::custom(format!(
            "array rank {rank} outside 1..={MAX_ARRAY_RANK}"
        )))
    }
}

/// A reference to a type as it appears in a signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A plain type, or a generic parameter when `full_name` is absent
    Named {
        /// Simple name, e.g. `Int32` or `T`
        name: String,
        /// Qualified name, e.g. `System.Int32`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        full_name: Option<String>,
    },
    /// A closed generic type such as `List<int>`
    Generic {
        /// Qualified name of the open generic definition, including the arity suffix
        definition: String,
        /// Type arguments, in declaration order
        arguments: Vec<TypeRef>,
    },
    /// An array of `element` with `rank` dimensions
    Array {
        /// Element type
        element: Box<TypeRef>,
        /// Number of dimensions, `1..=MAX_ARRAY_RANK`
        #[serde(deserialize_with = "array_rank")]
        rank: u32,
    },
    /// A managed pointer, used for `ref` and `out` parameters
    ByRef {
        /// The pointed-to type
        element: Box<TypeRef>,
    },
}

impl TypeRef {
    /// Reference a type by its qualified name; the simple name is derived.
    #[must_use]
    pub fn named(full_name: &str) -> Self {
        TypeRef::Named {
            name: simple_name_of(full_name).to_string(),
            full_name: Some(full_name.to_string()),
        }
    }

    /// Reference a generic parameter, which has no qualified name.
    #[must_use]
    pub fn generic_parameter(name: &str) -> Self {
        TypeRef::Named {
            name: name.to_string(),
            full_name: None,
        }
    }

    /// Reference a closed generic type.
    #[must_use]
    pub fn generic(definition: &str, arguments: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            definition: definition.to_string(),
            arguments,
        }
    }

    /// Reference an array type.
    #[must_use]
    pub fn array(element: TypeRef, rank: u32) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            rank,
        }
    }

    /// Reference a by-reference type.
    #[must_use]
    pub fn by_ref(element: TypeRef) -> Self {
        TypeRef::ByRef {
            element: Box::new(element),
        }
    }

    /// `System.Void`
    #[must_use]
    pub fn void() -> Self {
        TypeRef::named(VOID)
    }

    /// The simple (unqualified) name the host runtime reports for this type.
    #[must_use]
    pub fn simple_name(&self) -> String {
        match self {
            TypeRef::Named { name, .. } => name.clone(),
            TypeRef::Generic { definition, .. } => simple_name_of(definition).to_string(),
            TypeRef::Array { element, rank } => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                format!("{}[{commas}]", element.simple_name())
            }
            TypeRef::ByRef { element } => format!("{}&", element.simple_name()),
        }
    }

    /// The qualified name of a plain type reference.
    ///
    /// Generic parameters and constructed types (generic instances, arrays, by-reference
    /// types) return `None`.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { full_name, .. } => full_name.as_deref(),
            _ => None,
        }
    }

    /// The qualified name of the type definition this reference is built from.
    ///
    /// For plain types this is [`TypeRef::full_name`]; for closed generics the open
    /// definition. Used to look up the descriptor behind a reference.
    #[must_use]
    pub fn definition_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { full_name, .. } => full_name.as_deref(),
            TypeRef::Generic { definition, .. } => Some(definition),
            _ => None,
        }
    }

    /// Returns `true` for by-reference types.
    #[must_use]
    pub fn is_by_ref(&self) -> bool {
        matches!(self, TypeRef::ByRef { .. })
    }

    /// The pointed-to type of a by-reference type, or the type itself.
    #[must_use]
    pub fn strip_by_ref(&self) -> &TypeRef {
        match self {
            TypeRef::ByRef { element } => element,
            other => other,
        }
    }
}

/// The text after the last namespace (`.`) or nesting (`+`) separator.
fn simple_name_of(full_name: &str) -> &str {
    full_name
        .rfind(['.', '+'])
        .map_or(full_name, |pos| &full_name[pos + 1..])
}

/// Declared category of a type.
///
/// Static classes are not a separate kind: they are classes flagged both abstract and sealed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TypeKind {
    /// Reference type
    #[default]
    Class,
    /// Value type
    Struct,
    /// Interface
    Interface,
    /// Enumeration
    Enum,
}

/// Metadata of one declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Simple name, including the generic arity suffix if any
    pub name: String,
    /// Namespace; absent or empty for types in the global namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Qualified name of the enclosing type, for nested types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<String>,
    /// Raw `TypeAttributes`
    #[serde(default)]
    pub flags: u32,
    /// Declared category
    #[serde(default)]
    pub kind: TypeKind,
    /// Base type; absent for interfaces and the root object type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeRef>,
    /// Directly implemented interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,
    /// Generic parameters of a generic definition
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_arguments: Vec<TypeRef>,
    /// Custom attributes applied to the type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInstance>,
    /// Declared members, in metadata order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
}

impl TypeDescriptor {
    /// Create a top-level class descriptor with the given namespace, name and flags.
    #[must_use]
    pub fn new(namespace: &str, name: &str, flags: u32) -> Self {
        TypeDescriptor {
            name: name.to_string(),
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            declaring_type: None,
            flags,
            kind: TypeKind::Class,
            base: None,
            interfaces: Vec::new(),
            generic_arguments: Vec::new(),
            attributes: Vec::new(),
            members: Vec::new(),
        }
    }

    /// The qualified name: `Namespace.Name`, `Outer+Name` for nested types.
    #[must_use]
    pub fn full_name(&self) -> String {
        if let Some(outer) = &self.declaring_type {
            return format!("{outer}+{}", self.name);
        }
        match self.namespace() {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// The namespace, treating an empty one as absent.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    /// Returns `true` if the type is declared inside another type.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.declaring_type.is_some()
    }

    /// Returns `true` if the type counts as public for enumeration filters.
    #[must_use]
    pub fn is_public(&self) -> bool {
        visibility::is_type_public(self.is_nested(), self.flags)
    }

    /// The accessibility label of the type.
    #[must_use]
    pub fn accessibility(&self) -> Visibility {
        visibility::classify_type(self.is_nested(), self.flags)
    }

    /// Returns `true` if the type is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface || self.flags & TypeAttributes::INTERFACE != 0
    }

    /// Returns `true` if the type is flagged abstract.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags & TypeAttributes::ABSTRACT != 0
    }

    /// Returns `true` if the type is flagged sealed.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.flags & TypeAttributes::SEALED != 0
    }

    /// Returns `true` for static classes (abstract and sealed).
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_abstract() && self.is_sealed()
    }

    /// Returns `true` if the type declares generic parameters.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_arguments.is_empty()
    }

    /// Declared members of one kind, in metadata order.
    pub fn declared(&self, kind: MemberKind) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(move |member| member.kind() == kind)
    }
}
