//! Structured export model.
//!
//! The `dump-json` command serializes a [`ModuleModel`] tree. Keys are PascalCase so the
//! document matches what reflection-based tooling on the host runtime produces:
//!
//! ```json
//! {
//!   "Name": "Acme",
//!   "Version": "1.0.0.0",
//!   "Location": "/modules/Acme.dll",
//!   "Types": [
//!     {
//!       "FullName": "Acme.Gear",
//!       "Accessibility": "public",
//!       "Kind": "class",
//!       "BaseType": "System.Object",
//!       "Interfaces": [],
//!       "Attributes": [],
//!       "Members": []
//!     }
//!   ]
//! }
//! ```

use serde::Serialize;

use crate::{
    catalog::Catalog,
    format::{self, types::kind_label},
    metadata::{
        flags::BindingFlags, members::MemberKind, module::Module, typesystem::TypeDescriptor,
    },
};

/// Member kinds included in the export, in output order. Constructors are not exported.
const EXPORTED_KINDS: [MemberKind; 4] = [
    MemberKind::Method,
    MemberKind::Property,
    MemberKind::Field,
    MemberKind::Event,
];

/// The exported module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleModel {
    /// Module name
    pub name: String,
    /// Module version
    pub version: Option<String>,
    /// Absolute path of the loaded module
    pub location: String,
    /// Exported types
    pub types: Vec<TypeModel>,
}

/// One exported type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeModel {
    /// Qualified name
    pub full_name: String,
    /// Accessibility label
    pub accessibility: String,
    /// Kind label
    pub kind: String,
    /// Canonical name of the base type
    pub base_type: Option<String>,
    /// Canonical names of all implemented interfaces, ordinal order
    pub interfaces: Vec<String>,
    /// Rendered attributes
    pub attributes: Vec<String>,
    /// Members; empty unless members were requested
    pub members: Vec<MemberModel>,
}

/// One exported member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemberModel {
    /// `method`, `property`, `field` or `event`
    pub kind: String,
    /// Member name
    pub name: String,
    /// Rendered signature
    pub signature: String,
}

impl ModuleModel {
    /// An export of `module` without types.
    #[must_use]
    pub fn new(module: &Module) -> Self {
        ModuleModel {
            name: module.identity.name.clone(),
            version: module.identity.version.clone(),
            location: module.location.clone(),
            types: Vec::new(),
        }
    }
}

/// Build the export entry of one type.
#[must_use]
pub fn type_model<'m>(
    catalog: &Catalog<'m>,
    ty: &'m TypeDescriptor,
    include_members: bool,
    include_non_public: bool,
) -> TypeModel {
    let mut interfaces: Vec<String> = catalog
        .interfaces_of(ty)
        .into_iter()
        .map(ToString::to_string)
        .collect();
    interfaces.sort();

    let members = if include_members {
        let flags = BindingFlags::for_visibility(include_non_public);
        EXPORTED_KINDS
            .iter()
            .flat_map(|kind| catalog.members(ty, *kind, flags))
            .map(|entry| MemberModel {
                kind: entry.member.kind().to_string(),
                name: entry.member.name().to_string(),
                signature: format::members::member(
                    entry.declaring_type,
                    entry.member,
                    include_non_public,
                ),
            })
            .collect()
    } else {
        Vec::new()
    };

    TypeModel {
        full_name: ty.full_name(),
        accessibility: ty.accessibility().to_string(),
        kind: kind_label(ty).to_string(),
        base_type: ty.base.as_ref().map(ToString::to_string),
        interfaces,
        attributes: format::attributes::render_all(&ty.attributes),
        members,
    }
}
