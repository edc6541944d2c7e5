//! The loaded module snapshot.
//!
//! A [`Module`] is everything a metadata provider extracted from one compiled module: its
//! identity, where it was loaded from, the types it defines, descriptors of the external
//! types those definitions build on, manifest resources and the entry point. It is created
//! once per invocation and never modified while commands run against it.

use serde::{Deserialize, Serialize};

use crate::metadata::{identity::ModuleIdentity, typesystem::TypeDescriptor};

/// A manifest resource embedded in the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource name
    pub name: String,
    /// Size of the resource data in bytes
    #[serde(default)]
    pub size: u64,
}

/// The method the runtime starts executing in an executable module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Qualified name of the declaring type
    pub declaring_type: String,
    /// Method name
    pub method: String,
}

/// Metadata of one loaded module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Name, version, culture and key
    pub identity: ModuleIdentity,
    /// Absolute path the module was loaded from; set by the provider
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    /// File names of the module's constituent files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Types defined in the module, in enumeration order
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
    /// External types referenced by definitions; never listed or looked up by identifier
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referenced_types: Vec<TypeDescriptor>,
    /// Manifest resources, in module order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    /// The entry point of an executable module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<EntryPoint>,
}

impl Module {
    /// Create an empty module with the given identity.
    #[must_use]
    pub fn new(identity: ModuleIdentity) -> Self {
        Module {
            identity,
            ..Default::default()
        }
    }

    /// The module file names; the primary file when none were recorded.
    #[must_use]
    pub fn file_names(&self) -> Vec<String> {
        if !self.files.is_empty() {
            return self.files.clone();
        }

        let primary = std::path::Path::new(&self.location)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.dll", self.identity.name));
        vec![primary]
    }
}
