//! Metadata snapshot provider.
//!
//! A metadata snapshot is a JSON document describing one module, written by an external
//! metadata extractor. Its top level is a [`Module`]:
//!
//! ```json
//! {
//!   "identity": { "name": "Acme", "version": "1.0.0.0" },
//!   "types": [
//!     { "namespace": "Acme", "name": "Gear", "flags": 1,
//!       "base": { "kind": "named", "name": "Object", "full_name": "System.Object" } }
//!   ],
//!   "referenced_types": [ { "namespace": "System", "name": "Object", "flags": 1 } ],
//!   "resources": [ { "name": "Acme.icons.resources", "size": 2048 } ]
//! }
//! ```
//!
//! Type entries are decoded one at a time. An entry that does not decode is skipped with a
//! warning and the rest of the module loads normally.

use std::{fs, io::ErrorKind, path::Path};

use log::{debug, warn};
use memmap2::Mmap;
use serde_json::{Map, Value};

use crate::{
    metadata::{module::Module, typesystem::TypeDescriptor},
    provider::MetadataProvider,
    Error::{Error, FileError, ModuleNotFound},
    Result,
};

/// Loads modules from metadata snapshot files.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnapshotProvider;

impl SnapshotProvider {
    /// Create a snapshot provider.
    #[must_use]
    pub fn new() -> Self {
        SnapshotProvider
    }

    /// Decode a snapshot document.
    ///
    /// # Errors
    /// Returns an error if `data` is not JSON, its top level is not an object, the `types`
    /// or `referenced_types` members are not arrays, or the module fields do not decode.
    pub fn parse(data: &[u8]) -> Result<Module> {
        let mut document: Value = serde_json::from_slice(data)?;
        let root = document
            .as_object_mut()
            .ok_or_else(|| malformed_error!("Snapshot root is not an object"))?;

        let types = take_array(root, "types")?;
        let referenced = take_array(root, "referenced_types")?;

        let mut module: Module = serde_json::from_value(document)?;
        module.types = decode_types(types, "types");
        module.referenced_types = decode_types(referenced, "referenced_types");
        Ok(module)
    }
}

impl MetadataProvider for SnapshotProvider {
    fn load(&self, path: &Path) -> Result<Module> {
        let location = match path.canonicalize() {
            Ok(location) => location,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(ModuleNotFound(path.to_path_buf()))
            }
            Err(error) => return Err(FileError(error)),
        };

        let file = match fs::File::open(&location) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        let data = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(Error(error.to_string())),
        };
        debug!("mapped {} bytes from {}", data.len(), location.display());

        let mut module = Self::parse(&data)?;
        module.location = location.display().to_string();
        Ok(module)
    }
}

/// Remove an array member from the snapshot root; a missing member is an empty array.
fn take_array(root: &mut Map<String, Value>, key: &str) -> Result<Vec<Value>> {
    match root.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => Ok(entries),
        Some(_) => Err(malformed_error!("Snapshot member '{}' is not an array", key)),
    }
}

fn decode_types(entries: Vec<Value>, section: &str) -> Vec<TypeDescriptor> {
    let total = entries.len();
    let types: Vec<TypeDescriptor> = entries
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, entry)| match serde_json::from_value::<TypeDescriptor>(entry) {
                Ok(ty) => Some(ty),
                Err(error) => {
                    warn!("skipping {section}[{index}]: {error}");
                    None
                }
            },
        )
        .collect();

    if types.len() < total {
        warn!(
            "loaded {} of {} entries in '{}'",
            types.len(),
            total,
            section
        );
    }
    types
}
