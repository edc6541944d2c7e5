//! Metadata providers and the scoped load context.
//!
//! A [`MetadataProvider`] turns a module path into a [`Module`] snapshot. The crate ships two:
//!
//! - [`SnapshotProvider`] - reads a JSON metadata snapshot produced by an external extractor
//! - [`MemoryProvider`] - serves modules that are already in memory
//!
//! Commands never talk to a provider directly. They run inside a [`LoadContext`], which loads
//! the module when opened and hands it back to the provider when dropped, so the module is
//! released on every exit path, including unwinding.
//!
//! # Examples
//!
//! ```rust
//! use std::path::Path;
//! use dotinspect::metadata::{identity::ModuleIdentity, module::Module};
//! use dotinspect::provider::{LoadContext, MemoryProvider};
//!
//! let provider = MemoryProvider::new();
//! provider.insert("/modules/Acme.dll", Module::new(ModuleIdentity::new("Acme", "1.0.0.0")));
//!
//! {
//!     let context = LoadContext::open(&provider, Path::new("/modules/Acme.dll"))?;
//!     assert_eq!(context.module().identity.name, "Acme");
//! }
//! assert_eq!(provider.loads(), 1);
//! assert_eq!(provider.releases(), 1);
//! # Ok::<(), dotinspect::Error>(())
//! ```

use std::path::Path;

use log::debug;

use crate::{metadata::module::Module, Result};

mod memory;
mod snapshot;

pub use memory::MemoryProvider;
pub use snapshot::SnapshotProvider;

/// Source of module metadata.
pub trait MetadataProvider {
    /// Load the module at `path`.
    ///
    /// A provider that can only enumerate part of the module returns what it could load;
    /// failing here means nothing usable was found.
    ///
    /// # Errors
    /// Returns an error if the module does not exist or cannot be interpreted.
    fn load(&self, path: &Path) -> Result<Module>;

    /// Called once when a module obtained from [`MetadataProvider::load`] goes out of use.
    fn unload(&self, _module: &Module) {}
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn load(&self, path: &Path) -> Result<Module> {
        (**self).load(path)
    }

    fn unload(&self, module: &Module) {
        (**self).unload(module);
    }
}

/// A loaded module, released back to its provider when dropped.
pub struct LoadContext<'p, P: MetadataProvider + ?Sized> {
    provider: &'p P,
    module: Module,
}

impl<'p, P: MetadataProvider + ?Sized> LoadContext<'p, P> {
    /// Load the module at `path` through `provider`.
    ///
    /// # Errors
    /// Returns the provider's error if the module cannot be loaded.
    pub fn open(provider: &'p P, path: &Path) -> Result<Self> {
        debug!("loading module {}", path.display());
        let module = provider.load(path)?;
        debug!(
            "loaded module {} with {} types",
            module.identity.name,
            module.types.len()
        );

        Ok(LoadContext { provider, module })
    }

    /// The loaded module.
    #[must_use]
    pub fn module(&self) -> &Module {
        &self.module
    }
}

impl<P: MetadataProvider + ?Sized> Drop for LoadContext<'_, P> {
    fn drop(&mut self) {
        self.provider.unload(&self.module);
        debug!("released module {}", self.module.identity.name);
    }
}
