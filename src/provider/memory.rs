use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{metadata::module::Module, provider::MetadataProvider, Error::ModuleNotFound, Result};

/// Serves modules that are already in memory, keyed by path.
///
/// Every load hands out a copy of the stored module with its location set to the requested
/// path (unless the module carries one already). Loads and releases are counted so callers
/// can check that every loaded module was released.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    modules: RefCell<HashMap<PathBuf, Module>>,
    loads: Cell<usize>,
    releases: Cell<usize>,
}

impl MemoryProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `module` under `path`, replacing any module stored there.
    pub fn insert(&self, path: impl Into<PathBuf>, module: Module) {
        self.modules.borrow_mut().insert(path.into(), module);
    }

    /// Number of successful loads so far.
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.get()
    }

    /// Number of releases so far.
    #[must_use]
    pub fn releases(&self) -> usize {
        self.releases.get()
    }
}

impl MetadataProvider for MemoryProvider {
    fn load(&self, path: &Path) -> Result<Module> {
        let mut module = self
            .modules
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| ModuleNotFound(path.to_path_buf()))?;

        if module.location.is_empty() {
            module.location = path.display().to_string();
        }

        self.loads.set(self.loads.get() + 1);
        Ok(module)
    }

    fn unload(&self, module: &Module) {
        self.releases.set(self.releases.get() + 1);
        debug!("memory provider released {}", module.identity.name);
    }
}
