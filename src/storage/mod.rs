//! Storage layer for poolwizard
//!
//! Wizard progress lives in a single JSON key/value file written atomically.

pub mod local_store;
pub mod wizard;

pub use local_store::LocalStore;
pub use wizard::WizardRepository;

use std::sync::Arc;

use crate::config::paths::WizardPaths;
use crate::error::WizardError;

/// Main storage coordinator
pub struct Storage {
    paths: WizardPaths,
    store: Arc<LocalStore>,
    pub wizard: WizardRepository,
}

impl Storage {
    /// Create a new Storage instance and load the key/value file
    pub fn open(paths: WizardPaths) -> Result<Self, WizardError> {
        paths.ensure_directories()?;

        let store = Arc::new(LocalStore::new(paths.local_storage_file()));
        store.load()?;

        Ok(Self {
            wizard: WizardRepository::new(Arc::clone(&store)),
            store,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &WizardPaths {
        &self.paths
    }

    /// Raw key/value store
    pub fn store(&self) -> &LocalStore {
        &self.store
    }
}
