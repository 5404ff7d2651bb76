//! Connected CLI session
//!
//! Resolves connection settings, builds the signing client and wires up the
//! controller with local storage and the activity log.

use std::sync::Arc;

use crate::audit::ActivityLogger;
use crate::chain::{AlloyChain, BlockSource};
use crate::config::{ConnectionOptions, Settings, WizardPaths};
use crate::error::{WizardError, WizardResult};
use crate::services::{BlockExplorer, WizardController};
use crate::storage::Storage;

/// A connected chain client plus the controller that uses it
pub struct Session {
    chain: Arc<AlloyChain>,
    explorer_page_size: u64,
    pub controller: WizardController,
}

impl Session {
    /// Connect without touching the network
    ///
    /// Missing or malformed connection settings fail here as a connection
    /// error.
    pub fn connect(
        paths: &WizardPaths,
        settings: &Settings,
        options: ConnectionOptions,
    ) -> WizardResult<Self> {
        let config = options.resolve(settings)?;
        let chain = Arc::new(
            config
                .connect()
                .map_err(|err| WizardError::connection(&err))?,
        );

        let storage = Storage::open(paths.clone())?;
        let activity = ActivityLogger::new(paths.activity_log());
        let controller = WizardController::new(chain.clone(), storage, activity, settings);

        Ok(Self {
            chain,
            explorer_page_size: settings.explorer_page_size,
            controller,
        })
    }

    /// Load progress and reconcile it with the pool
    pub async fn start(&mut self) -> WizardResult<()> {
        self.controller.start().await
    }

    /// Block explorer over the same client
    pub fn explorer(&self) -> BlockExplorer {
        let source: Arc<dyn BlockSource> = self.chain.clone();
        BlockExplorer::new(source, self.explorer_page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_rpc_url_is_a_connection_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WizardPaths::with_base_dir(temp_dir.path().to_path_buf());

        let err = Session::connect(&paths, &Settings::default(), ConnectionOptions::default())
            .err()
            .unwrap();

        assert!(matches!(err, WizardError::Connection(_)));
        assert_eq!(err.banner(), "Failed to initialize contract");
    }
}
