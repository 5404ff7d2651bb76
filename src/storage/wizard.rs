//! Wizard progress repository
//!
//! Maps [`WizardState`] onto four string keys of the [`LocalStore`]:
//! `currentStep`, `deployedTokens`, `stepsCompleted` and `poolInitialized`.
//! Reads never fail on bad content; a value that does not parse falls back
//! to its default and the rest of the state is kept.

use std::sync::Arc;

use tracing::warn;

use super::local_store::LocalStore;
use crate::error::WizardError;
use crate::models::{DeployedTokens, StepsCompleted, WizardState, WizardStep};

pub const KEY_CURRENT_STEP: &str = "currentStep";
pub const KEY_DEPLOYED_TOKENS: &str = "deployedTokens";
pub const KEY_STEPS_COMPLETED: &str = "stepsCompleted";
pub const KEY_POOL_INITIALIZED: &str = "poolInitialized";

/// Repository for persisted wizard progress
pub struct WizardRepository {
    store: Arc<LocalStore>,
}

impl WizardRepository {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Read the persisted state, defaulting anything absent or malformed
    pub fn load(&self) -> Result<WizardState, WizardError> {
        let mut state = WizardState::default();

        if let Some(raw) = self.store.get(KEY_CURRENT_STEP)? {
            state.current_step = WizardStep::parse_lenient(&raw);
        }

        if let Some(raw) = self.store.get(KEY_DEPLOYED_TOKENS)? {
            match serde_json::from_str::<DeployedTokens>(&raw) {
                Ok(tokens) => state.deployed_tokens = tokens,
                Err(e) => warn!(key = KEY_DEPLOYED_TOKENS, error = %e, "ignoring malformed value"),
            }
        }

        if let Some(raw) = self.store.get(KEY_STEPS_COMPLETED)? {
            match serde_json::from_str::<StepsCompleted>(&raw) {
                Ok(steps) => state.steps_completed = steps,
                Err(e) => warn!(key = KEY_STEPS_COMPLETED, error = %e, "ignoring malformed value"),
            }
        }

        if let Some(raw) = self.store.get(KEY_POOL_INITIALIZED)? {
            state.pool_initialized = raw.trim() == "true";
        }

        Ok(state)
    }

    /// Write every key of the state in one store update
    pub fn save(&self, state: &WizardState) -> Result<(), WizardError> {
        let tokens = serde_json::to_string(&state.deployed_tokens)?;
        let steps = serde_json::to_string(&state.steps_completed)?;

        self.store.set_many([
            (KEY_CURRENT_STEP, state.current_step.number().to_string()),
            (KEY_DEPLOYED_TOKENS, tokens),
            (KEY_STEPS_COMPLETED, steps),
            (KEY_POOL_INITIALIZED, state.pool_initialized.to_string()),
        ])
    }

    /// Forget all wizard progress
    pub fn clear(&self) -> Result<(), WizardError> {
        self.store.remove(&[
            KEY_CURRENT_STEP,
            KEY_DEPLOYED_TOKENS,
            KEY_STEPS_COMPLETED,
            KEY_POOL_INITIALIZED,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, WizardRepository) {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(LocalStore::new(temp_dir.path().join("local_storage.json")));
        (temp_dir, WizardRepository::new(store))
    }

    #[test]
    fn test_empty_store_gives_default_state() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.load().unwrap(), WizardState::default());
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, repo) = create_test_repo();
        let mut state = WizardState::default();
        state.deployed_tokens = DeployedTokens::new("0xaa", "0xbb");
        state.pool_initialized = true;
        state.complete_step(WizardStep::Initialize);

        repo.save(&state).unwrap();
        assert_eq!(repo.load().unwrap(), state);
    }

    #[test]
    fn test_persisted_value_shapes() {
        let (_temp_dir, repo) = create_test_repo();
        let mut state = WizardState::default();
        state.complete_step(WizardStep::Initialize);
        repo.save(&state).unwrap();

        let store = &repo.store;
        assert_eq!(store.get(KEY_CURRENT_STEP).unwrap().as_deref(), Some("2"));
        assert_eq!(
            store.get(KEY_STEPS_COMPLETED).unwrap().as_deref(),
            Some(r#"{"1":true,"2":false,"3":false}"#)
        );
        assert_eq!(
            store.get(KEY_POOL_INITIALIZED).unwrap().as_deref(),
            Some("false")
        );
        assert_eq!(
            store.get(KEY_DEPLOYED_TOKENS).unwrap().as_deref(),
            Some(r#"{"token0":"","token1":""}"#)
        );
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let (_temp_dir, repo) = create_test_repo();
        repo.store
            .set_many([
                (KEY_CURRENT_STEP, "9".to_string()),
                (KEY_DEPLOYED_TOKENS, "{not json".to_string()),
                (KEY_STEPS_COMPLETED, r#"{"2":true}"#.to_string()),
                (KEY_POOL_INITIALIZED, "yes".to_string()),
            ])
            .unwrap();

        let state = repo.load().unwrap();
        assert_eq!(state.current_step, WizardStep::Initialize);
        assert_eq!(state.deployed_tokens, DeployedTokens::default());
        assert!(state.steps_completed.is_complete(WizardStep::Approve));
        assert!(!state.pool_initialized);
    }

    #[test]
    fn test_clear() {
        let (_temp_dir, repo) = create_test_repo();
        let mut state = WizardState::default();
        state.complete_step(WizardStep::Initialize);
        repo.save(&state).unwrap();

        repo.clear().unwrap();
        assert_eq!(repo.load().unwrap(), WizardState::default());
    }
}
