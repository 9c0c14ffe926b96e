//! A store instance: current state plus the machinery around it.

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::reducer::CoreReducer;
use crate::resolution::{ResolutionRegistry, ResolutionTracker};
use crate::selectors::CoreSelectors;
use crate::state::CoreState;
use crate::Action;
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the current [`CoreState`] and replaces it on every dispatch.
#[derive(Debug)]
pub struct CoreStore {
    config: StoreConfig,
    reducer: CoreReducer,
    state: CoreState,
    resolution: Arc<ResolutionRegistry>,
    selectors: CoreSelectors,
}

impl CoreStore {
    /// Creates a store with its own [`ResolutionRegistry`].
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        Self::with_registry(config, Arc::new(ResolutionRegistry::new()))
    }

    /// Creates a store whose selectors consult a shared registry.
    pub fn with_registry(config: StoreConfig, resolution: Arc<ResolutionRegistry>) -> StoreResult<Self> {
        config.validate()?;
        let reducer = CoreReducer::new(config.entities.clone());
        let state = reducer.initial_state();
        let tracker: Arc<dyn ResolutionTracker> = resolution.clone();
        let selectors = CoreSelectors::new(&config.store_key, tracker);
        info!(
            store_key = %config.store_key,
            entities = config.entities.len(),
            "core data store created"
        );
        Ok(Self {
            config,
            reducer,
            state,
            resolution,
            selectors,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn state(&self) -> &CoreState {
        &self.state
    }

    pub fn selectors(&self) -> &CoreSelectors {
        &self.selectors
    }

    pub fn resolution(&self) -> &Arc<ResolutionRegistry> {
        &self.resolution
    }

    /// Reduces `action` into a new state and makes it current.
    pub fn dispatch(&mut self, action: &Action) {
        self.state = self.reducer.reduce(&self.state, action);
        debug!(store_key = %self.config.store_key, action = action.kind(), "action dispatched");
    }

    /// Runs `f` against the selectors and the current state.
    pub fn select<R>(&self, f: impl FnOnce(&CoreSelectors, &CoreState) -> R) -> R {
        f(&self.selectors, &self.state)
    }
}
