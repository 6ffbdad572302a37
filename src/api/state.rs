//! Application state for the cost engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::MAX_GROSS_UP_ITERATIONS;
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded configuration and the solver settings. The engine itself
/// is stateless, so this is all handlers share.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    max_gross_up_iterations: u32,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            max_gross_up_iterations: MAX_GROSS_UP_ITERATIONS,
        }
    }

    /// Overrides the gross-up iteration ceiling.
    pub fn with_gross_up_limit(mut self, max_iterations: u32) -> Self {
        self.max_gross_up_iterations = max_iterations;
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the gross-up iteration ceiling.
    pub fn max_gross_up_iterations(&self) -> u32 {
        self.max_gross_up_iterations
    }
}
