//! Shared application state for axum handlers.

use std::sync::Arc;

use lumina_app::registry::LightRegistry;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so only the `Arc` wrapper is cloned.
pub struct AppState {
    /// Running lights, by name.
    pub registry: Arc<LightRegistry>,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl AppState {
    /// Create a new application state from a populated registry.
    #[must_use]
    pub fn new(registry: LightRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}
