//! Application state shared across all handlers

use std::sync::Arc;

use anchorset_persistence::CalculatorPersistence;

use super::config::{AdminCredentials, Configuration};

/// Application state shared across all handlers
///
/// `store` is `None` when no database is configured: reads serve the bundled
/// defaults and mutations answer 503.
#[derive(Clone)]
pub struct AppState {
    pub configuration: Configuration,
    pub store: Option<Arc<dyn CalculatorPersistence>>,
    pub admin_credentials: AdminCredentials,
    pub fallback_prefix: String,
}

impl AppState {
    pub fn new(
        configuration: Configuration,
        store: Option<Arc<dyn CalculatorPersistence>>,
    ) -> Self {
        let admin_credentials = configuration.admin_credentials();
        let fallback_prefix = configuration.fallback_prefix();
        Self {
            configuration,
            store,
            admin_credentials,
            fallback_prefix,
        }
    }

    pub fn store(&self) -> Option<&dyn CalculatorPersistence> {
        self.store.as_deref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configuration", &self.configuration)
            .field(
                "store",
                &self.store.as_ref().map(|s| s.storage_backend().to_string()),
            )
            .field("admin_auth", &!self.admin_credentials.is_open())
            .field("fallback_prefix", &self.fallback_prefix)
            .finish()
    }
}
