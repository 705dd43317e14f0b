//! Shared state handed to every handler

use crate::config::ReportsConfig;
use crate::store::EntityStore;
use std::sync::Arc;

/// Application state: the entity store plus report settings
#[derive(Clone)]
pub struct AppState {
    pub store: EntityStore,
    pub reports: Arc<ReportsConfig>,
}

impl AppState {
    pub fn new(store: EntityStore, reports: ReportsConfig) -> Self {
        Self {
            store,
            reports: Arc::new(reports),
        }
    }
}
