// Route exports
pub mod discovery;
pub mod preferences;

use actix_web::web;
use std::sync::Arc;
use crate::models::{Coordinates, ProviderFilter};
use crate::services::{ProviderFeed, ProviderSource, ProximityNotifier, SearchPreferences};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ProviderSource>,
    pub preferences: SearchPreferences,
    /// Background snapshots; when absent every request queries `source`
    pub feed: Option<Arc<ProviderFeed>>,
    pub notifier: Arc<ProximityNotifier>,
    pub provider_filter: ProviderFilter,
    /// Substituted when a request carries no caller location
    pub fallback_location: Option<Coordinates>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(discovery::configure)
            .configure(preferences::configure),
    );
}
