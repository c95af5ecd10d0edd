// Application state module
// Everything a request handler needs, built once at startup and read-only afterwards

use super::types::Config;
use crate::assets::Delivery;
use crate::detect::DetectClient;
use crate::reports::DocumentStore;
use crate::routing::RouteTable;

/// Application state
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    pub delivery: Delivery,
    pub reports: DocumentStore,
    /// Unset when no detection service is configured
    pub detector: Option<DetectClient>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, String> {
        Ok(Self {
            config: config.clone(),
            routes: RouteTable::new(),
            delivery: Delivery::from_config(config)?,
            reports: DocumentStore::new(&config.reports.data_dir),
            detector: config.detect.service_url.as_deref().map(DetectClient::new),
        })
    }
}
