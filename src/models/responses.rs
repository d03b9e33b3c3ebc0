use serde::{Deserialize, Serialize};
use crate::models::catalog::ServiceCategory;
use crate::models::domain::RankedProvider;

/// Response for the discover endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub providers: Vec<RankedProvider>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "radiusKm")]
    pub radius_km: u32,
    #[serde(rename = "locationKnown")]
    pub location_known: bool,
}

/// Stored search radius for an owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiusResponse {
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(rename = "radiusKm")]
    pub radius_km: u32,
    pub options: Vec<u32>,
}

/// Providers that should trigger a proximity alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyAlertsResponse {
    pub alerts: Vec<RankedProvider>,
}

/// Fixed filter values offered to clients
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub services: &'static [ServiceCategory],
    pub neighborhoods: &'static [&'static str],
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
