use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to discover providers around the caller
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscoverRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "owner_id", rename = "ownerId")]
    pub owner_id: String,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(alias = "service_type", rename = "serviceType", default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(alias = "search_text", rename = "searchText", default)]
    pub search_text: Option<String>,
    /// Overrides the stored radius preference for this request only
    #[serde(alias = "radius_km", rename = "radiusKm", default)]
    pub radius_km: Option<u32>,
}

/// Request to persist a search radius preference
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRadiusRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "owner_id", rename = "ownerId")]
    pub owner_id: String,
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: u32,
}

/// Request to compute proximity alerts for a client's current position
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyAlertsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    pub interests: Vec<String>,
}
