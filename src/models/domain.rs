use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Rio de Janeiro city center.
///
/// Used as the fallback for providers without stored coordinates, and by
/// callers that want a default caller location when the device cannot
/// report one.
pub const RIO_DE_JANEIRO_CENTER: Coordinates = Coordinates::new(-22.9068, -43.1729);

/// Availability of a provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderStatus {
    #[default]
    #[serde(rename = "available", alias = "disponivel")]
    Available,
    #[serde(rename = "busy", alias = "ocupado")]
    Busy,
}

/// Account role as stored on the user document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "prestador")]
    Provider,
    #[serde(rename = "contratante")]
    Client,
}

impl UserRole {
    /// Value stored in the backend's `userType` field
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Provider => "prestador",
            UserRole::Client => "contratante",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw provider document as returned by the backend.
///
/// Every field is optional here; [`ProviderDocument::into_record`] decides
/// whether the document is usable for discovery. A field holding a value of
/// the wrong type reads as absent instead of failing the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub uid: Option<String>,
    #[serde(rename = "displayName", default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL", default, deserialize_with = "lenient")]
    pub photo_url: Option<String>,
    #[serde(rename = "serviceType", default, deserialize_with = "lenient")]
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub neighborhood: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(rename = "reviewCount", default, deserialize_with = "lenient_count")]
    pub review_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<ProviderStatus>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
    #[serde(rename = "isPremium", default, deserialize_with = "lenient")]
    pub is_premium: Option<bool>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Numbers stored either as JSON numbers or numeric strings
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    Ok(match lenient::<D, NumberOrString>(deserializer)? {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::String(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    }
    .filter(|n| n.is_finite()))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as u32))
}

impl ProviderDocument {
    /// Normalize into a [`ProviderRecord`].
    ///
    /// Returns `None` when display name, service type or neighborhood is
    /// missing or empty. Missing coordinates are replaced by `fallback` and
    /// the record is flagged as having no stored location.
    pub fn into_record(self, fallback: Coordinates) -> Option<ProviderRecord> {
        let display_name = non_empty(self.display_name)?;
        let service_type = non_empty(self.service_type)?;
        let neighborhood = non_empty(self.neighborhood)?;
        let has_stored_location = self.latitude.is_some() && self.longitude.is_some();

        Some(ProviderRecord {
            uid: self.uid.unwrap_or_default(),
            display_name,
            photo_url: self.photo_url,
            service_type,
            neighborhood,
            rating: self.rating.unwrap_or(0.0),
            review_count: self.review_count.unwrap_or(0),
            status: self.status.unwrap_or_default(),
            coordinates: Coordinates {
                latitude: self.latitude.unwrap_or(fallback.latitude),
                longitude: self.longitude.unwrap_or(fallback.longitude),
            },
            has_stored_location,
            is_premium: self.is_premium.unwrap_or(false),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Normalized provider profile consumed by the discovery engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub uid: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none", default)]
    pub photo_url: Option<String>,
    #[serde(rename = "serviceType")]
    pub service_type: String,
    pub neighborhood: String,
    pub rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: u32,
    pub status: ProviderStatus,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    /// False when `coordinates` is the fallback point
    #[serde(rename = "hasStoredLocation", default = "stored_location_default")]
    pub has_stored_location: bool,
    #[serde(rename = "isPremium")]
    pub is_premium: bool,
}

fn stored_location_default() -> bool {
    true
}

/// Provider annotated with its distance from the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProvider {
    #[serde(flatten)]
    pub provider: ProviderRecord,
    #[serde(rename = "distanceKm", skip_serializing_if = "Option::is_none", default)]
    pub distance_km: Option<f64>,
}

/// Caller-selected filters applied by [`crate::core::rank`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(rename = "serviceType", default)]
    pub service_type_filter: Option<String>,
    #[serde(rename = "neighborhood", default)]
    pub neighborhood_filter: Option<String>,
    #[serde(rename = "searchText", default)]
    pub search_text: Option<String>,
    #[serde(rename = "radiusKm", default)]
    pub radius_km: Option<f64>,
}

/// Query parameters for fetching providers from a [`crate::services::ProviderSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderFilter {
    pub role: UserRole,
    pub must_be_profile_complete: bool,
    pub limit: Option<usize>,
}

impl Default for ProviderFilter {
    fn default() -> Self {
        Self {
            role: UserRole::Provider,
            must_be_profile_complete: true,
            limit: Some(50),
        }
    }
}
