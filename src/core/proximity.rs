use crate::models::{Coordinates, ProviderRecord, ProviderStatus, RankedProvider};
use crate::core::{distance::distance_km, filters::matches_interests, ranking::compare_ranked};

/// Providers closer than this trigger a proximity alert
pub const PROXIMITY_RADIUS_KM: f64 = 5.0;

/// Available providers near the client that match one of their interests
///
/// The client's own profile (`exclude_uid`) is never returned, nor are
/// providers without a stored location. Results are ordered the same way as
/// discovery results.
pub fn nearby_providers(
    location: Coordinates,
    providers: &[ProviderRecord],
    interests: &[String],
    exclude_uid: &str,
) -> Vec<RankedProvider> {
    let mut nearby: Vec<RankedProvider> = providers
        .iter()
        .filter(|p| p.status == ProviderStatus::Available && p.uid != exclude_uid)
        .filter(|p| p.has_stored_location)
        .filter(|p| matches_interests(&p.service_type, interests))
        .filter_map(|p| {
            let distance = distance_km(location, p.coordinates);
            (distance <= PROXIMITY_RADIUS_KM).then(|| RankedProvider {
                provider: p.clone(),
                distance_km: Some(distance),
            })
        })
        .collect();

    nearby.sort_by(compare_ranked);
    nearby
}
