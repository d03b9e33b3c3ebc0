use crate::models::{Coordinates, ProviderRecord, RankedProvider, SearchCriteria};
use crate::core::{
    distance::distance_km,
    filters::{active, matches_neighborhood, matches_search_text, matches_service_type, within_radius},
    ranking::compare_ranked,
};

/// Result of a discovery run
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pub providers: Vec<RankedProvider>,
    pub total_candidates: usize,
}

/// Annotate each provider with its distance from the caller
///
/// When the caller location is unknown every distance is left as `None`,
/// which turns the radius filter into a no-op and sends everyone to the end
/// of their tier. Order and cardinality are preserved.
pub fn compute_distances(
    caller_location: Option<Coordinates>,
    providers: Vec<ProviderRecord>,
) -> Vec<RankedProvider> {
    providers
        .into_iter()
        .map(|provider| {
            let distance_km = caller_location.map(|caller| distance_km(caller, provider.coordinates));
            RankedProvider { provider, distance_km }
        })
        .collect()
}

/// Filter and order providers for display
///
/// # Pipeline Stages
/// 1. Service type (case-insensitive substring)
/// 2. Neighborhood (exact)
/// 3. Free-text search over name and service type
/// 4. Search radius, skipped for providers without a distance
/// 5. Stable sort: premium first, then nearest first
pub fn rank(providers: &[RankedProvider], criteria: &SearchCriteria) -> Vec<RankedProvider> {
    let service_type = active(criteria.service_type_filter.as_deref());
    let neighborhood = active(criteria.neighborhood_filter.as_deref());
    let search_text = active(criteria.search_text.as_deref());

    let mut ranked: Vec<RankedProvider> = providers
        .iter()
        .filter(|p| service_type.map_or(true, |f| matches_service_type(&p.provider, f)))
        .filter(|p| neighborhood.map_or(true, |f| matches_neighborhood(&p.provider, f)))
        .filter(|p| search_text.map_or(true, |t| matches_search_text(&p.provider, t)))
        .filter(|p| criteria.radius_km.map_or(true, |r| within_radius(p, r)))
        .cloned()
        .collect();

    ranked.sort_by(compare_ranked);
    ranked
}

/// Run the full discovery pipeline over a snapshot of providers
pub fn discover(
    caller_location: Option<Coordinates>,
    providers: Vec<ProviderRecord>,
    criteria: &SearchCriteria,
) -> Discovery {
    let total_candidates = providers.len();
    let with_distances = compute_distances(caller_location, providers);
    let providers = rank(&with_distances, criteria);

    tracing::debug!(
        "Ranked {} of {} providers (location known: {})",
        providers.len(),
        total_candidates,
        caller_location.is_some()
    );

    Discovery {
        providers,
        total_candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderStatus;

    fn create_provider(
        id: &str,
        service_type: &str,
        neighborhood: &str,
        lat: f64,
        lon: f64,
        is_premium: bool,
    ) -> ProviderRecord {
        ProviderRecord {
            uid: id.to_string(),
            display_name: format!("Provider {}", id),
            photo_url: None,
            service_type: service_type.to_string(),
            neighborhood: neighborhood.to_string(),
            rating: 4.0,
            review_count: 3,
            status: ProviderStatus::Available,
            coordinates: Coordinates::new(lat, lon),
            has_stored_location: true,
            is_premium,
        }
    }

    fn caller() -> Coordinates {
        Coordinates::new(-22.9068, -43.1729)
    }

    #[test]
    fn test_compute_distances_without_location() {
        let providers = vec![
            create_provider("1", "Pintor", "Centro", -22.91, -43.18, false),
            create_provider("2", "Pintor", "Centro", -22.95, -43.20, false),
        ];

        let ranked = compute_distances(None, providers);

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|p| p.distance_km.is_none()));
        assert_eq!(ranked[0].provider.uid, "1");
    }

    #[test]
    fn test_compute_distances_with_location() {
        let providers = vec![create_provider("1", "Pintor", "Centro", -22.90, -43.17, false)];

        let ranked = compute_distances(Some(Coordinates::new(-22.91, -43.18)), providers);

        let distance = ranked[0].distance_km.expect("distance");
        assert!(distance > 1.3 && distance < 1.6, "got {}", distance);
    }

    #[test]
    fn test_rank_applies_all_filters() {
        let providers = compute_distances(
            Some(caller()),
            vec![
                create_provider("1", "Eletricista", "Centro", -22.91, -43.18, false),
                create_provider("2", "Eletricista", "Lapa", -22.91, -43.18, false),
                create_provider("3", "Encanador", "Centro", -22.91, -43.18, false),
                create_provider("4", "Eletricista", "Centro", -23.50, -43.90, false),
            ],
        );

        let criteria = SearchCriteria {
            service_type_filter: Some("eletri".to_string()),
            neighborhood_filter: Some("Centro".to_string()),
            search_text: None,
            radius_km: Some(5.0),
        };

        let result = rank(&providers, &criteria);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].provider.uid, "1");
    }

    #[test]
    fn test_empty_filters_are_skipped() {
        let providers = compute_distances(
            None,
            vec![
                create_provider("1", "Pintor", "Centro", -22.91, -43.18, false),
                create_provider("2", "Chaveiro", "Lapa", -22.91, -43.18, false),
            ],
        );

        let criteria = SearchCriteria {
            service_type_filter: Some(String::new()),
            neighborhood_filter: Some(String::new()),
            search_text: Some(String::new()),
            radius_km: None,
        };

        assert_eq!(rank(&providers, &criteria).len(), 2);
    }

    #[test]
    fn test_rank_orders_premium_then_distance() {
        let providers = compute_distances(
            Some(caller()),
            vec![
                create_provider("near", "Pintor", "Centro", -22.910, -43.175, false),
                create_provider("far_premium", "Pintor", "Centro", -22.990, -43.200, true),
                create_provider("mid", "Pintor", "Centro", -22.930, -43.180, false),
            ],
        );

        let result = rank(&providers, &SearchCriteria::default());
        let order: Vec<_> = result.iter().map(|p| p.provider.uid.as_str()).collect();

        assert_eq!(order, vec!["far_premium", "near", "mid"]);
    }

    #[test]
    fn test_discover_counts_candidates() {
        let providers = vec![
            create_provider("1", "Pintor", "Centro", -22.91, -43.18, false),
            create_provider("2", "Pintor", "Centro", -25.00, -45.00, false),
        ];

        let criteria = SearchCriteria {
            radius_km: Some(10.0),
            ..Default::default()
        };

        let result = discover(Some(caller()), providers, &criteria);

        assert_eq!(result.total_candidates, 2);
        assert_eq!(result.providers.len(), 1);
    }
}
