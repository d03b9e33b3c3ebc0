use crate::models::{ProviderRecord, RankedProvider};

/// Case-insensitive substring check
#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Returns the filter text only when it is set and non-empty
#[inline]
pub(crate) fn active(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.is_empty())
}

/// Stage 1: service type contains the filter text
#[inline]
pub fn matches_service_type(provider: &ProviderRecord, filter: &str) -> bool {
    contains_ignore_case(&provider.service_type, filter)
}

/// Stage 2: neighborhood equals the filter value exactly
#[inline]
pub fn matches_neighborhood(provider: &ProviderRecord, filter: &str) -> bool {
    provider.neighborhood == filter
}

/// Stage 3: display name or service type contains the search text
#[inline]
pub fn matches_search_text(provider: &ProviderRecord, text: &str) -> bool {
    contains_ignore_case(&provider.display_name, text)
        || contains_ignore_case(&provider.service_type, text)
}

/// Stage 4: within the search radius.
///
/// Providers without a known distance always pass.
#[inline]
pub fn within_radius(provider: &RankedProvider, radius_km: f64) -> bool {
    match provider.distance_km {
        Some(distance) => distance <= radius_km,
        None => true,
    }
}

/// Does the service type match any of the client's interests?
///
/// An empty interest list matches everything.
pub fn matches_interests(service_type: &str, interests: &[String]) -> bool {
    interests.is_empty()
        || interests
            .iter()
            .any(|interest| contains_ignore_case(service_type, interest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, ProviderStatus};

    fn create_test_provider(name: &str, service_type: &str, neighborhood: &str) -> ProviderRecord {
        ProviderRecord {
            uid: "test_provider".to_string(),
            display_name: name.to_string(),
            photo_url: None,
            service_type: service_type.to_string(),
            neighborhood: neighborhood.to_string(),
            rating: 4.5,
            review_count: 10,
            status: ProviderStatus::Available,
            coordinates: Coordinates::new(-22.9068, -43.1729),
            has_stored_location: true,
            is_premium: false,
        }
    }

    #[test]
    fn test_service_type_substring() {
        let provider = create_test_provider("Carlos", "Eletricista", "Centro");

        assert!(matches_service_type(&provider, "eletric"));
        assert!(matches_service_type(&provider, "ELETRICISTA"));
        assert!(!matches_service_type(&provider, "Encanador"));
    }

    #[test]
    fn test_neighborhood_is_exact() {
        let provider = create_test_provider("Carlos", "Eletricista", "Barra da Tijuca");

        assert!(matches_neighborhood(&provider, "Barra da Tijuca"));
        assert!(!matches_neighborhood(&provider, "Tijuca"));
        assert!(!matches_neighborhood(&provider, "barra da tijuca"));
    }

    #[test]
    fn test_search_text_matches_name_or_service() {
        let provider = create_test_provider("Maria Souza", "Diarista", "Lapa");

        assert!(matches_search_text(&provider, "maria"));
        assert!(matches_search_text(&provider, "diar"));
        assert!(!matches_search_text(&provider, "Lapa"));
    }

    #[test]
    fn test_within_radius_unknown_distance() {
        let provider = create_test_provider("Carlos", "Eletricista", "Centro");

        let unknown = RankedProvider { provider: provider.clone(), distance_km: None };
        assert!(within_radius(&unknown, 1.0));

        let far = RankedProvider { provider: provider.clone(), distance_km: Some(12.3) };
        assert!(!within_radius(&far, 10.0));

        let edge = RankedProvider { provider, distance_km: Some(10.0) };
        assert!(within_radius(&edge, 10.0));
    }

    #[test]
    fn test_matches_interests() {
        assert!(matches_interests("Eletricista", &[]));
        assert!(matches_interests("Eletricista", &["pintor".to_string(), "eletri".to_string()]));
        assert!(!matches_interests("Eletricista", &["pintor".to_string()]));
    }

    #[test]
    fn test_active_filter() {
        assert_eq!(active(Some("x")), Some("x"));
        assert_eq!(active(Some("")), None);
        assert_eq!(active(None), None);
    }
}
