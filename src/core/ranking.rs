use std::cmp::Ordering;
use crate::models::RankedProvider;

/// Ordering of discovery results
///
/// Premium providers come first regardless of distance. Within the same tier
/// providers are ordered by ascending distance, and providers whose distance
/// is unknown sort after every provider with a known distance.
///
/// Meant for a stable sort: equal elements keep their input order.
pub fn compare_ranked(a: &RankedProvider, b: &RankedProvider) -> Ordering {
    b.provider
        .is_premium
        .cmp(&a.provider.is_premium)
        .then_with(|| compare_distance(a.distance_km, b.distance_km))
}

#[inline]
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
