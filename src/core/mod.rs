// Core algorithm exports
pub mod discovery;
pub mod distance;
pub mod filters;
pub mod proximity;
pub mod ranking;

pub use discovery::{compute_distances, discover, rank, Discovery};
pub use distance::{distance_km, haversine_distance};
pub use filters::{contains_ignore_case, matches_interests, matches_neighborhood, matches_search_text, matches_service_type, within_radius};
pub use proximity::{nearby_providers, PROXIMITY_RADIUS_KM};
pub use ranking::compare_ranked;
