//! Serviço Fácil discovery - proximity-ranked provider discovery
//!
//! This library provides the discovery engine used by the Serviço Fácil
//! marketplace: haversine distances from the caller, criteria and radius
//! filtering, and a premium-first ranking, plus the collaborators that feed
//! it (provider source, preference store, caller location).

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compute_distances, discover, rank, Discovery, distance::haversine_distance};
pub use crate::models::{Coordinates, ProviderRecord, RankedProvider, SearchCriteria, SearchRadius, RIO_DE_JANEIRO_CENTER};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let providers = compute_distances(None, vec![]);
        assert!(rank(&providers, &SearchCriteria::default()).is_empty());
        assert_eq!(SearchRadius::default().km(), 5);
    }
}
