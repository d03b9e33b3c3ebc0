// Model exports
pub mod catalog;
pub mod domain;
pub mod radius;
pub mod requests;
pub mod responses;

pub use catalog::{find_service, ServiceCategory, NEIGHBORHOODS, SERVICES};
pub use domain::{Coordinates, ProviderDocument, ProviderFilter, ProviderRecord, ProviderStatus, RankedProvider, SearchCriteria, UserRole, RIO_DE_JANEIRO_CENTER};
pub use radius::{InvalidRadius, SearchRadius, DEFAULT_RADIUS_KM, RADIUS_OPTIONS_KM};
pub use requests::{DiscoverRequest, NearbyAlertsRequest, UpdateRadiusRequest};
pub use responses::{CatalogResponse, DiscoverResponse, ErrorResponse, HealthResponse, NearbyAlertsResponse, RadiusResponse};
