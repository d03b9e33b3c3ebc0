use async_trait::async_trait;
use thiserror::Error;
use crate::models::Coordinates;

/// Errors that can occur when resolving the caller's position
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Source of the caller's current position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<Coordinates, LocationError>;
}

/// A position known up front, such as one reported in a request body
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(Option<Coordinates>);

impl FixedLocation {
    pub fn new(location: Option<Coordinates>) -> Self {
        Self(location)
    }

    /// Build from a latitude/longitude pair where either half may be missing
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self(latitude.zip(longitude).map(|(lat, lon)| Coordinates::new(lat, lon)))
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        self.0
            .ok_or_else(|| LocationError::Unavailable("no position reported".to_string()))
    }
}

/// Ask `provider` for the caller location, substituting `fallback` on failure
///
/// Returns `None` only when the provider fails and no fallback is given,
/// which the discovery engine treats as "distance unknown".
pub async fn resolve_location(
    provider: &dyn LocationProvider,
    fallback: Option<Coordinates>,
) -> Option<Coordinates> {
    match provider.current_location().await {
        Ok(location) => Some(location),
        Err(e) => {
            match fallback {
                Some(f) => tracing::debug!("{}, using fallback location ({}, {})", e, f.latitude, f.longitude),
                None => tracing::debug!("{}, continuing without caller location", e),
            }
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RIO_DE_JANEIRO_CENTER;

    #[tokio::test]
    async fn test_fixed_location_requires_both_parts() {
        assert!(FixedLocation::from_parts(Some(-22.9), None).current_location().await.is_err());

        let location = FixedLocation::from_parts(Some(-22.9), Some(-43.1))
            .current_location()
            .await
            .unwrap();
        assert_eq!(location, Coordinates::new(-22.9, -43.1));
    }

    #[tokio::test]
    async fn test_resolve_location_fallback() {
        let unknown = FixedLocation::default();

        assert_eq!(resolve_location(&unknown, None).await, None);
        assert_eq!(
            resolve_location(&unknown, Some(RIO_DE_JANEIRO_CENTER)).await,
            Some(RIO_DE_JANEIRO_CENTER)
        );

        let known = FixedLocation::new(Some(Coordinates::new(-23.0, -43.3)));
        assert_eq!(
            resolve_location(&known, Some(RIO_DE_JANEIRO_CENTER)).await,
            Some(Coordinates::new(-23.0, -43.3))
        );
    }
}
