use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use crate::models::{ProviderFilter, ProviderRecord};
use crate::services::appwrite::AppwriteError;

/// Errors that can occur when fetching provider profiles
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Appwrite(#[from] AppwriteError),

    #[error("Provider source unavailable: {0}")]
    Unavailable(String),
}

/// Store holding provider profiles
///
/// Implementations return records that already passed the required-field
/// check in [`crate::models::ProviderDocument::into_record`].
#[async_trait]
pub trait ProviderSource: Send + Sync {
    async fn list_available_providers(
        &self,
        filter: ProviderFilter,
    ) -> Result<Vec<ProviderRecord>, SourceError>;
}

/// In-memory provider source for tests and local development
///
/// The role and profile-completeness parts of the filter are assumed to be
/// satisfied by whatever was loaded; only `limit` is applied.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderSource {
    providers: Arc<RwLock<Vec<ProviderRecord>>>,
}

impl InMemoryProviderSource {
    pub fn new(providers: Vec<ProviderRecord>) -> Self {
        Self {
            providers: Arc::new(RwLock::new(providers)),
        }
    }

    /// Replace the stored providers
    pub async fn replace(&self, providers: Vec<ProviderRecord>) {
        *self.providers.write().await = providers;
    }
}

#[async_trait]
impl ProviderSource for InMemoryProviderSource {
    async fn list_available_providers(
        &self,
        filter: ProviderFilter,
    ) -> Result<Vec<ProviderRecord>, SourceError> {
        let providers = self.providers.read().await;
        let limit = filter.limit.unwrap_or(usize::MAX);
        Ok(providers.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, ProviderStatus};

    fn provider(id: &str) -> ProviderRecord {
        ProviderRecord {
            uid: id.to_string(),
            display_name: format!("Provider {}", id),
            photo_url: None,
            service_type: "Jardineiro".to_string(),
            neighborhood: "Gávea".to_string(),
            rating: 0.0,
            review_count: 0,
            status: ProviderStatus::Available,
            coordinates: Coordinates::new(-22.97, -43.23),
            has_stored_location: true,
            is_premium: false,
        }
    }

    #[tokio::test]
    async fn test_in_memory_source_limit_and_replace() {
        let source = InMemoryProviderSource::new((0..5).map(|i| provider(&i.to_string())).collect());

        let filter = ProviderFilter {
            limit: Some(3),
            ..Default::default()
        };
        assert_eq!(source.list_available_providers(filter).await.unwrap().len(), 3);

        source.replace(vec![provider("x")]).await;
        let all = source.list_available_providers(ProviderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].uid, "x");
    }
}
