use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use crate::models::SearchRadius;

/// Errors that can occur with preference persistence
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Preference store unavailable: {0}")]
    Unavailable(String),
}

/// String key-value persistence for user preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preference key builder
pub struct PreferenceKey;

impl PreferenceKey {
    /// Build the key for a device or user's search radius
    pub fn search_radius(owner_id: &str) -> String {
        format!("searchRadius:{}", owner_id)
    }
}

/// Typed access to the search radius preference
#[derive(Clone)]
pub struct SearchPreferences {
    store: Arc<dyn PreferenceStore>,
}

impl SearchPreferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Read the stored radius for `owner_id`
    ///
    /// Never fails: missing, corrupt or unsupported values and store errors
    /// all yield the default radius.
    pub async fn load_search_radius(&self, owner_id: &str) -> SearchRadius {
        let key = PreferenceKey::search_radius(owner_id);
        match self.store.get(&key).await {
            Ok(raw) => {
                let radius = SearchRadius::parse_or_default(raw.as_deref());
                tracing::trace!("Loaded search radius for {}: {}km", owner_id, radius);
                radius
            }
            Err(e) => {
                tracing::warn!("Failed to load search radius for {}, using default: {}", owner_id, e);
                SearchRadius::default()
            }
        }
    }

    /// Persist the radius for `owner_id`
    pub async fn save_search_radius(
        &self,
        owner_id: &str,
        radius: SearchRadius,
    ) -> Result<(), PreferenceError> {
        let key = PreferenceKey::search_radius(owner_id);
        self.store.set(&key, &radius.to_string()).await?;
        tracing::debug!("Saved search radius for {}: {}km", owner_id, radius);
        Ok(())
    }
}

/// In-memory preference store for tests and local development
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
