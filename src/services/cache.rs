use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use crate::services::preferences::{PreferenceError, PreferenceStore};

/// Redis-backed preference store with an in-process L1 cache
///
/// Redis (L2) is the durable copy shared across instances; values are stored
/// without expiry so preferences survive restarts. L1 entries expire after
/// `l1_ttl` so writes made through another instance become visible.
pub struct RedisPreferenceStore {
    // Store ConnectionManager in a Mutex for interior mutability
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, String>,
}

impl RedisPreferenceStore {
    /// Connect to Redis and build the L1 cache
    pub async fn new(redis_url: &str, l1_size: u64, l1_ttl: Duration) -> Result<Self, PreferenceError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(l1_ttl)
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
        })
    }

    /// Remove a value from both tiers
    pub async fn delete(&self, key: &str) -> Result<(), PreferenceError> {
        self.l1_cache.invalidate(key).await;
        let mut conn = self.redis.lock().await;
        let _: () = redis::cmd("DEL").arg(key).query_async(&mut *conn).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for RedisPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        // Try L1 cache first
        if let Some(value) = self.l1_cache.get(key).await {
            tracing::trace!("L1 preference hit: {}", key);
            return Ok(Some(value));
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut *conn).await?;
        drop(conn);

        if let Some(value) = &value {
            tracing::trace!("L2 preference hit: {}", key);
            self.l1_cache.insert(key.to_string(), value.clone()).await;
        } else {
            tracing::trace!("Preference miss: {}", key);
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut conn = self.redis.lock().await;
        let _: () = redis::cmd("SET").arg(key).arg(value).query_async(&mut *conn).await?;
        drop(conn);

        self.l1_cache.insert(key.to_string(), value.to_string()).await;

        tracing::trace!("Preference set: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::preferences::{PreferenceKey, SearchPreferences};
    use crate::models::SearchRadius;

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_redis_store_roundtrip() {
        let store = RedisPreferenceStore::new("redis://127.0.0.1:6379", 100, Duration::from_secs(60))
            .await
            .expect("Failed to connect to Redis");
        let store = Arc::new(store);

        let prefs = SearchPreferences::new(store.clone());
        prefs
            .save_search_radius("redis-test", SearchRadius::try_from(50).unwrap())
            .await
            .unwrap();
        assert_eq!(prefs.load_search_radius("redis-test").await.km(), 50);

        store.delete(&PreferenceKey::search_radius("redis-test")).await.unwrap();
        assert_eq!(prefs.load_search_radius("redis-test").await.km(), 5);
    }
}
