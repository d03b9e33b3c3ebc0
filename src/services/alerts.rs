use std::time::Duration;
use crate::models::RankedProvider;

/// Minimum time between two alerts for the same client/provider pair
pub const ALERT_COOLDOWN: Duration = Duration::from_secs(30 * 60);

/// Tracks which proximity alerts were raised recently
///
/// Entries expire after the cooldown, after which the same pair may alert
/// again.
pub struct ProximityNotifier {
    recent: moka::future::Cache<String, ()>,
}

impl ProximityNotifier {
    pub fn new(cooldown: Duration, capacity: u64) -> Self {
        let recent = moka::future::CacheBuilder::new(capacity)
            .time_to_live(cooldown)
            .build();

        Self { recent }
    }

    fn alert_key(user_id: &str, provider_id: &str) -> String {
        format!("{}_{}", user_id, provider_id)
    }

    /// Keep only providers not alerted to `user_id` within the cooldown,
    /// and start the cooldown for the ones returned.
    pub async fn select(&self, user_id: &str, nearby: Vec<RankedProvider>) -> Vec<RankedProvider> {
        let mut fresh = Vec::with_capacity(nearby.len());

        for provider in nearby {
            let key = Self::alert_key(user_id, &provider.provider.uid);
            if self.recent.get(&key).await.is_some() {
                tracing::trace!("Alert {} still in cooldown", key);
                continue;
            }
            self.recent.insert(key, ()).await;
            fresh.push(provider);
        }

        if !fresh.is_empty() {
            tracing::debug!("Raising {} proximity alerts for {}", fresh.len(), user_id);
        }

        fresh
    }
}

impl Default for ProximityNotifier {
    fn default() -> Self {
        Self::new(ALERT_COOLDOWN, 10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, ProviderRecord, ProviderStatus};

    fn nearby(id: &str) -> RankedProvider {
        RankedProvider {
            provider: ProviderRecord {
                uid: id.to_string(),
                display_name: format!("Provider {}", id),
                photo_url: None,
                service_type: "Chaveiro".to_string(),
                neighborhood: "Leblon".to_string(),
                rating: 0.0,
                review_count: 0,
                status: ProviderStatus::Available,
                coordinates: Coordinates::new(-22.98, -43.22),
                has_stored_location: true,
                is_premium: false,
            },
            distance_km: Some(0.8),
        }
    }

    #[tokio::test]
    async fn test_cooldown_per_pair() {
        let notifier = ProximityNotifier::default();

        let first = notifier.select("client-1", vec![nearby("a"), nearby("b")]).await;
        assert_eq!(first.len(), 2);

        let second = notifier.select("client-1", vec![nearby("a"), nearby("c")]).await;
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].provider.uid, "c");

        let other_client = notifier.select("client-2", vec![nearby("a")]).await;
        assert_eq!(other_client.len(), 1);
    }

    #[tokio::test]
    async fn test_cooldown_expires() {
        let notifier = ProximityNotifier::new(Duration::from_millis(100), 100);

        assert_eq!(notifier.select("client-1", vec![nearby("a")]).await.len(), 1);
        assert!(notifier.select("client-1", vec![nearby("a")]).await.is_empty());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(notifier.select("client-1", vec![nearby("a")]).await.len(), 1);
    }
}
