use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use crate::core::{discover, Discovery};
use crate::models::{Coordinates, ProviderFilter, ProviderRecord, SearchCriteria};
use crate::services::source::ProviderSource;

/// A complete provider list as of one refresh
///
/// `generation` starts at 0 for the empty initial snapshot and increases by
/// one with every successful refresh.
#[derive(Debug, Clone, Default)]
pub struct ProviderSnapshot {
    pub generation: u64,
    pub providers: Arc<Vec<ProviderRecord>>,
}

impl ProviderSnapshot {
    pub fn is_loaded(&self) -> bool {
        self.generation > 0
    }
}

/// Periodically re-fetches providers and publishes full snapshots
///
/// Each refresh replaces the previous snapshot entirely. A failed refresh is
/// logged and the last good snapshot stays published.
pub struct ProviderFeed {
    receiver: watch::Receiver<ProviderSnapshot>,
    handle: JoinHandle<()>,
}

impl ProviderFeed {
    /// Start the refresh loop on the current tokio runtime
    pub fn spawn(source: Arc<dyn ProviderSource>, filter: ProviderFilter, interval: Duration) -> Self {
        let (sender, receiver) = watch::channel(ProviderSnapshot::default());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut generation = 0u64;

            loop {
                ticker.tick().await;

                match source.list_available_providers(filter).await {
                    Ok(providers) => {
                        generation += 1;
                        tracing::debug!("Provider snapshot {}: {} providers", generation, providers.len());

                        let snapshot = ProviderSnapshot {
                            generation,
                            providers: Arc::new(providers),
                        };
                        if sender.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Provider refresh failed, keeping snapshot {}: {}", generation, e);
                    }
                }
            }

            tracing::debug!("Provider feed stopped");
        });

        Self { receiver, handle }
    }

    /// Latest published snapshot
    pub fn latest(&self) -> ProviderSnapshot {
        self.receiver.borrow().clone()
    }

    /// Receiver that observes every future snapshot
    pub fn subscribe(&self) -> watch::Receiver<ProviderSnapshot> {
        self.receiver.clone()
    }
}

impl Drop for ProviderFeed {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Re-runs discovery whenever a newer provider snapshot arrives
///
/// Location and criteria belong to the session; the engine itself stays a
/// pure function invoked once per snapshot.
pub struct DiscoverySession {
    snapshots: watch::Receiver<ProviderSnapshot>,
    location: Option<Coordinates>,
    criteria: SearchCriteria,
    last_generation: u64,
}

impl DiscoverySession {
    pub fn new(
        snapshots: watch::Receiver<ProviderSnapshot>,
        location: Option<Coordinates>,
        criteria: SearchCriteria,
    ) -> Self {
        Self {
            snapshots,
            location,
            criteria,
            last_generation: 0,
        }
    }

    pub fn set_location(&mut self, location: Option<Coordinates>) {
        self.location = location;
    }

    pub fn set_criteria(&mut self, criteria: SearchCriteria) {
        self.criteria = criteria;
    }

    /// Recompute over the snapshot currently published
    pub fn current(&self) -> Discovery {
        let snapshot = self.snapshots.borrow().clone();
        discover(self.location, snapshot.providers.as_ref().clone(), &self.criteria)
    }

    /// Wait for a snapshot newer than the last one handled and recompute
    ///
    /// Returns `None` once the feed has stopped.
    pub async fn next_ranked(&mut self) -> Option<Discovery> {
        loop {
            if self.snapshots.changed().await.is_err() {
                return None;
            }

            let snapshot = self.snapshots.borrow_and_update().clone();
            if snapshot.generation <= self.last_generation {
                continue;
            }
            self.last_generation = snapshot.generation;

            return Some(discover(
                self.location,
                snapshot.providers.as_ref().clone(),
                &self.criteria,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderStatus;
    use crate::services::source::InMemoryProviderSource;

    fn provider(id: &str, is_premium: bool) -> ProviderRecord {
        ProviderRecord {
            uid: id.to_string(),
            display_name: format!("Provider {}", id),
            photo_url: None,
            service_type: "Encanador".to_string(),
            neighborhood: "Flamengo".to_string(),
            rating: 0.0,
            review_count: 0,
            status: ProviderStatus::Available,
            coordinates: Coordinates::new(-22.93, -43.17),
            has_stored_location: true,
            is_premium,
        }
    }

    #[tokio::test]
    async fn test_session_recomputes_each_snapshot() {
        let source = Arc::new(InMemoryProviderSource::new(vec![provider("a", false)]));
        let feed = ProviderFeed::spawn(source.clone(), ProviderFilter::default(), Duration::from_millis(20));

        let mut session = DiscoverySession::new(feed.subscribe(), None, SearchCriteria::default());

        let first = tokio::time::timeout(Duration::from_secs(2), session.next_ranked())
            .await
            .expect("first snapshot")
            .expect("feed running");
        assert_eq!(first.providers.len(), 1);

        source.replace(vec![provider("a", false), provider("b", true)]).await;

        let updated = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let result = session.next_ranked().await.expect("feed running");
                if result.providers.len() == 2 {
                    return result;
                }
            }
        })
        .await
        .expect("updated snapshot");

        assert_eq!(updated.providers[0].provider.uid, "b");
        assert!(feed.latest().is_loaded());
    }

    #[tokio::test]
    async fn test_current_before_first_refresh_is_empty() {
        let (_sender, receiver) = watch::channel(ProviderSnapshot::default());
        let session = DiscoverySession::new(receiver, None, SearchCriteria::default());

        let result = session.current();
        assert!(result.providers.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[tokio::test]
    async fn test_session_follows_location_and_criteria_changes() {
        let north = ProviderRecord {
            coordinates: Coordinates::new(-22.90, -43.17),
            neighborhood: "Centro".to_string(),
            ..provider("north", false)
        };
        let south = ProviderRecord {
            coordinates: Coordinates::new(-22.98, -43.19),
            ..provider("south", false)
        };
        let (_sender, receiver) = watch::channel(ProviderSnapshot {
            generation: 1,
            providers: Arc::new(vec![north, south]),
        });

        let mut session = DiscoverySession::new(
            receiver,
            Some(Coordinates::new(-22.90, -43.17)),
            SearchCriteria::default(),
        );
        let uids = |d: Discovery| d.providers.into_iter().map(|p| p.provider.uid).collect::<Vec<_>>();
        assert_eq!(uids(session.current()), vec!["north", "south"]);

        session.set_location(Some(Coordinates::new(-22.98, -43.19)));
        assert_eq!(uids(session.current()), vec!["south", "north"]);

        session.set_criteria(SearchCriteria {
            neighborhood_filter: Some("Centro".to_string()),
            ..Default::default()
        });
        assert_eq!(uids(session.current()), vec!["north"]);
    }

    #[tokio::test]
    async fn test_stale_generation_ignored() {
        let (sender, receiver) = watch::channel(ProviderSnapshot::default());
        let mut session = DiscoverySession::new(receiver, None, SearchCriteria::default());

        sender
            .send(ProviderSnapshot { generation: 2, providers: Arc::new(vec![provider("new", false)]) })
            .unwrap();
        let result = session.next_ranked().await.unwrap();
        assert_eq!(result.providers[0].provider.uid, "new");

        sender
            .send(ProviderSnapshot { generation: 1, providers: Arc::new(vec![provider("old", false)]) })
            .unwrap();
        let stale = tokio::time::timeout(Duration::from_millis(50), session.next_ranked()).await;
        assert!(stale.is_err(), "older snapshot must not produce a result");

        sender
            .send(ProviderSnapshot { generation: 3, providers: Arc::new(vec![provider("newest", false)]) })
            .unwrap();
        let result = session.next_ranked().await.unwrap();
        assert_eq!(result.providers[0].provider.uid, "newest");
    }
}
