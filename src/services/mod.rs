// Service exports
pub mod alerts;
pub mod appwrite;
pub mod cache;
pub mod feed;
pub mod location;
pub mod preferences;
pub mod source;

pub use alerts::{ProximityNotifier, ALERT_COOLDOWN};
pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use cache::RedisPreferenceStore;
pub use feed::{DiscoverySession, ProviderFeed, ProviderSnapshot};
pub use location::{resolve_location, FixedLocation, LocationError, LocationProvider};
pub use preferences::{InMemoryPreferenceStore, PreferenceError, PreferenceKey, PreferenceStore, SearchPreferences};
pub use source::{InMemoryProviderSource, ProviderSource, SourceError};
