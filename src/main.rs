use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use servico_facil_discovery::config::{LoggingSettings, Settings};
use servico_facil_discovery::models::ProviderFilter;
use servico_facil_discovery::routes::{self, AppState};
use servico_facil_discovery::services::{
    AppwriteClient, AppwriteCollections, InMemoryPreferenceStore, PreferenceStore, ProviderFeed,
    ProviderSource, ProximityNotifier, RedisPreferenceStore, SearchPreferences,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Initialize logging; LOG_LEVEL and LOG_FORMAT override the config file
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // DISCOVERY_CONFIG points at a single config file instead of config/
    let settings = match std::env::var("DISCOVERY_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    }
    .map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Failed to load configuration: {}", e))
    })?;

    init_logging(&settings.logging);

    info!("Starting Serviço Fácil discovery service v{}", env!("CARGO_PKG_VERSION"));

    let discovery = &settings.discovery;

    // Initialize Appwrite provider source
    let appwrite_collections = AppwriteCollections {
        users: settings.collection.users.clone(),
    };

    let appwrite = AppwriteClient::new(
        settings.appwrite.endpoint.clone(),
        settings.appwrite.api_key.clone(),
        settings.appwrite.project_id.clone(),
        settings.appwrite.database_id.clone(),
        appwrite_collections,
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?
    .with_fallback_location(discovery.fallback_location());

    let source: Arc<dyn ProviderSource> = Arc::new(appwrite);

    info!("Appwrite client initialized");

    // Initialize preference store; fall back to memory when Redis is unreachable
    let l1_ttl = Duration::from_secs(settings.cache.ttl_secs.unwrap_or(300));
    let l1_size = settings.cache.l1_cache_size.unwrap_or(10_000);

    let store: Arc<dyn PreferenceStore> =
        match RedisPreferenceStore::new(&settings.cache.redis_url, l1_size, l1_ttl).await {
            Ok(store) => {
                info!("Preference store initialized (L1: {} entries, TTL: {:?})", l1_size, l1_ttl);
                Arc::new(store)
            }
            Err(e) => {
                error!("Failed to connect to Redis ({})", e);
                warn!("Search radius preferences will not survive restarts");
                Arc::new(InMemoryPreferenceStore::new())
            }
        };

    let provider_filter = ProviderFilter {
        limit: Some(discovery.provider_limit),
        ..Default::default()
    };

    let feed = if discovery.refresh_interval_secs > 0 {
        let interval = Duration::from_secs(discovery.refresh_interval_secs);
        info!("Provider feed refreshing every {:?}", interval);
        Some(Arc::new(ProviderFeed::spawn(source.clone(), provider_filter, interval)))
    } else {
        info!("Provider feed disabled, querying Appwrite per request");
        None
    };

    let fallback_location = discovery
        .fallback_caller_location
        .then(|| discovery.fallback_location());

    let app_state = AppState {
        source,
        preferences: SearchPreferences::new(store),
        feed,
        notifier: Arc::new(ProximityNotifier::new(
            Duration::from_secs(discovery.alert_cooldown_secs),
            100_000,
        )),
        provider_filter,
        fallback_location,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
