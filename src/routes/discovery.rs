use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{discover, nearby_providers};
use crate::models::{
    CatalogResponse, DiscoverRequest, DiscoverResponse, ErrorResponse, HealthResponse,
    NearbyAlertsRequest, NearbyAlertsResponse, ProviderRecord, SearchCriteria, SearchRadius,
    Coordinates, NEIGHBORHOODS, SERVICES, find_service,
};
use crate::routes::AppState;
use crate::services::{resolve_location, FixedLocation, SourceError};

/// Configure discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/catalog", web::get().to(catalog))
        .route("/providers/discover", web::post().to(discover_providers))
        .route("/providers/nearby-alerts", web::post().to(nearby_alerts));
}

/// Health check endpoint
///
/// Reports "degraded" while the provider feed has not loaded a snapshot yet.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let feed_ready = state
        .feed
        .as_ref()
        .map_or(true, |feed| feed.latest().is_loaded());

    let status = if feed_ready { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Service categories and neighborhoods offered as filter values
async fn catalog() -> impl Responder {
    HttpResponse::Ok().json(CatalogResponse {
        services: &SERVICES,
        neighborhoods: &NEIGHBORHOODS,
    })
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn source_error(e: SourceError) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Failed to load providers".to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}

/// Latest provider snapshot, or a direct query while the feed is still loading
/// Catalog ids ("tecnico-ar") resolve to the category name; anything else is
/// used as typed
fn service_type_name(value: &str) -> String {
    find_service(value).map_or_else(|| value.to_string(), |category| category.name.to_string())
}

async fn current_providers(state: &AppState) -> Result<Vec<ProviderRecord>, SourceError> {
    if let Some(feed) = &state.feed {
        let snapshot = feed.latest();
        if snapshot.is_loaded() {
            return Ok(snapshot.providers.as_ref().clone());
        }
        tracing::debug!("Provider feed not loaded yet, querying source directly");
    }

    state.source.list_available_providers(state.provider_filter).await
}

/// Discover providers endpoint
///
/// POST /api/v1/providers/discover
///
/// Request body:
/// ```json
/// {
///   "ownerId": "string",
///   "latitude": -22.9,
///   "longitude": -43.1,
///   "serviceType": "string",
///   "neighborhood": "string",
///   "searchText": "string",
///   "radiusKm": 5
/// }
/// ```
async fn discover_providers(
    state: web::Data<AppState>,
    req: web::Json<DiscoverRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for discover request: {:?}", errors);
        return validation_error(errors);
    }

    let owner_id = &req.owner_id;

    let radius = match req.radius_km {
        Some(km) => match SearchRadius::try_from(km) {
            Ok(radius) => radius,
            Err(e) => {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid radius".to_string(),
                    message: e.to_string(),
                    status_code: 400,
                });
            }
        },
        None => state.preferences.load_search_radius(owner_id).await,
    };

    let reported = FixedLocation::from_parts(req.latitude, req.longitude);
    let location = resolve_location(&reported, state.fallback_location).await;

    let providers = match current_providers(&state).await {
        Ok(providers) => providers,
        Err(e) => {
            tracing::error!("Failed to load providers for {}: {}", owner_id, e);
            return source_error(e);
        }
    };

    let criteria = SearchCriteria {
        service_type_filter: req.service_type.as_deref().map(service_type_name),
        neighborhood_filter: req.neighborhood.clone(),
        search_text: req.search_text.clone(),
        radius_km: Some(f64::from(radius.km())),
    };

    let result = discover(location, providers, &criteria);

    tracing::info!(
        "Returning {} providers for {} (from {} candidates, radius {}km)",
        result.providers.len(),
        owner_id,
        result.total_candidates,
        radius
    );

    HttpResponse::Ok().json(DiscoverResponse {
        providers: result.providers,
        total_candidates: result.total_candidates,
        radius_km: radius.km(),
        location_known: location.is_some(),
    })
}

/// Proximity alerts endpoint
///
/// POST /api/v1/providers/nearby-alerts
///
/// Returns available providers within 5km matching the client's interests
/// that have not been alerted to this client recently.
async fn nearby_alerts(
    state: web::Data<AppState>,
    req: web::Json<NearbyAlertsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let providers = match current_providers(&state).await {
        Ok(providers) => providers,
        Err(e) => {
            tracing::error!("Failed to load providers for alerts ({}): {}", req.user_id, e);
            return source_error(e);
        }
    };

    let location = Coordinates::new(req.latitude, req.longitude);
    let nearby = nearby_providers(location, &providers, &req.interests, &req.user_id);
    let alerts = state.notifier.select(&req.user_id, nearby).await;

    HttpResponse::Ok().json(NearbyAlertsResponse { alerts })
}
