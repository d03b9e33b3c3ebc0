use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use validator::Validate;
use crate::models::{ErrorResponse, RadiusResponse, SearchRadius, UpdateRadiusRequest, RADIUS_OPTIONS_KM};
use crate::routes::AppState;

/// Configure preference routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/preferences/radius", web::get().to(get_radius))
        .route("/preferences/radius", web::put().to(update_radius));
}

fn radius_response(owner_id: &str, radius: SearchRadius) -> RadiusResponse {
    RadiusResponse {
        owner_id: owner_id.to_string(),
        radius_km: radius.km(),
        options: RADIUS_OPTIONS_KM.to_vec(),
    }
}

/// Get the stored search radius
///
/// GET /api/v1/preferences/radius?ownerId={ownerId}
async fn get_radius(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let owner_id = match query.get("ownerId").filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing ownerId parameter".to_string(),
                message: "ownerId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    let radius = state.preferences.load_search_radius(owner_id).await;
    HttpResponse::Ok().json(radius_response(owner_id, radius))
}

/// Persist the search radius
///
/// PUT /api/v1/preferences/radius
///
/// Request body:
/// ```json
/// { "ownerId": "string", "radiusKm": 10 }
/// ```
async fn update_radius(
    state: web::Data<AppState>,
    req: web::Json<UpdateRadiusRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let radius = match SearchRadius::try_from(req.radius_km) {
        Ok(radius) => radius,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid radius".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    match state.preferences.save_search_radius(&req.owner_id, radius).await {
        Ok(()) => HttpResponse::Ok().json(radius_response(&req.owner_id, radius)),
        Err(e) => {
            tracing::error!("Failed to save search radius for {}: {}", req.owner_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to save search radius".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
