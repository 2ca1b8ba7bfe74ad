// handlers/public.rs - service metadata endpoints
//
// Only the OpenAPI document sits under an auth-exempt prefix; root and health
// go through the gate like every other route.

use axum::{
    extract::State,
    http::Uri,
    response::Json,
};
use serde_json::{json, Value};
use utoipa::OpenApi;

use crate::api::{ApiDoc, OPENAPI_JSON_PATH};
use crate::app::AppState;
use crate::error::ApiError;

/// GET / - service name, version and endpoint summary
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "User Management API",
        "version": version,
        "endpoints": {
            "users": "/api/users[/:id] (protected)",
            "health": "/health (protected)",
            "docs": format!("{} (public)", OPENAPI_JSON_PATH),
        }
    }))
}

/// GET /health - store liveness
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    if let Err(e) = state.users.store().ping().await {
        tracing::warn!("Health check failed: {}", e);
        return Err(ApiError::service_unavailable(e.to_string()));
    }

    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "store": "ok"
    })))
}

/// GET /swagger/v1/swagger.json - generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Fallback for unmatched routes, so they get the JSON error shape too
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
