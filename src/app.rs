use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::api::OPENAPI_JSON_PATH;
use crate::config::{AppConfig, SecurityConfig};
use crate::database::store::UserStore;
use crate::handlers::{public, users};
use crate::middleware::{auth_gate_middleware, AuthGate};
use crate::services::UserService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserService::new(store),
        }
    }
}

/// Routes plus the auth gate. The gate wraps every route; exemption is
/// decided by path prefix inside the gate.
pub fn router(state: AppState, gate: AuthGate) -> Router {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route(OPENAPI_JSON_PATH, get(public::openapi_json))
        .merge(user_routes())
        .fallback(public::not_found)
        .with_state(state)
        .layer(middleware::from_fn_with_state(gate, auth_gate_middleware))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}

/// Full application: routes, gate, and the global layers driven by config.
pub fn app(state: AppState, gate: AuthGate, config: &AppConfig) -> Router {
    let mut app = router(state, gate);

    if config.security.enable_cors {
        app = app.layer(cors_layer(&config.security));
    }
    if config.server.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}
