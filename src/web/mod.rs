use axum::{
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::gateway::Gateway;
use crate::web::routes::{api_routes, asset_routes};

pub mod error;
pub mod models;
pub mod routes;

pub use error::{panic_message, AppError};

#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// Last-resort `Server error` payload for panics outside the `/api` handler,
/// which catches its own and reports the requested action.
fn panic_to_json(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_message(panic.as_ref());
    error!(detail = %detail, "Handler panicked.");
    Json(serde_json::json!({
        "error": format!("Server error: {detail}"),
        "action": serde_json::Value::Null,
    }))
    .into_response()
}

pub fn create_axum_router(gateway: Gateway) -> Router {
    let app_state = Arc::new(AppState { gateway });

    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(vec![header::CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(health_check_handler))
        .merge(api_routes::api_router())
        .fallback(asset_routes::static_handler)
        .with_state(app_state)
        .layer(CatchPanicLayer::custom(panic_to_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
