use axum::{
    extract::{rejection::QueryRejection, FromRequest, Multipart, Query, Request, State},
    http::{header, Method, StatusCode},
    routing::get,
    Form, Json, Router,
};
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error};

use crate::web::error::{panic_message, AppError};
use crate::web::models::ApiParams;
use crate::web::AppState;

pub const AVAILABLE_ACTIONS: [&str; 6] = ["control", "status", "metrics", "install", "info", "logs"];

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api", get(api_handler).post(api_handler).options(preflight_handler))
        // Legacy client path.
        .route("/api.php", get(api_handler).post(api_handler).options(preflight_handler))
}

async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

async fn api_handler(
    State(app_state): State<Arc<AppState>>,
    method: Method,
    query: Result<Query<ApiParams>, QueryRejection>,
    request: Request,
) -> Json<Value> {
    let query = query.map(|Query(q)| q).unwrap_or_else(|e| {
        debug!(error = %e, "Ignoring malformed query string.");
        ApiParams::default()
    });
    // Request bodies only count for POST.
    let body = if method == Method::POST {
        read_body(request).await
    } else {
        ApiParams::default()
    };

    let action = ApiParams::action(&query, &body);
    let outcome = AssertUnwindSafe(dispatch(&app_state, action.as_deref(), &query, &body))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(AppError::InternalServerError(panic_message(panic.as_ref()))));

    match outcome {
        Ok(value) => Json(value),
        Err(e) => {
            error!(action = ?action, error = %e, "Request failed.");
            Json(e.api_payload(action.as_deref()))
        }
    }
}

/// Fields from an urlencoded or multipart body. An unreadable body counts as empty.
async fn read_body(request: Request) -> ApiParams {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if is_multipart {
        return match Multipart::from_request(request, &()).await {
            Ok(multipart) => read_multipart(multipart).await,
            Err(e) => {
                debug!(error = %e, "Ignoring unreadable multipart body.");
                ApiParams::default()
            }
        };
    }

    match Form::<ApiParams>::from_request(request, &()).await {
        Ok(Form(body)) => body,
        Err(e) => {
            debug!(error = %e, "Ignoring unreadable form body.");
            ApiParams::default()
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> ApiParams {
    let mut params = ApiParams::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                debug!(error = %e, "Stopped reading multipart body.");
                break;
            }
        };
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match field.text().await {
            Ok(value) => params.set(&name, value),
            Err(e) => debug!(field = %name, error = %e, "Skipping unreadable multipart field."),
        }
    }
    params
}

async fn dispatch(
    app_state: &AppState,
    action: Option<&str>,
    query: &ApiParams,
    body: &ApiParams,
) -> Result<Value, AppError> {
    let gateway = &app_state.gateway;
    match action.unwrap_or_default() {
        "control" => {
            let service = body.service.as_deref().unwrap_or_default();
            let command = body.command.as_deref().unwrap_or_default();
            to_json(&gateway.control_service(service, command).await)
        }
        "status" => to_json(&gateway.all_services_status().await),
        "metrics" => to_json(&gateway.system_metrics().await),
        "install" => {
            let package = body.package.as_deref().unwrap_or_default();
            to_json(&gateway.install_package(package).await)
        }
        "info" => to_json(&gateway.system_info().await),
        "logs" => {
            let result = gateway
                .logs(query.service.as_deref(), query.lines.as_deref())
                .await;
            to_json(&result)
        }
        _ => Ok(serde_json::json!({
            "error": "Invalid action",
            "available_actions": AVAILABLE_ACTIONS,
        })),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(value)?)
}
