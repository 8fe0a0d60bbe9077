use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),
    #[error("Not Found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Body used by the `/api` endpoint, which reports faults with a 200 and
    /// the action that caused them.
    pub fn api_payload(&self, action: Option<&str>) -> serde_json::Value {
        let detail = match self {
            AppError::InternalServerError(msg) | AppError::NotFound(msg) => msg,
        };
        serde_json::json!({
            "error": format!("Server error: {detail}"),
            "action": action.unwrap_or_default(),
        })
    }
}

/// Text of a caught panic payload.
pub fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, Json(serde_json::json!({ "error": error_message }))).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalServerError(format!("JSON serialization error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_payload_echoes_action() {
        let payload = AppError::InternalServerError("boom".to_string()).api_payload(Some("metrics"));
        assert_eq!(payload["error"], "Server error: boom");
        assert_eq!(payload["action"], "metrics");
    }

    #[test]
    fn test_panic_message() {
        let owned: Box<dyn Any + Send> = Box::new("disk gone".to_string());
        assert_eq!(panic_message(owned.as_ref()), "disk gone");
        let literal: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(literal.as_ref()), "boom");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
