use axum::{
    http::{header, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use crate::web::error::AppError;

/// The dashboard client, compiled into the binary.
#[derive(RustEmbed, Clone)]
#[folder = "frontend/"]
pub struct Assets;

pub async fn static_handler(uri: Uri) -> Result<Response, AppError> {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Ok(([(header::CONTENT_TYPE, mime.to_string())], content.data).into_response())
        }
        None => Err(AppError::NotFound(format!("/{path}"))),
    }
}
