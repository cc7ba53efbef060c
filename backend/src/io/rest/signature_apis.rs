//! # REST API for Signatures
//!
//! Echoes an uploaded PNG/JPEG back with its content type so the UI can
//! display it. Nothing is stored.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use log::info;

use crate::io::rest::error_response;
use crate::AppState;

/// Create a router for the signature upload; bodies over `max_bytes` are
/// refused with 413 before reaching the handler
pub fn router(max_bytes: usize) -> Router<AppState> {
    Router::new().route("/", post(upload_signature).layer(DefaultBodyLimit::max(max_bytes)))
}

/// Accept raw image bytes and return them unmodified
pub async fn upload_signature(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    info!("POST /api/signature - {} bytes", body.len());

    match state.signature_service.accept(&body) {
        Ok(format) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, format.content_type())],
            body,
        )
            .into_response(),
        Err(e) => error_response("accept signature", e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_app_state;

    #[tokio::test]
    async fn test_png_is_echoed_back() {
        let state = test_app_state().await;
        let png = Bytes::from_static(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3]);

        let response = upload_signature(State(state), png.clone()).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes, png);
    }

    #[tokio::test]
    async fn test_non_image_is_rejected() {
        let state = test_app_state().await;

        let response = upload_signature(State(state), Bytes::from_static(b"%PDF-1.7"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
