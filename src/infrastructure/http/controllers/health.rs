use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::infrastructure::http::envelope::Envelope;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Hotel Management API is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Router fallback for anything no route matched.
pub async fn not_found() -> (StatusCode, Json<Envelope>) {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::failure("Resource not found")),
    )
}
