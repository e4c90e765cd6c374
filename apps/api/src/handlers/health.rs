use axum::Json;
use portal_core::AppError;

use crate::dto::HealthResponse;
use crate::error::ApiError;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn not_found_handler() -> ApiError {
    AppError::NotFound("Endpoint not found".to_owned()).into()
}
