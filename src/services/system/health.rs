use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SystemService;
use crate::models::{ApiResponse, ErrorCode, system::responses::HealthResponse};

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            HealthResponse {
                status: "ok".to_string(),
                database: "ok".to_string(),
            },
            "Service is healthy",
        ))),
        Err(e) => {
            error!("Health check failed: {}", e);
            Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error(
                    ErrorCode::InternalServerError,
                    HealthResponse {
                        status: "degraded".to_string(),
                        database: "unreachable".to_string(),
                    },
                    "Database is unreachable",
                )),
            )
        }
    }
}
