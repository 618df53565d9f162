use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MataKuliahService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{not_found, storage_error};

pub async fn delete_mata_kuliah(
    service: &MataKuliahService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_mata_kuliah(id).await {
        Ok(true) => {
            info!("Course {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Course deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::MataKuliahNotFound,
            format!("Course {id} not found"),
        )),
        Err(e) => Ok(storage_error("Failed to delete course", e)),
    }
}
