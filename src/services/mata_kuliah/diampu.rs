use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MataKuliahService;
use crate::models::{ApiResponse, mata_kuliah::responses::MataKuliahDiampuResponse};
use crate::services::access::{current_user, storage_error};

pub async fn list_diampu(
    service: &MataKuliahService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;

    match storage.list_mata_kuliah_by_dosen(user.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MataKuliahDiampuResponse { items },
            "Taught courses retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve taught courses", e)),
    }
}
