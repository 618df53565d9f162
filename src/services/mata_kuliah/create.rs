use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MataKuliahService, ensure_dosen};
use crate::models::{ApiResponse, ErrorCode, mata_kuliah::requests::CreateMataKuliahRequest};
use crate::services::access::{bad_request, conflict, storage_error};

pub async fn create_mata_kuliah(
    service: &MataKuliahService,
    req: CreateMataKuliahRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.validate() {
        return Ok(bad_request(ErrorCode::MataKuliahInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.get_mata_kuliah_by_kode(&req.kode).await {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::MataKuliahAlreadyExists,
                format!("Course code {} already exists", req.kode.trim().to_uppercase()),
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_error("Failed to check course code", e)),
    }

    try_or_respond!(ensure_dosen(&storage, req.dosen_id).await);

    match storage.create_mata_kuliah(req).await {
        Ok(mata_kuliah) => {
            info!("Course {} created", mata_kuliah.kode);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                mata_kuliah,
                "Course created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Failed to create course", e)),
    }
}
