use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MataKuliahService, ensure_dosen};
use crate::models::{ApiResponse, ErrorCode, mata_kuliah::requests::UpdateMataKuliahRequest};
use crate::services::access::{bad_request, conflict, not_found, storage_error};

pub async fn update_mata_kuliah(
    service: &MataKuliahService,
    id: i64,
    req: UpdateMataKuliahRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.validate() {
        return Ok(bad_request(ErrorCode::MataKuliahInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    if let Some(ref kode) = req.kode {
        match storage.get_mata_kuliah_by_kode(kode).await {
            Ok(Some(existing)) if existing.id != id => {
                return Ok(conflict(
                    ErrorCode::MataKuliahAlreadyExists,
                    format!("Course code {} already exists", existing.kode),
                ));
            }
            Ok(_) => {}
            Err(e) => return Ok(storage_error("Failed to check course code", e)),
        }
    }

    if let Some(dosen_id) = req.dosen_id {
        try_or_respond!(ensure_dosen(&storage, dosen_id).await);
    }

    match storage.update_mata_kuliah(id, req).await {
        Ok(Some(mata_kuliah)) => {
            info!("Course {} updated", mata_kuliah.kode);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                mata_kuliah,
                "Course updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::MataKuliahNotFound,
            format!("Course {id} not found"),
        )),
        Err(e) => Ok(storage_error("Failed to update course", e)),
    }
}
