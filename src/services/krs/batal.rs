use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::KrsService;
use crate::models::{ApiResponse, ErrorCode, krs::entities::KrsStatus};
use crate::services::access::{bad_request, current_user, not_found, storage_error};

pub async fn batal_krs(
    service: &KrsService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;

    // 他人的选课视为不存在
    let krs = match storage.get_krs_by_id(id).await {
        Ok(Some(krs)) if krs.mahasiswa_id == user.id => krs,
        Ok(_) => return Ok(not_found(ErrorCode::KrsNotFound, "KRS entry not found")),
        Err(e) => return Ok(storage_error("Failed to load KRS entry", e)),
    };

    // 只有待审核的选课可以撤回
    if krs.status != KrsStatus::Diajukan {
        return Ok(bad_request(
            ErrorCode::KrsNotEditable,
            format!("KRS entries that are {} cannot be cancelled", krs.status),
        ));
    }

    match storage.delete_krs(id).await {
        Ok(true) => {
            info!("Student {} cancelled KRS entry {}", user.nomor_induk, id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "KRS entry cancelled successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::KrsNotFound, "KRS entry not found")),
        Err(e) => Ok(storage_error("Failed to cancel KRS entry", e)),
    }
}
