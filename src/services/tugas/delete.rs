use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TugasService, load_tugas};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    current_user, ensure_pengampu, load_mata_kuliah, not_found, storage_error,
};

pub async fn delete_tugas(
    service: &TugasService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let tugas = try_or_respond!(load_tugas(&storage, id).await);
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, tugas.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    match storage.delete_tugas(id).await {
        Ok(true) => {
            info!("Assignment {} deleted by {}", id, user.nomor_induk);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Assignment deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::TugasNotFound,
            format!("Assignment {id} not found"),
        )),
        Err(e) => Ok(storage_error("Failed to delete assignment", e)),
    }
}
