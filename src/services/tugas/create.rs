use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TugasService;
use crate::models::{ApiResponse, ErrorCode, tugas::requests::CreateTugasRequest};
use crate::services::access::{
    bad_request, current_user, ensure_pengampu, load_mata_kuliah, storage_error,
};

pub async fn create_tugas(
    service: &TugasService,
    req: CreateTugasRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    if let Err(msg) = req.validate() {
        return Ok(bad_request(ErrorCode::TugasInvalid, msg));
    }

    let storage = service.get_storage(request)?;
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, req.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    match storage.create_tugas(user.id, req).await {
        Ok(tugas) => {
            info!("Assignment {} created for {}", tugas.id, mata_kuliah.kode);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                tugas,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Failed to create assignment", e)),
    }
}
