use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TugasService, load_tugas};
use crate::models::{ApiResponse, ErrorCode, tugas::responses::PengumpulanListResponse};
use crate::services::access::{
    current_user, ensure_pengampu, ensure_terdaftar, load_mata_kuliah, not_found, storage_error,
};

pub async fn list_pengumpulan(
    service: &TugasService,
    tugas_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let tugas = try_or_respond!(load_tugas(&storage, tugas_id).await);
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, tugas.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    match storage.list_pengumpulan_by_tugas(tugas.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PengumpulanListResponse {
                tugas_id: tugas.id,
                items,
            },
            "Submissions retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve submissions", e)),
    }
}

pub async fn pengumpulan_saya(
    service: &TugasService,
    tugas_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let tugas = try_or_respond!(load_tugas(&storage, tugas_id).await);
    try_or_respond!(ensure_terdaftar(&storage, user.id, tugas.mata_kuliah_id).await);

    match storage.get_pengumpulan(tugas.id, user.id).await {
        Ok(Some(pengumpulan)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            pengumpulan,
            "Submission retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::PengumpulanNotFound,
            "No submission for this assignment yet",
        )),
        Err(e) => Ok(storage_error("Failed to retrieve submission", e)),
    }
}
