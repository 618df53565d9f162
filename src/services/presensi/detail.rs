use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::{PresensiService, load_sesi};
use crate::models::{ApiResponse, presensi::responses::SesiDetailResponse};
use crate::services::access::{current_user, ensure_pengampu, load_mata_kuliah, storage_error};

pub async fn get_sesi(
    service: &PresensiService,
    sesi_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let sesi = try_or_respond!(load_sesi(&storage, sesi_id).await);
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, sesi.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    match storage.list_presensi_by_sesi(sesi.id).await {
        Ok(presensi) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SesiDetailResponse {
                status_sesi: sesi.status_at(Utc::now()),
                sesi,
                presensi,
            },
            "Attendance session retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve attendance records", e)),
    }
}
