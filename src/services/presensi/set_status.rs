use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{PresensiService, load_sesi};
use crate::models::{ApiResponse, ErrorCode, presensi::requests::SetPresensiRequest};
use crate::services::access::{
    bad_request, current_user, ensure_pengampu, load_mata_kuliah, storage_error,
};

pub async fn set_status(
    service: &PresensiService,
    sesi_id: i64,
    mahasiswa_id: i64,
    req: SetPresensiRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let sesi = try_or_respond!(load_sesi(&storage, sesi_id).await);
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, sesi.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    match storage
        .is_mahasiswa_terdaftar(mahasiswa_id, mata_kuliah.id)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            return Ok(bad_request(
                ErrorCode::NotEnrolled,
                format!("Student {mahasiswa_id} is not enrolled in {}", mata_kuliah.kode),
            ));
        }
        Err(e) => return Ok(storage_error("Failed to check enrollment", e)),
    }

    match storage
        .upsert_presensi(sesi.id, mahasiswa_id, req.status)
        .await
    {
        Ok(presensi) => {
            info!(
                "Attendance of student {} in session {} set to {} by {}",
                mahasiswa_id, sesi.id, presensi.status, user.nomor_induk
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                presensi,
                "Attendance updated successfully",
            )))
        }
        Err(e) => Ok(storage_error("Failed to update attendance", e)),
    }
}
