use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::{PresensiService, load_sesi};
use crate::models::{
    ApiResponse, ErrorCode,
    presensi::{
        entities::{StatusPresensi, StatusSesi},
        requests::HadirRequest,
    },
};
use crate::services::access::{
    bad_request, conflict, current_user, ensure_terdaftar, storage_error,
};

pub async fn hadir(
    service: &PresensiService,
    sesi_id: i64,
    req: HadirRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let sesi = try_or_respond!(load_sesi(&storage, sesi_id).await);

    // 1. 已批准选课
    try_or_respond!(ensure_terdaftar(&storage, user.id, sesi.mata_kuliah_id).await);

    // 2. 签到窗口
    let now = Utc::now();
    match sesi.status_at(now) {
        StatusSesi::Berlangsung => {}
        StatusSesi::BelumDibuka => {
            return Ok(bad_request(
                ErrorCode::PresensiWindowClosed,
                "Attendance session has not started yet",
            ));
        }
        StatusSesi::Ditutup => {
            return Ok(bad_request(
                ErrorCode::PresensiWindowClosed,
                "Attendance session is already closed",
            ));
        }
    }

    // 3. 签到码
    if !sesi.kode_cocok(&req.kode) {
        return Ok(bad_request(
            ErrorCode::PresensiCodeInvalid,
            "Attendance code is incorrect",
        ));
    }

    // 4. 重复签到由唯一约束拦截
    match storage
        .create_presensi(sesi.id, user.id, StatusPresensi::Hadir, now)
        .await
    {
        Ok(presensi) => {
            info!(
                "Student {} checked in to session {}",
                user.nomor_induk, sesi.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                presensi,
                "Attendance recorded successfully",
            )))
        }
        Err(e) if e.is_conflict() => Ok(conflict(
            ErrorCode::PresensiAlreadyRecorded,
            "Attendance already recorded for this session",
        )),
        Err(e) => Ok(storage_error("Failed to record attendance", e)),
    }
}
