use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{TimeDelta, Utc};
use tracing::info;

use super::PresensiService;
use crate::models::{ApiResponse, ErrorCode, presensi::requests::BukaSesiRequest};
use crate::services::access::{
    bad_request, conflict, current_user, ensure_pengampu, load_mata_kuliah, storage_error,
};
use crate::storage::NewSesi;
use crate::utils::random_code::generate_kode_presensi;

pub async fn buka_sesi(
    service: &PresensiService,
    req: BukaSesiRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    if let Err(msg) = req.validate() {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, req.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    let durasi = req
        .durasi_menit
        .unwrap_or(service.get_config().akademik.durasi_presensi_menit);
    let waktu_mulai = req.waktu_mulai.unwrap_or_else(Utc::now);

    let sesi = NewSesi {
        mata_kuliah_id: mata_kuliah.id,
        pertemuan_ke: req.pertemuan_ke,
        topik: req
            .topik
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        kode: generate_kode_presensi(),
        waktu_mulai,
        waktu_selesai: waktu_mulai + TimeDelta::minutes(durasi),
        dibuat_oleh: user.id,
    };

    match storage.create_sesi(sesi).await {
        Ok(sesi) => {
            info!(
                "Attendance session {} opened for {} meeting {}",
                sesi.id, mata_kuliah.kode, sesi.pertemuan_ke
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                sesi,
                "Attendance session opened successfully",
            )))
        }
        Err(e) if e.is_conflict() => Ok(conflict(
            ErrorCode::SesiAlreadyExists,
            format!(
                "Meeting {} of {} already has a session",
                req.pertemuan_ke, mata_kuliah.kode
            ),
        )),
        Err(e) => Ok(storage_error("Failed to open attendance session", e)),
    }
}
