use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::{TugasService, load_tugas};
use crate::models::{ApiResponse, ErrorCode, tugas::requests::KumpulkanRequest};
use crate::services::access::{
    bad_request, conflict, current_user, ensure_terdaftar, storage_error,
};
use crate::storage::NewPengumpulan;

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn kumpulkan(
    service: &TugasService,
    tugas_id: i64,
    req: KumpulkanRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    if let Err(msg) = req.validate() {
        return Ok(bad_request(ErrorCode::PengumpulanInvalid, msg));
    }

    let storage = service.get_storage(request)?;
    let tugas = try_or_respond!(load_tugas(&storage, tugas_id).await);
    try_or_respond!(ensure_terdaftar(&storage, user.id, tugas.mata_kuliah_id).await);

    // 超过截止时间只有允许迟交时才能提交，并标记为迟交
    let terlambat = tugas.lewat_tenggat(Utc::now());
    if terlambat && !tugas.izinkan_terlambat {
        return Ok(bad_request(
            ErrorCode::PengumpulanDeadlinePassed,
            "The deadline for this assignment has passed",
        ));
    }

    let sebelumnya = match storage.get_pengumpulan(tugas.id, user.id).await {
        Ok(existing) => existing,
        Err(e) => return Ok(storage_error("Failed to load submission", e)),
    };
    if sebelumnya.as_ref().is_some_and(|p| p.sudah_dinilai()) {
        return Ok(conflict(
            ErrorCode::PengumpulanAlreadyGraded,
            "Graded submissions cannot be changed",
        ));
    }

    let baru = NewPengumpulan {
        tugas_id: tugas.id,
        mahasiswa_id: user.id,
        konten: non_empty(req.konten),
        lampiran_url: non_empty(req.lampiran_url),
        terlambat,
    };

    match storage.simpan_pengumpulan(baru).await {
        Ok(pengumpulan) => {
            info!(
                "Student {} submitted assignment {}{}",
                user.nomor_induk,
                tugas.id,
                if terlambat { " (late)" } else { "" }
            );
            let response = if sebelumnya.is_some() {
                HttpResponse::Ok().json(ApiResponse::success(
                    pengumpulan,
                    "Submission updated successfully",
                ))
            } else {
                HttpResponse::Created().json(ApiResponse::success(
                    pengumpulan,
                    "Submission created successfully",
                ))
            };
            Ok(response)
        }
        Err(e) => Ok(storage_error("Failed to save submission", e)),
    }
}
