use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::KrsService;
use crate::models::{
    ApiResponse, ErrorCode,
    krs::{entities::KrsStatus, requests::UpdateKrsStatusRequest},
};
use crate::services::access::{
    bad_request, conflict, current_user, ensure_pengampu, load_mata_kuliah, not_found,
    storage_error,
};

pub async fn update_status(
    service: &KrsService,
    id: i64,
    req: UpdateKrsStatusRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    if req.status == KrsStatus::Diajukan {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "status must be disetujui or ditolak",
        ));
    }

    let storage = service.get_storage(request)?;

    let krs = match storage.get_krs_by_id(id).await {
        Ok(Some(krs)) => krs,
        Ok(None) => return Ok(not_found(ErrorCode::KrsNotFound, "KRS entry not found")),
        Err(e) => return Ok(storage_error("Failed to load KRS entry", e)),
    };

    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, krs.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    // 被驳回的选课重新批准时需要再占一个名额
    if krs.status == KrsStatus::Ditolak && req.status == KrsStatus::Disetujui {
        let terisi = match storage
            .count_krs_aktif_by_mata_kuliah(&[mata_kuliah.id], &krs.tahun_ajaran, krs.periode)
            .await
        {
            Ok(counts) => counts.get(&mata_kuliah.id).copied().unwrap_or(0),
            Err(e) => return Ok(storage_error("Failed to count enrollments", e)),
        };
        if terisi >= i64::from(mata_kuliah.kuota) {
            return Ok(conflict(
                ErrorCode::KrsQuotaFull,
                format!("Course {} is full", mata_kuliah.kode),
            ));
        }
    }

    let catatan = req
        .catatan
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    match storage.update_krs_status(id, req.status, catatan).await {
        Ok(Some(updated)) => {
            info!(
                "KRS entry {} for {} set to {} by {}",
                id, mata_kuliah.kode, updated.status, user.nomor_induk
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "KRS status updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::KrsNotFound, "KRS entry not found")),
        Err(e) => Ok(storage_error("Failed to update KRS status", e)),
    }
}
