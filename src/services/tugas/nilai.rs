use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TugasService, load_tugas};
use crate::models::{ApiResponse, ErrorCode, tugas::requests::NilaiPengumpulanRequest};
use crate::services::access::{
    bad_request, current_user, ensure_pengampu, load_mata_kuliah, not_found, storage_error,
};

pub async fn nilai_pengumpulan(
    service: &TugasService,
    pengumpulan_id: i64,
    req: NilaiPengumpulanRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;

    let pengumpulan = match storage.get_pengumpulan_by_id(pengumpulan_id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::PengumpulanNotFound,
                format!("Submission {pengumpulan_id} not found"),
            ));
        }
        Err(e) => return Ok(storage_error("Failed to load submission", e)),
    };

    let tugas = try_or_respond!(load_tugas(&storage, pengumpulan.tugas_id).await);
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, tugas.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    if !req.nilai.is_finite() || req.nilai < 0.0 || req.nilai > tugas.nilai_maksimal {
        return Ok(bad_request(
            ErrorCode::PengumpulanInvalid,
            format!("nilai must be between 0 and {}", tugas.nilai_maksimal),
        ));
    }

    let komentar = req
        .komentar
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    match storage
        .nilai_pengumpulan(pengumpulan.id, req.nilai, komentar, user.id)
        .await
    {
        Ok(Some(graded)) => {
            info!(
                "Submission {} graded {} by {}",
                graded.id, req.nilai, user.nomor_induk
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                graded,
                "Submission graded successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::PengumpulanNotFound,
            format!("Submission {pengumpulan_id} not found"),
        )),
        Err(e) => Ok(storage_error("Failed to grade submission", e)),
    }
}
