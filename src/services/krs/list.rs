use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::KrsService;
use crate::models::{
    ApiResponse,
    krs::{entities::KrsDetail, requests::SemesterQuery, responses::KrsSemesterResponse},
};
use crate::services::access::{current_user, storage_error, validate_semester};

/// 未被驳回的选课学分合计
pub(crate) fn total_sks_aktif(items: &[KrsDetail]) -> i32 {
    items
        .iter()
        .filter(|item| item.krs.status.menempati_kuota())
        .map(|item| item.mata_kuliah.sks)
        .sum()
}

pub async fn list_krs(
    service: &KrsService,
    query: SemesterQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    try_or_respond!(validate_semester(&query.tahun_ajaran));

    let storage = service.get_storage(request)?;

    match storage
        .list_krs_mahasiswa(user.id, &query.tahun_ajaran, query.periode)
        .await
    {
        Ok(items) => {
            let total_sks = total_sks_aktif(&items);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                KrsSemesterResponse {
                    tahun_ajaran: query.tahun_ajaran,
                    periode: query.periode.to_string(),
                    items,
                    total_sks,
                    max_sks: service.get_config().akademik.max_sks,
                },
                "KRS retrieved successfully",
            )))
        }
        Err(e) => Ok(storage_error("Failed to retrieve KRS", e)),
    }
}
