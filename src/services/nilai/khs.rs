use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NilaiService, target_mahasiswa};
use crate::models::{
    ApiResponse,
    krs::entities::Semester,
    nilai::{entities::NilaiMataKuliah, requests::KhsParams, responses::KhsResponse},
};
use crate::services::access::{current_user, storage_error, validate_semester};
use crate::utils::akademik::indeks_prestasi;

/// 汇总某学期成绩：总学分与 IPS
pub(crate) fn susun_khs(
    mahasiswa_id: i64,
    semester: Semester,
    items: Vec<NilaiMataKuliah>,
) -> KhsResponse {
    let total_sks = items.iter().map(|i| i.mata_kuliah.sks).sum();
    let ips = indeks_prestasi(items.iter().map(|i| (i.nilai.bobot, i.mata_kuliah.sks)));
    KhsResponse {
        mahasiswa_id,
        tahun_ajaran: semester.tahun_ajaran,
        periode: semester.periode.to_string(),
        items,
        total_sks,
        ips,
    }
}

pub async fn get_khs(
    service: &NilaiService,
    params: KhsParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    try_or_respond!(validate_semester(&params.tahun_ajaran));

    let storage = service.get_storage(request)?;
    let mahasiswa_id =
        try_or_respond!(target_mahasiswa(&storage, &user, params.mahasiswa_id).await);

    let semester = Some((params.tahun_ajaran.as_str(), params.periode));
    let items = match storage.list_nilai_mahasiswa(mahasiswa_id, semester).await {
        Ok(items) => items,
        Err(e) => return Ok(storage_error("Failed to retrieve grades", e)),
    };

    let semester = Semester {
        tahun_ajaran: params.tahun_ajaran,
        periode: params.periode,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        susun_khs(mahasiswa_id, semester, items),
        "KHS retrieved successfully",
    )))
}
