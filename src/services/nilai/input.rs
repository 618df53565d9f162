use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NilaiService;
use crate::models::{
    ApiResponse, ErrorCode,
    nilai::{entities::SimpanNilai, requests::InputNilaiRequest},
};
use crate::services::access::{
    bad_request, current_user, ensure_pengampu, load_mata_kuliah, storage_error,
    validate_semester,
};
use crate::utils::akademik::{huruf_mutu, nilai_akhir};

pub async fn input_nilai(
    service: &NilaiService,
    req: InputNilaiRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    if let Err(msg) = req.validate() {
        return Ok(bad_request(ErrorCode::NilaiInvalid, msg));
    }
    try_or_respond!(validate_semester(&req.tahun_ajaran));

    let storage = service.get_storage(request)?;
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, req.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    // 只有该学期已批准的选课才能录入成绩
    match storage
        .get_krs_disetujui(
            req.mahasiswa_id,
            mata_kuliah.id,
            &req.tahun_ajaran,
            req.periode,
        )
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(bad_request(
                ErrorCode::NotEnrolled,
                format!(
                    "Student {} has no approved KRS for {} in {} {}",
                    req.mahasiswa_id, mata_kuliah.kode, req.tahun_ajaran, req.periode
                ),
            ));
        }
        Err(e) => return Ok(storage_error("Failed to load KRS", e)),
    }

    let akhir = nilai_akhir(
        &service.get_config().akademik,
        req.nilai_tugas,
        req.nilai_uts,
        req.nilai_uas,
    );
    let (huruf, bobot) = huruf_mutu(akhir);

    let simpan = SimpanNilai {
        mahasiswa_id: req.mahasiswa_id,
        mata_kuliah_id: mata_kuliah.id,
        tahun_ajaran: req.tahun_ajaran,
        periode: req.periode,
        nilai_tugas: req.nilai_tugas,
        nilai_uts: req.nilai_uts,
        nilai_uas: req.nilai_uas,
        nilai_akhir: akhir,
        nilai_huruf: huruf.to_string(),
        bobot,
        dinilai_oleh: user.id,
    };

    match storage.simpan_nilai(simpan).await {
        Ok(nilai) => {
            info!(
                "Grade {} ({}) recorded for student {} in {}",
                nilai.nilai_huruf, nilai.nilai_akhir, nilai.mahasiswa_id, mata_kuliah.kode
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(nilai, "Grade saved successfully")))
        }
        Err(e) => Ok(storage_error("Failed to save grade", e)),
    }
}
