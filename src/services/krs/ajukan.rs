use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};
use tracing::info;

use super::KrsService;
use super::list::total_sks_aktif;
use crate::models::{
    ApiResponse, ErrorCode,
    krs::{entities::KrsDetail, requests::AjukanKrsRequest, responses::AjukanKrsResponse},
    mata_kuliah::entities::MataKuliah,
};
use crate::services::access::{
    bad_request, conflict, current_user, not_found, storage_error, validate_semester,
};
use crate::utils::akademik::cek_batas_sks;

pub async fn ajukan_krs(
    service: &KrsService,
    req: AjukanKrsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    if let Err(msg) = req.validate_ids() {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    try_or_respond!(validate_semester(&req.tahun_ajaran));

    let storage = service.get_storage(request)?;
    let config = service.get_config();

    // 1. 所有课程必须存在
    let mata_kuliah: HashMap<i64, MataKuliah> =
        match storage.get_mata_kuliah_by_ids(&req.mata_kuliah_ids).await {
            Ok(list) => list.into_iter().map(|mk| (mk.id, mk)).collect(),
            Err(e) => return Ok(storage_error("Failed to load courses", e)),
        };
    let missing: Vec<String> = req
        .mata_kuliah_ids
        .iter()
        .filter(|id| !mata_kuliah.contains_key(id))
        .map(i64::to_string)
        .collect();
    if !missing.is_empty() {
        return Ok(not_found(
            ErrorCode::MataKuliahNotFound,
            format!("Courses not found: {}", missing.join(", ")),
        ));
    }

    // 2. 本学期已有的选课
    let existing = match storage
        .list_krs_mahasiswa(user.id, &req.tahun_ajaran, req.periode)
        .await
    {
        Ok(items) => items,
        Err(e) => return Ok(storage_error("Failed to load existing KRS", e)),
    };
    let terdaftar: HashSet<i64> = existing.iter().map(|k| k.krs.mata_kuliah_id).collect();
    if let Some(mk) = req
        .mata_kuliah_ids
        .iter()
        .filter(|id| terdaftar.contains(id))
        .filter_map(|id| mata_kuliah.get(id))
        .next()
    {
        return Ok(conflict(
            ErrorCode::KrsAlreadyRegistered,
            format!("Course {} is already in this term's KRS", mk.kode),
        ));
    }

    // 3. 学分上限
    let sks_baru: i32 = mata_kuliah.values().map(|mk| mk.sks).sum();
    let total_sks = total_sks_aktif(&existing) + sks_baru;
    if let Err(e) = cek_batas_sks(total_sks, config.akademik.max_sks) {
        return Ok(bad_request(
            ErrorCode::KrsCreditLimitExceeded,
            e.message().to_string(),
        ));
    }

    // 4. 名额
    let counts = match storage
        .count_krs_aktif_by_mata_kuliah(&req.mata_kuliah_ids, &req.tahun_ajaran, req.periode)
        .await
    {
        Ok(counts) => counts,
        Err(e) => return Ok(storage_error("Failed to count enrollments", e)),
    };
    for mk in mata_kuliah.values() {
        let terisi = counts.get(&mk.id).copied().unwrap_or(0);
        if terisi >= i64::from(mk.kuota) {
            return Ok(conflict(
                ErrorCode::KrsQuotaFull,
                format!("Course {} is full ({}/{})", mk.kode, terisi, mk.kuota),
            ));
        }
    }

    // 5. 事务内写入
    let created = match storage
        .create_krs_batch(
            user.id,
            &req.tahun_ajaran,
            req.periode,
            &req.mata_kuliah_ids,
        )
        .await
    {
        Ok(created) => created,
        Err(e) if e.is_conflict() => {
            return Ok(conflict(
                ErrorCode::KrsAlreadyRegistered,
                "One of the courses is already in this term's KRS",
            ));
        }
        Err(e) => return Ok(storage_error("Failed to submit KRS", e)),
    };

    info!(
        "Student {} submitted {} courses ({} SKS) for {} {}",
        user.nomor_induk,
        created.len(),
        sks_baru,
        req.tahun_ajaran,
        req.periode
    );

    let mut mata_kuliah = mata_kuliah;
    let items: Vec<KrsDetail> = created
        .into_iter()
        .filter_map(|krs| {
            let mata_kuliah = mata_kuliah.remove(&krs.mata_kuliah_id)?;
            Some(KrsDetail { krs, mata_kuliah })
        })
        .collect();

    Ok(HttpResponse::Created().json(ApiResponse::success(
        AjukanKrsResponse { items, total_sks },
        "KRS submitted successfully",
    )))
}
