use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use std::collections::HashMap;

use super::PresensiService;
use crate::models::{
    ApiResponse,
    presensi::{
        entities::{SesiItem, StatusPresensi},
        requests::MataKuliahQuery,
        responses::SesiListResponse,
    },
    users::entities::UserRole,
};
use crate::services::access::{current_user, ensure_anggota, load_mata_kuliah, storage_error};

pub async fn list_sesi(
    service: &PresensiService,
    query: MataKuliahQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, query.mata_kuliah_id).await);
    try_or_respond!(ensure_anggota(&storage, &user, &mata_kuliah).await);

    let sesi_list = match storage.list_sesi_by_mata_kuliah(mata_kuliah.id).await {
        Ok(list) => list,
        Err(e) => return Ok(storage_error("Failed to retrieve attendance sessions", e)),
    };

    let is_mahasiswa = user.role == UserRole::Mahasiswa;
    let milik_sendiri: HashMap<i64, StatusPresensi> = if is_mahasiswa {
        match storage
            .list_presensi_by_mata_kuliah(mata_kuliah.id, Some(user.id))
            .await
        {
            Ok(records) => records.into_iter().map(|p| (p.sesi_id, p.status)).collect(),
            Err(e) => return Ok(storage_error("Failed to retrieve attendance records", e)),
        }
    } else {
        HashMap::new()
    };

    let now = Utc::now();
    let items = sesi_list
        .into_iter()
        .map(|mut sesi| {
            let status_sesi = sesi.status_at(now);
            let bisa_presensi = sesi.bisa_presensi(now);
            let status_presensi = if is_mahasiswa {
                // 签到码只给教师看
                sesi.kode.clear();
                milik_sendiri.get(&sesi.id).copied()
            } else {
                None
            };
            SesiItem {
                sesi,
                status_sesi,
                bisa_presensi,
                status_presensi,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SesiListResponse { items },
        "Attendance sessions retrieved successfully",
    )))
}
