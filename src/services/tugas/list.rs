use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::TugasService;
use crate::models::{
    ApiResponse,
    tugas::{
        entities::{Pengumpulan, Tugas, TugasItem},
        requests::TugasListParams,
        responses::TugasListResponse,
    },
    users::entities::{User, UserRole},
};
use crate::services::access::{current_user, ensure_anggota, load_mata_kuliah, storage_error};
use crate::storage::Storage;

/// 按角色合并提交信息：学生附本人状态，教师附提交数
pub(crate) async fn gabung_pengumpulan(
    storage: &Arc<dyn Storage>,
    user: &User,
    tugas: Vec<Tugas>,
) -> Result<Vec<TugasItem>, HttpResponse> {
    let ids: Vec<i64> = tugas.iter().map(|t| t.id).collect();

    if user.role == UserRole::Mahasiswa {
        let milik: HashMap<i64, Pengumpulan> =
            match storage.list_pengumpulan_mahasiswa(user.id, &ids).await {
                Ok(list) => list.into_iter().map(|p| (p.tugas_id, p)).collect(),
                Err(e) => return Err(storage_error("Failed to retrieve submissions", e)),
            };
        Ok(tugas
            .into_iter()
            .map(|t| {
                let pengumpulan = milik.get(&t.id);
                TugasItem::untuk_mahasiswa(t, pengumpulan)
            })
            .collect())
    } else {
        let counts = match storage.count_pengumpulan_by_tugas(&ids).await {
            Ok(counts) => counts,
            Err(e) => return Err(storage_error("Failed to count submissions", e)),
        };
        Ok(tugas
            .into_iter()
            .map(|t| {
                let jumlah = counts.get(&t.id).copied().unwrap_or(0);
                TugasItem::untuk_dosen(t, jumlah)
            })
            .collect())
    }
}

pub async fn list_tugas(
    service: &TugasService,
    params: TugasListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, params.mata_kuliah_id).await);
    try_or_respond!(ensure_anggota(&storage, &user, &mata_kuliah).await);

    let tugas = match storage.list_tugas_by_mata_kuliah(mata_kuliah.id).await {
        Ok(list) => list,
        Err(e) => return Ok(storage_error("Failed to retrieve assignments", e)),
    };

    let items = try_or_respond!(gabung_pengumpulan(&storage, &user, tugas).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TugasListResponse { items },
        "Assignments retrieved successfully",
    )))
}
