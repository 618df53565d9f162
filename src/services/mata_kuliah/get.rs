use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MataKuliahService;
use crate::models::{ApiResponse, mata_kuliah::entities::MataKuliahDetail};
use crate::services::access::{load_mata_kuliah, storage_error};

pub async fn get_mata_kuliah(
    service: &MataKuliahService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, id).await);

    let nama_dosen = match storage.get_user_by_id(mata_kuliah.dosen_id).await {
        Ok(dosen) => dosen.map(|d| d.nama),
        Err(e) => return Ok(storage_error("Failed to load lecturer", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MataKuliahDetail {
            mata_kuliah,
            nama_dosen,
        },
        "Course retrieved successfully",
    )))
}
