use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::list::gabung_pengumpulan;
use super::{TugasService, load_tugas};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, ensure_anggota, load_mata_kuliah, not_found};

pub async fn get_tugas(
    service: &TugasService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let tugas = try_or_respond!(load_tugas(&storage, id).await);
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, tugas.mata_kuliah_id).await);
    try_or_respond!(ensure_anggota(&storage, &user, &mata_kuliah).await);

    let items = try_or_respond!(gabung_pengumpulan(&storage, &user, vec![tugas]).await);

    match items.into_iter().next() {
        Some(item) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            item,
            "Assignment retrieved successfully",
        ))),
        None => Ok(not_found(
            ErrorCode::TugasNotFound,
            format!("Assignment {id} not found"),
        )),
    }
}
