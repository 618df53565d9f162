use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MataKuliahService;
use crate::models::{
    ApiResponse,
    mata_kuliah::{requests::PesertaQuery, responses::PesertaResponse},
};
use crate::services::access::{
    current_user, ensure_pengampu, load_mata_kuliah, storage_error, validate_semester,
};

pub async fn list_peserta(
    service: &MataKuliahService,
    id: i64,
    query: PesertaQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    try_or_respond!(validate_semester(&query.tahun_ajaran));

    let storage = service.get_storage(request)?;
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    match storage
        .list_peserta(id, &query.tahun_ajaran, query.periode)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PesertaResponse {
                mata_kuliah,
                tahun_ajaran: query.tahun_ajaran,
                periode: query.periode.to_string(),
                items,
            },
            "Course participants retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve course participants", e)),
    }
}
