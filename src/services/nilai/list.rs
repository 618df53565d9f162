use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NilaiService;
use crate::models::{
    ApiResponse,
    nilai::{requests::NilaiListParams, responses::NilaiListResponse},
};
use crate::services::access::{
    current_user, ensure_pengampu, load_mata_kuliah, storage_error, validate_semester,
};

pub async fn list_nilai(
    service: &NilaiService,
    params: NilaiListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    try_or_respond!(validate_semester(&params.tahun_ajaran));

    let storage = service.get_storage(request)?;
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, params.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    match storage
        .list_nilai_by_mata_kuliah(mata_kuliah.id, &params.tahun_ajaran, params.periode)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NilaiListResponse {
                mata_kuliah_id: mata_kuliah.id,
                tahun_ajaran: params.tahun_ajaran,
                periode: params.periode.to_string(),
                items,
            },
            "Grades retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve grades", e)),
    }
}
