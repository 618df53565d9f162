use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TugasService, load_tugas};
use crate::models::{ApiResponse, ErrorCode, tugas::requests::UpdateTugasRequest};
use crate::services::access::{
    bad_request, current_user, ensure_pengampu, load_mata_kuliah, not_found, storage_error,
};

pub async fn update_tugas(
    service: &TugasService,
    id: i64,
    req: UpdateTugasRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    if let Err(msg) = req.validate() {
        return Ok(bad_request(ErrorCode::TugasInvalid, msg));
    }

    let storage = service.get_storage(request)?;
    let tugas = try_or_respond!(load_tugas(&storage, id).await);
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, tugas.mata_kuliah_id).await);
    try_or_respond!(ensure_pengampu(&user, &mata_kuliah));

    // 满分不能低于已给出的最高分
    if let Some(max) = req.nilai_maksimal
        && max < tugas.nilai_maksimal
    {
        let tertinggi = match storage.list_pengumpulan_by_tugas(id).await {
            Ok(items) => items
                .iter()
                .filter_map(|item| item.pengumpulan.nilai)
                .reduce(f64::max),
            Err(e) => return Ok(storage_error("Failed to load submissions", e)),
        };
        if let Some(tertinggi) = tertinggi
            && max < tertinggi
        {
            return Ok(bad_request(
                ErrorCode::TugasInvalid,
                format!("nilai_maksimal cannot be lower than an existing grade ({tertinggi})"),
            ));
        }
    }

    match storage.update_tugas(id, req).await {
        Ok(Some(tugas)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            tugas,
            "Assignment updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::TugasNotFound,
            format!("Assignment {id} not found"),
        )),
        Err(e) => Ok(storage_error("Failed to update assignment", e)),
    }
}
