use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::KrsService;
use crate::models::{ApiResponse, krs::requests::PengajuanListParams};
use crate::services::access::{current_user, storage_error};

pub async fn list_pengajuan(
    service: &KrsService,
    params: PengajuanListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;

    // 管理员看全部，教师只看自己讲授的课程
    let dosen_id = (!user.is_admin()).then_some(user.id);

    match storage
        .list_pengajuan_krs(dosen_id, params.mata_kuliah_id, params.page, params.size)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Pending KRS retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve pending KRS", e)),
    }
}
