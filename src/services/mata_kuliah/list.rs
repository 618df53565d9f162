use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MataKuliahService;
use crate::models::{
    ApiResponse,
    mata_kuliah::requests::{MataKuliahListParams, MataKuliahListQuery},
};
use crate::services::access::storage_error;

pub async fn list_mata_kuliah(
    service: &MataKuliahService,
    query: MataKuliahListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_mata_kuliah_with_pagination(MataKuliahListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Course list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve course list", e)),
    }
}
