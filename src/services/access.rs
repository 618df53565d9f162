//! 服务层公共辅助：取依赖、当前用户、课程归属检查、存储错误映射

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::SiakadError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, mata_kuliah::entities::MataKuliah, users::entities::User,
};
use crate::storage::Storage;
use crate::utils::validate::validate_tahun_ajaran;

pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not configured"))
}

/// 管理员修改用户后清空认证缓存，使角色与状态变更立即生效
pub(crate) async fn invalidate_user_cache(request: &HttpRequest) {
    if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
        cache.invalidate_all().await;
    }
}

pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
}

/// 存储层错误转换为 HTTP 响应，约束冲突为 409，其余按上游错误处理
pub(crate) fn storage_error(context: &str, err: SiakadError) -> HttpResponse {
    match err {
        SiakadError::Conflict(msg) => conflict(ErrorCode::Conflict, format!("{context}: {msg}")),
        SiakadError::NotFound(msg) => not_found(ErrorCode::NotFound, format!("{context}: {msg}")),
        SiakadError::Validation(msg) | SiakadError::CreditLimit(msg) => {
            bad_request(ErrorCode::BadRequest, format!("{context}: {msg}"))
        }
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {}", other.message()),
            ))
        }
    }
}

pub(crate) fn validate_semester(tahun_ajaran: &str) -> Result<(), HttpResponse> {
    validate_tahun_ajaran(tahun_ajaran).map_err(|msg| bad_request(ErrorCode::KrsInvalidTerm, msg))
}

pub(crate) async fn load_mata_kuliah(
    storage: &Arc<dyn Storage>,
    id: i64,
) -> Result<MataKuliah, HttpResponse> {
    match storage.get_mata_kuliah_by_id(id).await {
        Ok(Some(mata_kuliah)) => Ok(mata_kuliah),
        Ok(None) => Err(not_found(
            ErrorCode::MataKuliahNotFound,
            format!("Course {id} not found"),
        )),
        Err(e) => Err(storage_error("Failed to load course", e)),
    }
}

/// 课程的授课教师或管理员
pub(crate) fn ensure_pengampu(user: &User, mata_kuliah: &MataKuliah) -> Result<(), HttpResponse> {
    if user.is_admin() || mata_kuliah.diampu_oleh(user.id) {
        Ok(())
    } else {
        Err(forbidden(
            ErrorCode::NotLecturerOfCourse,
            "Only the lecturer of this course can perform this action",
        ))
    }
}

/// 持有已批准选课的学生
pub(crate) async fn ensure_terdaftar(
    storage: &Arc<dyn Storage>,
    mahasiswa_id: i64,
    mata_kuliah_id: i64,
) -> Result<(), HttpResponse> {
    match storage
        .is_mahasiswa_terdaftar(mahasiswa_id, mata_kuliah_id)
        .await
    {
        Ok(true) => Ok(()),
        Ok(false) => Err(forbidden(
            ErrorCode::NotEnrolled,
            "Student is not enrolled in this course",
        )),
        Err(e) => Err(storage_error("Failed to check enrollment", e)),
    }
}

/// 课程成员：授课教师、管理员或已选课学生
pub(crate) async fn ensure_anggota(
    storage: &Arc<dyn Storage>,
    user: &User,
    mata_kuliah: &MataKuliah,
) -> Result<(), HttpResponse> {
    if user.is_admin() || mata_kuliah.diampu_oleh(user.id) {
        return Ok(());
    }
    if user.role == crate::models::users::entities::UserRole::Mahasiswa {
        return ensure_terdaftar(storage, user.id, mata_kuliah.id).await;
    }
    Err(forbidden(
        ErrorCode::NotLecturerOfCourse,
        "Only members of this course can access it",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_storage_error_status() {
        let resp = storage_error("x", SiakadError::conflict("dup"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let resp = storage_error("x", SiakadError::credit_limit("26 > 24"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = storage_error("x", SiakadError::database_operation("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
