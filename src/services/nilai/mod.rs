pub mod input;
pub mod khs;
pub mod list;
pub mod transkrip;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::{
    ErrorCode,
    nilai::requests::{InputNilaiRequest, KhsParams, NilaiListParams, TranskripParams},
    users::entities::{User, UserRole},
};
use crate::services::access::{bad_request, forbidden, not_found, storage_error};
use crate::storage::Storage;

pub struct NilaiService {
    storage: Option<Arc<dyn Storage>>,
}

impl NilaiService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::access::storage_from_request(request),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 教师/管理员：录入成绩
    pub async fn input_nilai(
        &self,
        req: InputNilaiRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        input::input_nilai(self, req, request).await
    }

    // 教师/管理员：课程成绩单
    pub async fn list_nilai(
        &self,
        params: NilaiListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_nilai(self, params, request).await
    }

    pub async fn khs(&self, params: KhsParams, request: &HttpRequest) -> ActixResult<HttpResponse> {
        khs::get_khs(self, params, request).await
    }

    pub async fn transkrip(
        &self,
        params: TranskripParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transkrip::get_transkrip(self, params, request).await
    }
}

/// 确定查询对象：学生只能查本人，管理员须指定学生
pub(crate) async fn target_mahasiswa(
    storage: &Arc<dyn Storage>,
    user: &User,
    mahasiswa_id: Option<i64>,
) -> Result<i64, HttpResponse> {
    match user.role {
        UserRole::Mahasiswa => Ok(user.id),
        UserRole::Admin => {
            let Some(id) = mahasiswa_id else {
                return Err(bad_request(
                    ErrorCode::BadRequest,
                    "mahasiswa_id is required",
                ));
            };
            match storage.get_user_by_id(id).await {
                Ok(Some(target)) if target.role == UserRole::Mahasiswa => Ok(target.id),
                Ok(_) => Err(not_found(
                    ErrorCode::UserNotFound,
                    format!("Student {id} not found"),
                )),
                Err(e) => Err(storage_error("Failed to load student", e)),
            }
        }
        UserRole::Dosen => Err(forbidden(
            ErrorCode::Forbidden,
            "Only students and administrators can view study results",
        )),
    }
}
