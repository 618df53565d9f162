pub mod create;
pub mod delete;
pub mod diampu;
pub mod get;
pub mod list;
pub mod peserta;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::mata_kuliah::requests::{
    CreateMataKuliahRequest, MataKuliahListParams, PesertaQuery, UpdateMataKuliahRequest,
};
use crate::storage::Storage;

pub struct MataKuliahService {
    storage: Option<Arc<dyn Storage>>,
}

impl MataKuliahService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::access::storage_from_request(request),
        }
    }

    pub async fn list_mata_kuliah(
        &self,
        query: MataKuliahListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_mata_kuliah(self, query, request).await
    }

    pub async fn get_mata_kuliah(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_mata_kuliah(self, id, request).await
    }

    // 管理员：创建课程
    pub async fn create_mata_kuliah(
        &self,
        req: CreateMataKuliahRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_mata_kuliah(self, req, request).await
    }

    pub async fn update_mata_kuliah(
        &self,
        id: i64,
        req: UpdateMataKuliahRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_mata_kuliah(self, id, req, request).await
    }

    pub async fn delete_mata_kuliah(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_mata_kuliah(self, id, request).await
    }

    // 课程某学期的学生名单
    pub async fn list_peserta(
        &self,
        id: i64,
        query: PesertaQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        peserta::list_peserta(self, id, query, request).await
    }

    // 当前教师讲授的课程
    pub async fn list_diampu(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        diampu::list_diampu(self, request).await
    }
}

/// `dosen_id` 必须指向教师账号
pub(crate) async fn ensure_dosen(
    storage: &Arc<dyn Storage>,
    dosen_id: i64,
) -> Result<(), HttpResponse> {
    use crate::models::{ErrorCode, users::entities::UserRole};
    use crate::services::access::{bad_request, storage_error};

    match storage.get_user_by_id(dosen_id).await {
        Ok(Some(user)) if user.role == UserRole::Dosen => Ok(()),
        Ok(_) => Err(bad_request(
            ErrorCode::MataKuliahInvalid,
            format!("dosen_id {dosen_id} does not reference a lecturer"),
        )),
        Err(e) => Err(storage_error("Failed to check lecturer", e)),
    }
}
