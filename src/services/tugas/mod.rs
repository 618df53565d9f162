pub mod create;
pub mod delete;
pub mod detail;
pub mod kumpulkan;
pub mod list;
pub mod nilai;
pub mod pengumpulan;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::tugas::{
    entities::Tugas,
    requests::{
        CreateTugasRequest, KumpulkanRequest, NilaiPengumpulanRequest, TugasListParams,
        UpdateTugasRequest,
    },
};
use crate::services::access::{not_found, storage_error};
use crate::storage::Storage;

pub struct TugasService {
    storage: Option<Arc<dyn Storage>>,
}

impl TugasService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::access::storage_from_request(request),
        }
    }

    pub async fn list_tugas(
        &self,
        params: TugasListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_tugas(self, params, request).await
    }

    pub async fn create_tugas(
        &self,
        req: CreateTugasRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_tugas(self, req, request).await
    }

    pub async fn get_tugas(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::get_tugas(self, id, request).await
    }

    pub async fn update_tugas(
        &self,
        id: i64,
        req: UpdateTugasRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_tugas(self, id, req, request).await
    }

    pub async fn delete_tugas(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_tugas(self, id, request).await
    }

    // 学生：提交或重新提交
    pub async fn kumpulkan(
        &self,
        tugas_id: i64,
        req: KumpulkanRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        kumpulkan::kumpulkan(self, tugas_id, req, request).await
    }

    // 教师：作业的全部提交
    pub async fn list_pengumpulan(
        &self,
        tugas_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        pengumpulan::list_pengumpulan(self, tugas_id, request).await
    }

    // 学生：本人的提交
    pub async fn pengumpulan_saya(
        &self,
        tugas_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        pengumpulan::pengumpulan_saya(self, tugas_id, request).await
    }

    // 教师：批改
    pub async fn nilai_pengumpulan(
        &self,
        pengumpulan_id: i64,
        req: NilaiPengumpulanRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        nilai::nilai_pengumpulan(self, pengumpulan_id, req, request).await
    }
}

pub(crate) async fn load_tugas(storage: &Arc<dyn Storage>, id: i64) -> Result<Tugas, HttpResponse> {
    match storage.get_tugas_by_id(id).await {
        Ok(Some(tugas)) => Ok(tugas),
        Ok(None) => Err(not_found(
            ErrorCode::TugasNotFound,
            format!("Assignment {id} not found"),
        )),
        Err(e) => Err(storage_error("Failed to load assignment", e)),
    }
}
