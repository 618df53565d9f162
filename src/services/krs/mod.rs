pub mod ajukan;
pub mod batal;
pub mod list;
pub mod pengajuan;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::krs::requests::{
    AjukanKrsRequest, PengajuanListParams, SemesterQuery, UpdateKrsStatusRequest,
};
use crate::storage::Storage;

pub struct KrsService {
    storage: Option<Arc<dyn Storage>>,
}

impl KrsService {
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

    // 学生：本学期选课
    pub async fn list_krs(
        &self,
        query: SemesterQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_krs(self, query, request).await
    }

    // 学生：提交选课
    pub async fn ajukan_krs(
        &self,
        req: AjukanKrsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        ajukan::ajukan_krs(self, req, request).await
    }

    // 学生：撤回选课
    pub async fn batal_krs(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        batal::batal_krs(self, id, request).await
    }

    // 教师/管理员：待审核列表
    pub async fn list_pengajuan(
        &self,
        params: PengajuanListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        pengajuan::list_pengajuan(self, params, request).await
    }

    // 教师/管理员：审核
    pub async fn update_status(
        &self,
        id: i64,
        req: UpdateKrsStatusRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_status(self, id, req, request).await
    }
}
