pub mod buka;
pub mod detail;
pub mod hadir;
pub mod list;
pub mod rekap;
pub mod set_status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::presensi::{
    entities::SesiPresensi,
    requests::{BukaSesiRequest, HadirRequest, MataKuliahQuery, SetPresensiRequest},
};
use crate::services::access::{not_found, storage_error};
use crate::storage::Storage;

pub struct PresensiService {
    storage: Option<Arc<dyn Storage>>,
}

impl PresensiService {
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

    // 教师：开设考勤场次
    pub async fn buka_sesi(
        &self,
        req: BukaSesiRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        buka::buka_sesi(self, req, request).await
    }

    // 课程的考勤场次
    pub async fn list_sesi(
        &self,
        query: MataKuliahQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_sesi(self, query, request).await
    }

    // 教师：场次详情与全部记录
    pub async fn get_sesi(&self, sesi_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::get_sesi(self, sesi_id, request).await
    }

    // 学生：签到
    pub async fn hadir(
        &self,
        sesi_id: i64,
        req: HadirRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        hadir::hadir(self, sesi_id, req, request).await
    }

    // 教师：录入某学生的考勤状态
    pub async fn set_status(
        &self,
        sesi_id: i64,
        mahasiswa_id: i64,
        req: SetPresensiRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        set_status::set_status(self, sesi_id, mahasiswa_id, req, request).await
    }

    // 考勤汇总
    pub async fn rekap(
        &self,
        query: MataKuliahQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        rekap::rekap(self, query, request).await
    }
}

pub(crate) async fn load_sesi(
    storage: &Arc<dyn Storage>,
    sesi_id: i64,
) -> Result<SesiPresensi, HttpResponse> {
    match storage.get_sesi_by_id(sesi_id).await {
        Ok(Some(sesi)) => Ok(sesi),
        Ok(None) => Err(not_found(
            ErrorCode::SesiNotFound,
            format!("Attendance session {sesi_id} not found"),
        )),
        Err(e) => Err(storage_error("Failed to load attendance session", e)),
    }
}
