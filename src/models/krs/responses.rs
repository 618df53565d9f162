use serde::Serialize;

use super::entities::{KrsDetail, PengajuanKrs};
use crate::models::common::PaginationInfo;

// 学期选课表
#[derive(Debug, Serialize)]
pub struct KrsSemesterResponse {
    pub tahun_ajaran: String,
    pub periode: String,
    pub items: Vec<KrsDetail>,
    /// 未被驳回的课程学分合计
    pub total_sks: i32,
    pub max_sks: i32,
}

#[derive(Debug, Serialize)]
pub struct AjukanKrsResponse {
    pub items: Vec<KrsDetail>,
    pub total_sks: i32,
}

#[derive(Debug, Serialize)]
pub struct PengajuanListResponse {
    pub items: Vec<PengajuanKrs>,
    pub pagination: PaginationInfo,
}
