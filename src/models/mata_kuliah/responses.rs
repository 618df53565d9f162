use serde::Serialize;

use super::entities::{MataKuliah, MataKuliahDetail};
use crate::models::common::PaginationInfo;
use crate::models::users::entities::MahasiswaRingkas;

#[derive(Debug, Serialize)]
pub struct MataKuliahListResponse {
    pub items: Vec<MataKuliahDetail>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct MataKuliahDiampuResponse {
    pub items: Vec<MataKuliah>,
}

/// 已批准选课的学生
#[derive(Debug, Serialize)]
pub struct PesertaItem {
    pub krs_id: i64,
    pub mahasiswa: MahasiswaRingkas,
}

#[derive(Debug, Serialize)]
pub struct PesertaResponse {
    pub mata_kuliah: MataKuliah,
    pub tahun_ajaran: String,
    pub periode: String,
    pub items: Vec<PesertaItem>,
}
