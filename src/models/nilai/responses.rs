use serde::Serialize;

use super::entities::{NilaiMahasiswa, NilaiMataKuliah};

#[derive(Debug, Serialize)]
pub struct NilaiListResponse {
    pub mata_kuliah_id: i64,
    pub tahun_ajaran: String,
    pub periode: String,
    pub items: Vec<NilaiMahasiswa>,
}

// 学期成绩单
#[derive(Debug, Serialize)]
pub struct KhsResponse {
    pub mahasiswa_id: i64,
    pub tahun_ajaran: String,
    pub periode: String,
    pub items: Vec<NilaiMataKuliah>,
    pub total_sks: i32,
    pub ips: f64,
}

// 成绩总表
#[derive(Debug, Serialize)]
pub struct TranskripResponse {
    pub mahasiswa_id: i64,
    pub semester: Vec<KhsResponse>,
    pub total_sks: i32,
    pub ipk: f64,
}
